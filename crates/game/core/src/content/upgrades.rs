//! Permanent farm upgrades offered on boss waves.

use crate::state::{DecisionEffect, DecisionOption};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum UpgradeId {
    /// Extra end-of-turn regeneration.
    FertileGrounds,
    /// Extra crit chance.
    SharpenedTools,
    /// Cooldowns recover two turns per turn.
    MysticalWell,
}

impl UpgradeId {
    pub const FERTILE_GROUNDS_REGEN_BONUS: f64 = 0.05;
    pub const SHARPENED_TOOLS_CRIT_BONUS: f64 = 0.2;

    pub fn label(self) -> &'static str {
        match self {
            UpgradeId::FertileGrounds => "Fertile Grounds",
            UpgradeId::SharpenedTools => "Sharpened Tools",
            UpgradeId::MysticalWell => "Mystical Well",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            UpgradeId::FertileGrounds => "+5% wave-end regeneration",
            UpgradeId::SharpenedTools => "Unlock 20% crit chance",
            UpgradeId::MysticalWell => "Reduce skill cooldowns by 1",
        }
    }

    fn option(self) -> DecisionOption {
        DecisionOption {
            id: self.to_string(),
            label: self.label().to_string(),
            summary: self.summary().to_string(),
            effects: vec![DecisionEffect::Upgrade { upgrade: self }],
        }
    }
}

/// The fixed three-way menu of the farm-upgrade decision.
pub fn farm_upgrade_options() -> Vec<DecisionOption> {
    [
        UpgradeId::FertileGrounds,
        UpgradeId::SharpenedTools,
        UpgradeId::MysticalWell,
    ]
    .into_iter()
    .map(UpgradeId::option)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_match_upgrade_ids() {
        let options = farm_upgrade_options();
        assert_eq!(options.len(), 3);
        for option in &options {
            let parsed: UpgradeId = option.id.parse().unwrap();
            assert_eq!(option.effects, vec![DecisionEffect::Upgrade { upgrade: parsed }]);
        }
    }
}
