//! Blocking choice points raised by the wave orchestrator.

use std::fmt;

use crate::content::{SkillId, UpgradeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DecisionId(pub u64);

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decision-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum DecisionKind {
    /// Permanent farm upgrade offered every boss interval.
    FarmUpgrade,
    /// Narrative branch (story arcs, rare events).
    StoryChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum StatKind {
    Attack,
    Defense,
    MaxHealth,
}

/// A single consequence of picking a decision option.
///
/// Externally tagged: snapshots must also decode from non-self-describing
/// formats such as bincode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum DecisionEffect {
    /// Permanent change to a base stat. `MaxHealth` moves current health by
    /// the same amount (then clamps).
    Stat { stat: StatKind, amount: i32 },
    /// Heal by a fraction of max health (subject to heal modifiers).
    HealPercent { value: f64 },
    Coins { amount: u32 },
    Upgrade { upgrade: UpgradeId },
    LearnSkill { skill: SkillId },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionOption {
    pub id: String,
    pub label: String,
    pub summary: String,
    pub effects: Vec<DecisionEffect>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PendingDecision {
    pub id: DecisionId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: DecisionKind,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    pub options: Vec<DecisionOption>,
}

impl PendingDecision {
    pub fn option(&self, option_id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}
