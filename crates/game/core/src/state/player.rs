//! Player combatant state.

use crate::content::{SkillId, UpgradeId};

use super::BuffInstance;

/// A learned skill slot and its remaining cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillInstance {
    pub id: SkillId,
    pub remaining_cooldown: u32,
}

impl SkillInstance {
    pub fn ready(id: SkillId) -> Self {
        Self {
            id,
            remaining_cooldown: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }
}

/// The defender of the farm.
///
/// `attack`, `defense` and `max_health` are the *current* totals: active buff
/// deltas are folded into them when applied and subtracted on expiry, so
/// nothing downstream needs to recompute derived stats.
///
/// Invariants:
/// - `0 <= health <= max_health`
/// - every id in `skills` also appears in `learned_skill_ids`
/// - `upgrades` contains no duplicates
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerState {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub coins: u32,
    /// Stored for save compatibility; no rule consumes it.
    pub mana: u32,
    pub skills: Vec<SkillInstance>,
    pub learned_skill_ids: Vec<SkillId>,
    pub buffs: Vec<BuffInstance>,
    pub upgrades: Vec<UpgradeId>,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub regen_percent: f64,
    /// Max health a negative shift could not take because of the floor at 1.
    /// Repaid before any later raise takes effect.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_health_overdraw: i32,
}

impl PlayerState {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_upgrade(&self, upgrade: UpgradeId) -> bool {
        self.upgrades.contains(&upgrade)
    }

    /// Adds a permanent upgrade. Returns `false` if it was already owned.
    pub fn grant_upgrade(&mut self, upgrade: UpgradeId) -> bool {
        if self.has_upgrade(upgrade) {
            return false;
        }
        self.upgrades.push(upgrade);
        true
    }

    pub fn has_learned(&self, skill: SkillId) -> bool {
        self.learned_skill_ids.contains(&skill)
    }

    /// Learns and equips a skill with no cooldown. Returns `false` if it was
    /// already known.
    pub fn learn_skill(&mut self, skill: SkillId) -> bool {
        if self.has_learned(skill) {
            return false;
        }
        self.learned_skill_ids.push(skill);
        self.skills.push(SkillInstance::ready(skill));
        true
    }

    pub fn skill(&self, skill: SkillId) -> Option<&SkillInstance> {
        self.skills.iter().find(|instance| instance.id == skill)
    }

    pub fn skill_mut(&mut self, skill: SkillId) -> Option<&mut SkillInstance> {
        self.skills.iter_mut().find(|instance| instance.id == skill)
    }

    /// Multiplicative factor applied to all healing received.
    ///
    /// Independent modifiers stack multiplicatively (two Poisons quarter
    /// healing).
    pub fn heal_modifier(&self) -> f64 {
        self.buffs
            .iter()
            .filter_map(|buff| buff.heal_modifier)
            .product()
    }

    /// Crit chance including upgrades, capped at 1.
    pub fn effective_crit_chance(&self) -> f64 {
        let bonus = if self.has_upgrade(UpgradeId::SharpenedTools) {
            UpgradeId::SHARPENED_TOOLS_CRIT_BONUS
        } else {
            0.0
        };
        (self.crit_chance + bonus).min(1.0)
    }

    /// Passive regeneration fraction applied at the end of each turn.
    pub fn effective_regen(&self) -> f64 {
        let bonus = if self.has_upgrade(UpgradeId::FertileGrounds) {
            UpgradeId::FERTILE_GROUNDS_REGEN_BONUS
        } else {
            0.0
        };
        self.regen_percent + bonus
    }

    /// Cooldown turns recovered per resolved turn.
    pub fn cooldown_recovery(&self) -> u32 {
        if self.has_upgrade(UpgradeId::MysticalWell) {
            2
        } else {
            1
        }
    }

    /// Attack without the deltas of active buffs, i.e. the total left once
    /// every buff has expired.
    pub fn base_attack(&self) -> i32 {
        self.attack - self.buffs.iter().map(BuffInstance::attack_delta).sum::<i32>()
    }

    /// Permanently shifts attack, keeping [`Self::base_attack`] at or above
    /// `floor`. Active buff deltas stay on top.
    pub fn shift_base_attack(&mut self, delta: i32, floor: i32) {
        let buffed = self.attack - self.base_attack();
        self.attack = (self.base_attack() + delta).max(floor) + buffed;
    }

    /// Shifts max health, never below 1, then clamps health.
    ///
    /// The part of a cut absorbed by the floor is tracked in
    /// `max_health_overdraw`, so opposite shifts cancel exactly in any order.
    pub fn shift_max_health(&mut self, delta: i32) {
        let raw = self.max_health - self.max_health_overdraw + delta;
        self.max_health = raw.max(1);
        self.max_health_overdraw = self.max_health - raw;
        self.clamp_health();
    }

    pub fn clamp_health(&mut self) {
        self.health = crate::env::clamp(self.health, 0, self.max_health);
    }

    /// Heals a fraction of max health scaled by [`Self::heal_modifier`].
    /// Returns the health actually gained after clamping.
    pub fn heal_percent(&mut self, percent: f64) -> i32 {
        let amount = (self.max_health as f64 * percent * self.heal_modifier()).round() as i32;
        let before = self.health;
        self.health = crate::env::clamp(self.health + amount.max(0), 0, self.max_health);
        self.health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::create_base_player;

    #[test]
    fn upgrades_have_set_semantics() {
        let mut player = create_base_player("Tester");
        assert!(player.grant_upgrade(UpgradeId::MysticalWell));
        assert!(!player.grant_upgrade(UpgradeId::MysticalWell));
        assert_eq!(player.upgrades, vec![UpgradeId::MysticalWell]);
        assert_eq!(player.cooldown_recovery(), 2);
    }

    #[test]
    fn learning_equips_with_no_cooldown() {
        let mut player = create_base_player("Tester");
        assert!(player.learn_skill(SkillId::SeedOfVigor));
        assert!(!player.learn_skill(SkillId::SeedOfVigor));
        let slot = player.skill(SkillId::SeedOfVigor).unwrap();
        assert!(slot.is_ready());
        assert!(
            player
                .skills
                .iter()
                .all(|slot| player.learned_skill_ids.contains(&slot.id))
        );
    }

    #[test]
    fn max_health_floor_is_repaid_on_raise() {
        let mut player = create_base_player("Tester");
        player.shift_max_health(-250);
        assert_eq!((player.max_health, player.health), (1, 1));
        assert_eq!(player.max_health_overdraw, 51);

        player.shift_max_health(30);
        assert_eq!(player.max_health, 1);
        player.shift_max_health(220);
        assert_eq!(player.max_health, 200);
        assert_eq!(player.max_health_overdraw, 0);
    }

    #[test]
    fn base_attack_floor_ignores_buffs() {
        let mut player = create_base_player("Tester");
        player.attack = 6;
        player.buffs.push(
            crate::state::BuffTemplate::new("Vigor", 3)
                .attack(20)
                .instantiate(crate::state::BuffId(0)),
        );
        player.attack += 20;

        player.shift_base_attack(-3, 5);
        assert_eq!(player.base_attack(), 5);
        assert_eq!(player.attack, 25);
    }

    #[test]
    fn heal_percent_clamps_at_max() {
        let mut player = create_base_player("Tester");
        player.health = 150;
        assert_eq!(player.heal_percent(0.3), 50);
        assert_eq!(player.health, 200);
    }

    #[test]
    fn heal_percent_respects_poison() {
        let mut player = create_base_player("Tester");
        player.health = 100;
        player.buffs.push(BuffInstance {
            id: crate::state::BuffId(0),
            name: "Poison".into(),
            duration: 3,
            attack_delta: None,
            defense_delta: None,
            max_health_delta: None,
            heal_modifier: Some(0.5),
            description: None,
        });
        assert_eq!(player.heal_percent(0.3), 30);
    }

    #[test]
    fn sharpened_tools_raises_crit_chance() {
        let mut player = create_base_player("Tester");
        let base = player.effective_crit_chance();
        player.grant_upgrade(UpgradeId::SharpenedTools);
        assert!((player.effective_crit_chance() - (base + 0.2)).abs() < 1e-9);
    }
}
