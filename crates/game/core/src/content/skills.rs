//! Static skill registry.
//!
//! Skills are a closed set. Each definition carries a plain `fn` effect that
//! reads the combatants and returns updated copies; it never touches the
//! session directly. Buffs requested by an effect are applied afterwards by
//! the buff ledger so that their deltas are accounted for in one place.

use crate::state::{BuffTemplate, EnemyState, PlayerState};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum SkillId {
    FertilizingStrike,
    ProtectiveBarrier,
    SeedOfVigor,
    EssenceAncient,
}

impl SkillId {
    pub fn definition(self) -> &'static SkillDefinition {
        SkillRegistry::get(self)
    }
}

/// Read-only inputs of a skill effect.
#[derive(Clone, Copy, Debug)]
pub struct SkillContext<'a> {
    pub player: &'a PlayerState,
    pub enemy: &'a EnemyState,
}

/// Result of a skill effect: updated combatants plus side requests.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillOutcome {
    pub player: PlayerState,
    pub enemy: EnemyState,
    pub logs: Vec<String>,
    /// Applied to the player through the buff ledger after the effect.
    pub buffs: Vec<BuffTemplate>,
    /// Suppresses the enemy counter-turn. No shipped skill sets it.
    pub skip_enemy_turn: bool,
}

impl SkillOutcome {
    fn from_context(ctx: &SkillContext<'_>) -> Self {
        Self {
            player: ctx.player.clone(),
            enemy: ctx.enemy.clone(),
            logs: Vec::new(),
            buffs: Vec::new(),
            skip_enemy_turn: false,
        }
    }
}

pub type SkillEffect = fn(&SkillContext<'_>) -> SkillOutcome;

#[derive(Clone, Copy)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub cooldown: u32,
    /// Ultimates never drop after a wave; they are unlocked by rare events.
    pub ultimate: bool,
    pub effect: SkillEffect,
}

impl SkillDefinition {
    pub fn execute(&self, ctx: &SkillContext<'_>) -> SkillOutcome {
        (self.effect)(ctx)
    }
}

impl std::fmt::Debug for SkillDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillDefinition")
            .field("id", &self.id)
            .field("cooldown", &self.cooldown)
            .field("ultimate", &self.ultimate)
            .finish_non_exhaustive()
    }
}

pub const PROTECTIVE_BARRIER: BuffTemplate = BuffTemplate::new("Protective Barrier", 3)
    .defense(15)
    .description("Swirling vines deflect incoming blows.");

pub const SEED_OF_VIGOR: BuffTemplate = BuffTemplate::new("Seed of Vigor", 3)
    .attack(20)
    .description("You feel sap coursing through your grip.");

fn scaled(attack: i32, factor: f64) -> i32 {
    (attack as f64 * factor).round() as i32
}

fn fertilizing_strike(ctx: &SkillContext<'_>) -> SkillOutcome {
    let mut out = SkillOutcome::from_context(ctx);
    let damage = scaled(out.player.attack, 1.2);
    out.enemy.take_damage(damage);
    let healed = out.player.heal_percent(0.1);
    out.logs.push(format!(
        "You strike {} for {damage} and nurture yourself for {healed}.",
        out.enemy.name
    ));
    out
}

fn protective_barrier(ctx: &SkillContext<'_>) -> SkillOutcome {
    let mut out = SkillOutcome::from_context(ctx);
    out.buffs.push(PROTECTIVE_BARRIER);
    out.logs
        .push("Vines weave into a barrier, bolstering your defenses.".to_string());
    out
}

fn seed_of_vigor(ctx: &SkillContext<'_>) -> SkillOutcome {
    let mut out = SkillOutcome::from_context(ctx);
    let damage = scaled(out.player.attack, 0.5);
    out.enemy.take_damage(damage);
    out.buffs.push(SEED_OF_VIGOR);
    out.logs.push(format!(
        "You plant a radiant seed, gaining focus and shaving {damage} HP from {}.",
        out.enemy.name
    ));
    out
}

fn essence_ancient(ctx: &SkillContext<'_>) -> SkillOutcome {
    let mut out = SkillOutcome::from_context(ctx);
    let healed = out.player.heal_percent(0.2);
    let damage = scaled(out.player.attack, 2.0);
    out.enemy.take_damage(damage);
    out.logs.push(format!(
        "Ancient roots surge through you. You restore {healed} HP and blast {} for {damage}.",
        out.enemy.name
    ));
    out
}

static SKILLS: [SkillDefinition; 4] = [
    SkillDefinition {
        id: SkillId::FertilizingStrike,
        name: "Fertilizing Strike",
        description: "Deal 120% damage and heal for 10% of max HP.",
        cooldown: 3,
        ultimate: false,
        effect: fertilizing_strike,
    },
    SkillDefinition {
        id: SkillId::ProtectiveBarrier,
        name: "Protective Barrier",
        description: "Gain +15 defense for 3 turns.",
        cooldown: 4,
        ultimate: false,
        effect: protective_barrier,
    },
    SkillDefinition {
        id: SkillId::SeedOfVigor,
        name: "Seed of Vigor",
        description: "Gain +20 attack for 3 turns and deal chip damage.",
        cooldown: 5,
        ultimate: false,
        effect: seed_of_vigor,
    },
    SkillDefinition {
        id: SkillId::EssenceAncient,
        name: "Essence of the Ancient Farm",
        description: "Heal 20% max HP and deal 200% damage.",
        cooldown: 8,
        ultimate: true,
        effect: essence_ancient,
    },
];

/// Immutable lookup over the skill table.
pub struct SkillRegistry;

impl SkillRegistry {
    pub fn all() -> &'static [SkillDefinition] {
        &SKILLS
    }

    pub fn get(id: SkillId) -> &'static SkillDefinition {
        // Table order follows the enum discriminants.
        &SKILLS[id as usize]
    }

    /// Parses an external skill id such as `"seed-of-vigor"`.
    pub fn lookup(raw: &str) -> Option<&'static SkillDefinition> {
        raw.parse::<SkillId>().ok().map(Self::get)
    }

    /// Skills eligible for the post-wave drop, in table order.
    pub fn droppable_for(player: &PlayerState) -> Vec<SkillId> {
        SKILLS
            .iter()
            .filter(|def| !def.ultimate && !player.has_learned(def.id))
            .map(|def| def.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{create_base_player, spawn_enemy};
    use crate::state::{Archetype, EnemyId};
    use strum::IntoEnumIterator;

    #[test]
    fn registry_is_indexed_by_id() {
        for id in SkillId::iter() {
            assert_eq!(SkillRegistry::get(id).id, id);
        }
    }

    #[test]
    fn lookup_parses_kebab_case() {
        let def = SkillRegistry::lookup("essence-ancient").unwrap();
        assert_eq!(def.id, SkillId::EssenceAncient);
        assert!(def.ultimate);
        assert!(SkillRegistry::lookup("fireball").is_none());
    }

    #[test]
    fn fertilizing_strike_ignores_defense_and_heals() {
        let mut player = create_base_player("Tester");
        player.health = 100;
        let enemy = spawn_enemy(EnemyId(0), 1, Archetype::Normal);
        let before_player = player.clone();
        let before_enemy = enemy.clone();

        let outcome = SkillId::FertilizingStrike.definition().execute(&SkillContext {
            player: &player,
            enemy: &enemy,
        });

        assert_eq!(outcome.enemy.health, enemy.health - 36);
        assert_eq!(outcome.player.health, 120);
        assert_eq!(player, before_player);
        assert_eq!(enemy, before_enemy);
    }

    #[test]
    fn seed_of_vigor_chips_with_pre_buff_attack() {
        let player = create_base_player("Tester");
        let enemy = spawn_enemy(EnemyId(0), 1, Archetype::Normal);
        let outcome = SkillId::SeedOfVigor.definition().execute(&SkillContext {
            player: &player,
            enemy: &enemy,
        });
        assert_eq!(outcome.enemy.health, enemy.health - 15);
        assert_eq!(outcome.player.attack, player.attack);
        assert_eq!(outcome.buffs, vec![SEED_OF_VIGOR]);
    }

    #[test]
    fn ultimate_never_drops() {
        let player = create_base_player("Tester");
        let drops = SkillRegistry::droppable_for(&player);
        assert_eq!(drops, vec![SkillId::ProtectiveBarrier, SkillId::SeedOfVigor]);
    }
}
