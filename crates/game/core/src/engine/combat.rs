//! Combat resolver.
//!
//! All archetype behavior lives in [`enemy_turn`]; there is no other
//! per-archetype dispatch in the engine.

use super::{Journal, buffs};
use crate::GameConfig;
use crate::env::Dice;
use crate::state::{
    Archetype, BuffTemplate, EnemyState, PlayerState, SessionCounters,
};

pub const POISON: BuffTemplate = BuffTemplate::new("Poison", 3)
    .heal_modifier(0.5)
    .description("Healing reduced.");

pub const VULNERABLE: BuffTemplate = BuffTemplate::new("Vulnerable", 2).defense(-10);

/// `max(1, round(attack × variance × crit) − defense)`.
///
/// `crit_multiplier` is `1.0` for a normal hit.
pub fn player_damage(attack: i32, variance: f64, crit_multiplier: f64, defense: i32) -> i32 {
    let raw = (attack as f64 * variance * crit_multiplier).round() as i32;
    (raw - defense).max(1)
}

/// `max(1, round(attack × variance) − defense)`.
pub fn enemy_damage(attack: i32, variance: f64, defense: i32) -> i32 {
    let raw = (attack as f64 * variance).round() as i32;
    (raw - defense).max(1)
}

/// Innate golem mitigation, still floored at 1.
pub fn golem_mitigation(damage: i32) -> i32 {
    ((damage as f64 * GameConfig::GOLEM_MITIGATION).round() as i32).max(1)
}

/// Resolves the player's basic attack. Returns the damage dealt.
pub fn player_attack(
    player: &PlayerState,
    enemy: &mut EnemyState,
    dice: &mut Dice<'_>,
    journal: &mut Journal,
) -> i32 {
    let (low, high) = GameConfig::PLAYER_VARIANCE;
    let variance = dice.variance(low, high);
    let crit = dice.chance(player.effective_crit_chance());
    let multiplier = if crit { player.crit_multiplier } else { 1.0 };

    let damage = player_damage(player.attack, variance, multiplier, enemy.defense);
    enemy.take_damage(damage);
    if crit {
        journal.player("Critical hit!");
    }
    journal.player(format!("You strike {} for {damage}.", enemy.name));
    damage
}

/// Resolves the enemy's counter-attack, including archetype effects.
/// Returns the damage of the standard hit.
pub fn enemy_turn(
    player: &mut PlayerState,
    enemy: &mut EnemyState,
    counters: &mut SessionCounters,
    dice: &mut Dice<'_>,
    journal: &mut Journal,
) -> i32 {
    let (low, high) = GameConfig::ENEMY_VARIANCE;
    let variance = dice.variance(low, high);

    match enemy.archetype {
        Archetype::Normal => {}
        Archetype::Goblin => {
            if dice.chance(GameConfig::GOBLIN_STEAL_CHANCE) {
                let steal =
                    (player.attack as f64 * GameConfig::GOBLIN_STEAL_FRACTION).round() as i32;
                player.shift_base_attack(-steal, GameConfig::PLAYER_ATTACK_FLOOR);
                journal.enemy("Goblin steals some of your strength!");
            }
        }
        Archetype::Mutant => {
            if dice.chance(GameConfig::MUTANT_POISON_CHANCE) {
                buffs::apply_buff(player, &POISON, counters.buff_id());
                journal.enemy("Toxic spores cling to you. Healing halved.");
            }
        }
        Archetype::Golem => {
            journal.enemy("Golem's stone hide dulls its blow, but it keeps marching.");
        }
        Archetype::Shadow => {
            if dice.chance(GameConfig::SHADOW_VULNERABLE_CHANCE) {
                buffs::apply_buff(player, &VULNERABLE, counters.buff_id());
                journal.enemy("Shadows slip past your guard. Defense reduced.");
            }
        }
        Archetype::Boss => {
            let threshold = enemy.max_health as f64 * GameConfig::BOSS_ENRAGE_THRESHOLD;
            if !enemy.is_enraged() && (enemy.health as f64) < threshold {
                enemy.phase = Some(EnemyState::PHASE_TWO);
                enemy.attack =
                    (enemy.attack as f64 * GameConfig::BOSS_ENRAGE_ATTACK).round() as i32;
                enemy.defense =
                    (enemy.defense as f64 * GameConfig::BOSS_ENRAGE_DEFENSE).round() as i32;
                journal.enemy("The Abomination mutates into a fiercer form!");
            }
            if dice.chance(GameConfig::BOSS_SLAM_CHANCE) {
                let slam =
                    (player.max_health as f64 * GameConfig::BOSS_SLAM_FRACTION).round() as i32;
                player.health = (player.health - slam).max(0);
                journal.enemy(format!("The Abomination unleashes a ground smash for {slam}!"));
            }
        }
    }

    // Archetype effects land before the hit, so a fresh Vulnerable already
    // weakens it.
    let mut damage = enemy_damage(enemy.attack, variance, player.defense);
    if enemy.archetype == Archetype::Golem {
        damage = golem_mitigation(damage);
    }
    player.health -= damage;
    player.clamp_health();
    journal.enemy(format!("{} hits you for {damage}.", enemy.name));
    damage
}
