//! Entity factories.

use super::SkillId;
use crate::GameConfig;
use crate::env::Dice;
use crate::state::{Archetype, EnemyId, EnemyState, PlayerState, SkillInstance};

/// Fresh player at the baseline stats with Fertilizing Strike equipped.
pub fn create_base_player(name: &str) -> PlayerState {
    PlayerState {
        name: name.to_string(),
        health: GameConfig::PLAYER_HEALTH,
        max_health: GameConfig::PLAYER_HEALTH,
        attack: GameConfig::PLAYER_ATTACK,
        defense: GameConfig::PLAYER_DEFENSE,
        coins: 0,
        mana: GameConfig::PLAYER_MANA,
        skills: vec![SkillInstance::ready(SkillId::FertilizingStrike)],
        learned_skill_ids: vec![SkillId::FertilizingStrike],
        buffs: Vec::new(),
        upgrades: Vec::new(),
        crit_chance: GameConfig::PLAYER_CRIT_CHANCE,
        crit_multiplier: GameConfig::PLAYER_CRIT_MULTIPLIER,
        regen_percent: GameConfig::PLAYER_REGEN,
        max_health_overdraw: 0,
    }
}

/// Boss on every boss wave, otherwise a uniform pick among the commons.
pub fn roll_archetype(wave: u32, dice: &mut Dice<'_>) -> Archetype {
    if GameConfig::is_boss_wave(wave) {
        return Archetype::Boss;
    }
    dice.pick(&Archetype::COMMON)
        .copied()
        .unwrap_or(Archetype::Normal)
}

pub fn enemy_name(archetype: Archetype, wave: u32) -> String {
    match archetype {
        Archetype::Normal => format!("Wild Invader {wave}"),
        Archetype::Goblin => format!("Goblin Scavenger {wave}"),
        Archetype::Mutant => format!("Mutant Pest {wave}"),
        Archetype::Golem => format!("Rock Golem {wave}"),
        Archetype::Shadow => format!("Shadow Stalker {wave}"),
        Archetype::Boss => format!("Abomination of Wave {wave}"),
    }
}

fn scale((base, per_wave): (i32, i32), wave: u32) -> i32 {
    base + per_wave * wave as i32
}

fn boost(value: i32, multiplier: f64) -> i32 {
    (value as f64 * multiplier).round() as i32
}

/// Builds an enemy of `archetype` scaled to `wave`.
pub fn spawn_enemy(id: EnemyId, wave: u32, archetype: Archetype) -> EnemyState {
    let wave = wave.max(1);
    let mut health = scale(GameConfig::ENEMY_HEALTH, wave);
    let mut attack = scale(GameConfig::ENEMY_ATTACK, wave);
    let mut defense = scale(GameConfig::ENEMY_DEFENSE, wave);
    let mut phase = None;

    if archetype.is_boss() {
        health = boost(health, GameConfig::BOSS_HEALTH_MULTIPLIER);
        attack = boost(attack, GameConfig::BOSS_ATTACK_MULTIPLIER);
        defense = boost(defense, GameConfig::BOSS_DEFENSE_MULTIPLIER);
        phase = Some(EnemyState::PHASE_ONE);
    }

    EnemyState {
        id,
        name: enemy_name(archetype, wave),
        health,
        max_health: health,
        attack,
        defense,
        wave,
        archetype,
        phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, PcgRng};

    #[test]
    fn enemy_stats_scale_linearly() {
        let enemy = spawn_enemy(EnemyId(1), 3, Archetype::Golem);
        assert_eq!(enemy.max_health, 122);
        assert_eq!(enemy.health, 122);
        assert_eq!(enemy.attack, 22);
        assert_eq!(enemy.defense, 8);
        assert_eq!(enemy.name, "Rock Golem 3");
        assert_eq!(enemy.phase, None);
    }

    #[test]
    fn boss_is_rescaled_and_starts_in_phase_one() {
        let boss = spawn_enemy(EnemyId(1), 5, Archetype::Boss);
        assert_eq!(boss.max_health, 270);
        assert_eq!(boss.attack, 48);
        assert_eq!(boss.defense, 14);
        assert_eq!(boss.phase, Some(EnemyState::PHASE_ONE));
        assert_eq!(boss.name, "Abomination of Wave 5");
    }

    #[test]
    fn boss_waves_always_roll_boss() {
        let rng = PcgRng;
        for wave in [5, 10, 15, 20] {
            let mut dice = Dice::new(&rng, 99, wave as u64, 0);
            assert_eq!(roll_archetype(wave, &mut dice), Archetype::Boss);
        }
        let mut dice = Dice::new(&FixedRng::LOW, 0, 0, 0);
        assert_eq!(roll_archetype(4, &mut dice), Archetype::Normal);
    }

    #[test]
    fn base_player_matches_baseline() {
        let player = create_base_player("Green Acres");
        assert_eq!(player.health, 200);
        assert_eq!(player.attack, 30);
        assert_eq!(player.defense, 20);
        assert_eq!(player.learned_skill_ids, vec![SkillId::FertilizingStrike]);
        assert!(player.upgrades.is_empty());
    }
}
