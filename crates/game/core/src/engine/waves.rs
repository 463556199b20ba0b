//! Wave and decision orchestration.

use super::{ActionRejection, Journal};
use crate::GameConfig;
use crate::content::{
    SkillId, SkillRegistry, ancient_well, farm_upgrade, roll_archetype, spawn_enemy,
    story_chapter,
};
use crate::env::Dice;
use crate::state::{DecisionEffect, DecisionOption, GameSession, PlayerState, StatKind};

/// Spawns an enemy for the current wave and announces it.
pub fn spawn_for_wave(session: &mut GameSession, dice: &mut Dice<'_>, journal: &mut Journal) {
    let archetype = roll_archetype(session.wave, dice);
    let id = session.counters.enemy_id();
    let enemy = spawn_enemy(id, session.wave, archetype);
    journal.enemy(format!("{} emerges from the mist.", enemy.name));
    session.enemy = Some(enemy);
}

/// Rewards the kill, moves to the next wave, raises at most one decision
/// and spawns the next enemy.
pub fn advance_wave(session: &mut GameSession, dice: &mut Dice<'_>, journal: &mut Journal) {
    if let Some(fallen) = session.enemy.take() {
        journal.system(format!("{} collapses.", fallen.name));
    }
    session.wave += 1;

    let healed = session
        .player
        .heal_percent(GameConfig::WAVE_RESPITE_PERCENT);
    journal.player(format!("Wave respite restores {healed} HP."));

    let (low, high) = GameConfig::WAVE_COINS;
    let loot = dice.range(low, high) + session.wave * GameConfig::WAVE_COINS_PER_WAVE;
    session.player.coins = session.player.coins.saturating_add(loot);
    journal.reward(format!("You collect {loot} coins from the field."));

    let droppable = SkillRegistry::droppable_for(&session.player);
    if !droppable.is_empty() && dice.chance(GameConfig::SKILL_DROP_CHANCE) {
        if let Some(&skill) = dice.pick(&droppable) {
            session.player.learn_skill(skill);
            journal.reward(format!(
                "New skill unlocked: {}.",
                skill.definition().name
            ));
        }
    }

    let blueprint = if GameConfig::is_boss_wave(session.wave) {
        Some(farm_upgrade())
    } else if let Some(chapter) = story_chapter(session.wave) {
        Some(chapter)
    } else if !session.player.has_learned(SkillId::EssenceAncient)
        && dice.chance(GameConfig::ANCIENT_WELL_CHANCE)
    {
        Some(ancient_well())
    } else {
        None
    };
    if let Some(blueprint) = blueprint {
        journal.system(format!("A choice awaits: {}.", blueprint.title));
        let id = session.counters.decision_id();
        session.pending_decision = Some(blueprint.into_pending(id));
    }

    spawn_for_wave(session, dice, journal);
}

pub fn stats_summary(player: &PlayerState) -> String {
    format!(
        "Stats · HP {}/{} · ATK {} · DEF {}",
        player.health, player.max_health, player.attack, player.defense
    )
}

/// Applies the chosen option of the pending decision and clears it.
///
/// On rejection the session is left untouched.
pub fn resolve_decision(
    session: &mut GameSession,
    option_id: &str,
    journal: &mut Journal,
) -> Result<(), ActionRejection> {
    let decision = session
        .pending_decision
        .as_ref()
        .ok_or(ActionRejection::NoPendingDecision)?;
    let option = decision
        .option(option_id)
        .cloned()
        .ok_or_else(|| ActionRejection::UnknownOption {
            option_id: option_id.to_string(),
        })?;

    apply_option(&mut session.player, &option, journal);
    session.pending_decision = None;
    Ok(())
}

fn apply_option(player: &mut PlayerState, option: &DecisionOption, journal: &mut Journal) {
    for effect in &option.effects {
        match effect {
            DecisionEffect::Stat { stat, amount } => match stat {
                StatKind::Attack => {
                    player.shift_base_attack(*amount, GameConfig::PLAYER_ATTACK_FLOOR);
                }
                StatKind::Defense => player.defense += amount,
                StatKind::MaxHealth => {
                    player.health += amount;
                    player.shift_max_health(*amount);
                }
            },
            DecisionEffect::HealPercent { value } => {
                let healed = player.heal_percent(*value);
                journal.player(format!("{} restores {healed} HP.", option.label));
            }
            DecisionEffect::Coins { amount } => {
                player.coins = player.coins.saturating_add(*amount);
            }
            DecisionEffect::Upgrade { upgrade } => {
                player.grant_upgrade(*upgrade);
            }
            DecisionEffect::LearnSkill { skill } => {
                if player.learn_skill(*skill) {
                    journal.reward(format!(
                        "New skill unlocked: {}.",
                        skill.definition().name
                    ));
                }
            }
        }
    }
    journal.reward(format!("{} embraced.", option.label));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{UpgradeId, create_base_player};
    use crate::env::{FixedRng, PcgRng};
    use crate::state::{Archetype, DecisionKind, EnemyId, SessionStatus};

    fn running_session(wave: u32) -> GameSession {
        let mut session = GameSession::blank("test", 0, 11);
        session.status = SessionStatus::Running;
        session.wave = wave;
        session.player = create_base_player("Tester");
        let mut enemy = spawn_enemy(EnemyId(0), wave, Archetype::Normal);
        enemy.health = 0;
        session.enemy = Some(enemy);
        session.counters.next_enemy = 1;
        session
    }

    #[test]
    fn advance_spawns_next_wave_enemy() {
        let rng = PcgRng;
        let mut session = running_session(2);
        let mut journal = Journal::new();
        advance_wave(&mut session, &mut Dice::new(&rng, 1, 1, 2), &mut journal);

        assert_eq!(session.wave, 3);
        let enemy = session.enemy.as_ref().unwrap();
        assert_eq!(enemy.wave, 3);
        assert_eq!(enemy.id, EnemyId(1));
        assert!(session.player.coins >= 6 + 6);
    }

    #[test]
    fn boss_wave_raises_farm_upgrade() {
        let rng = PcgRng;
        let mut session = running_session(4);
        let mut journal = Journal::new();
        advance_wave(&mut session, &mut Dice::new(&rng, 5, 5, 2), &mut journal);

        let decision = session.pending_decision.as_ref().unwrap();
        assert_eq!(decision.kind, DecisionKind::FarmUpgrade);
        assert_eq!(decision.options.len(), 3);
        assert_eq!(session.enemy.as_ref().unwrap().archetype, Archetype::Boss);
    }

    #[test]
    fn lucky_roll_grants_skill_and_well() {
        let mut session = running_session(1);
        let mut journal = Journal::new();
        advance_wave(&mut session, &mut Dice::new(&FixedRng::LOW, 0, 0, 2), &mut journal);

        assert_eq!(session.player.coins, 6 + 4);
        assert!(session.player.has_learned(SkillId::ProtectiveBarrier));
        let decision = session.pending_decision.as_ref().unwrap();
        assert_eq!(decision.title, "The Ancient Well");
    }

    #[test]
    fn unlucky_roll_grants_nothing_extra() {
        let mut session = running_session(1);
        let mut journal = Journal::new();
        advance_wave(&mut session, &mut Dice::new(&FixedRng::HIGH, 0, 0, 2), &mut journal);

        assert_eq!(session.player.skills.len(), 1);
        assert!(session.pending_decision.is_none());
        assert!((6 + 4..=12 + 4).contains(&session.player.coins));
    }

    #[test]
    fn upgrade_option_is_applied_once() {
        let rng = PcgRng;
        let mut session = running_session(4);
        let mut journal = Journal::new();
        advance_wave(&mut session, &mut Dice::new(&rng, 5, 5, 2), &mut journal);

        resolve_decision(&mut session, "mystical-well", &mut journal).unwrap();
        assert!(session.pending_decision.is_none());
        assert!(session.player.has_upgrade(UpgradeId::MysticalWell));
        assert_eq!(
            resolve_decision(&mut session, "mystical-well", &mut journal),
            Err(ActionRejection::NoPendingDecision)
        );
    }

    #[test]
    fn unknown_option_leaves_decision_pending() {
        let mut session = running_session(1);
        session.pending_decision = Some(ancient_well().into_pending(Default::default()));
        let before = session.clone();
        let mut journal = Journal::new();

        let result = resolve_decision(&mut session, "nope", &mut journal);
        assert!(matches!(result, Err(ActionRejection::UnknownOption { .. })));
        assert_eq!(session, before);
        assert!(journal.is_empty());
    }

    #[test]
    fn well_teaches_the_ultimate() {
        let mut session = running_session(1);
        session.pending_decision = Some(ancient_well().into_pending(Default::default()));
        let mut journal = Journal::new();

        resolve_decision(&mut session, "draw", &mut journal).unwrap();
        assert!(session.player.has_learned(SkillId::EssenceAncient));
        assert!(session.player.skill(SkillId::EssenceAncient).is_some());
        assert_eq!(session.player.attack, 40);
    }

    #[test]
    fn attack_cut_respects_floor_under_buffs() {
        let mut player = create_base_player("Tester");
        let mut journal = Journal::new();
        player.attack = 12;
        super::super::buffs::apply_buff(
            &mut player,
            &crate::content::SEED_OF_VIGOR,
            crate::state::BuffId(0),
        );
        let option = DecisionOption {
            id: "x".into(),
            label: "X".into(),
            summary: String::new(),
            effects: vec![DecisionEffect::Stat {
                stat: StatKind::Attack,
                amount: -10,
            }],
        };
        apply_option(&mut player, &option, &mut journal);
        assert_eq!(player.attack, 25);

        for _ in 0..3 {
            super::super::buffs::tick_buffs(&mut player, &mut journal);
        }
        assert_eq!(player.attack, GameConfig::PLAYER_ATTACK_FLOOR);
    }

    #[test]
    fn max_health_loss_clamps_current_health() {
        let mut player = create_base_player("Tester");
        let option = DecisionOption {
            id: "x".into(),
            label: "X".into(),
            summary: String::new(),
            effects: vec![DecisionEffect::Stat {
                stat: StatKind::MaxHealth,
                amount: -40,
            }],
        };
        apply_option(&mut player, &option, &mut Journal::new());
        assert_eq!(player.max_health, 160);
        assert_eq!(player.health, 160);
    }
}
