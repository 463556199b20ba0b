use super::{ActionRejection, Journal, Transition, buffs, combat, waves};
use crate::GameConfig;
use crate::action::PlayerAction;
use crate::content::{SkillContext, SkillDefinition, SkillId, SkillRegistry};
use crate::env::{Dice, GameEnv};
use crate::state::{GameSession, PlayerState, SessionStatus};

/// Independent roll sequences within one reduction.
mod stream {
    pub const PLAYER: u32 = 0;
    pub const ENEMY: u32 = 1;
    pub const WAVE: u32 = 2;
}

/// One reduction over a private copy of the session.
pub struct SessionReducer<'a> {
    env: GameEnv<'a>,
    config: &'a GameConfig,
    next: GameSession,
    journal: Journal,
}

impl<'a> SessionReducer<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a GameConfig, session: &GameSession) -> Self {
        Self {
            env,
            config,
            next: session.clone(),
            journal: Journal::new(),
        }
    }

    fn dice(&self, stream: u32) -> Dice<'a> {
        Dice::new(self.env.rng, self.next.seed, self.next.nonce, stream)
    }

    /// Commits the journal and closes an accepted action.
    fn finish(mut self) -> Transition {
        let now = self.env.clock.now_millis();
        self.journal
            .commit(&mut self.next, now, self.config.log_capacity);
        self.next.nonce = self.next.nonce.wrapping_add(1);
        Transition::accepted(self.next)
    }

    /// Leaves the snapshot untouched apart from the rejection line.
    fn reject(mut self, rejection: ActionRejection) -> Transition {
        if rejection.logs() {
            let mut journal = Journal::new();
            journal.system(rejection.to_string());
            let now = self.env.clock.now_millis();
            journal.commit(&mut self.next, now, self.config.log_capacity);
        }
        Transition::rejected(self.next, rejection)
    }

    pub fn start(mut self, name: &str) -> Transition {
        if self.next.status != SessionStatus::Idle {
            return self.reject(ActionRejection::AlreadyStarted);
        }

        let name = match name.trim() {
            "" => self.config.default_player_name.clone(),
            trimmed => trimmed.to_string(),
        };
        self.next.player = crate::content::create_base_player(&name);
        self.next.status = SessionStatus::Running;

        let mut dice = self.dice(stream::WAVE);
        waves::spawn_for_wave(&mut self.next, &mut dice, &mut self.journal);
        self.journal
            .system(format!("Season begins. Defend {name}'s land!"));
        self.finish()
    }

    pub fn dispatch(self, action: &PlayerAction) -> Transition {
        if self.next.status != SessionStatus::Running {
            return self.reject(ActionRejection::SessionNotRunning);
        }
        if let Some(decision) = &self.next.pending_decision {
            if action.is_combat() {
                let title = decision.title.clone();
                return self.reject(ActionRejection::DecisionPending { title });
            }
        }

        match action {
            PlayerAction::Decision { option_id } => self.decide(option_id),
            PlayerAction::Skill { skill_id } => match validate_skill(&self.next.player, skill_id) {
                Ok(definition) => self.combat_turn(action, Some(definition)),
                Err(rejection) => self.reject(rejection),
            },
            _ => self.combat_turn(action, None),
        }
    }

    fn decide(mut self, option_id: &str) -> Transition {
        match waves::resolve_decision(&mut self.next, option_id, &mut self.journal) {
            Ok(()) => {
                self.next.turn += 1;
                self.finish()
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    /// Player action, then either wave advance or enemy counter-turn, then
    /// end-of-turn ticking unless the player fell.
    fn combat_turn(
        mut self,
        action: &PlayerAction,
        skill: Option<&'static SkillDefinition>,
    ) -> Transition {
        self.next.turn += 1;
        if self.next.enemy.is_none() {
            let mut dice = self.dice(stream::WAVE);
            waves::spawn_for_wave(&mut self.next, &mut dice, &mut self.journal);
        }

        let mut player_dice = self.dice(stream::PLAYER);
        let mut skip_enemy_turn = false;
        let session = &mut self.next;
        let journal = &mut self.journal;
        let Some(enemy) = session.enemy.as_mut() else {
            return self.finish();
        };

        match (action, skill) {
            (PlayerAction::Attack, _) => {
                combat::player_attack(&session.player, enemy, &mut player_dice, journal);
            }
            (PlayerAction::Heal, _) => {
                let healed = session
                    .player
                    .heal_percent(GameConfig::HEAL_ACTION_PERCENT);
                journal.player(format!("You focus and breathe restores {healed} HP."));
            }
            (PlayerAction::Skill { .. }, Some(definition)) => {
                let outcome = definition.execute(&SkillContext {
                    player: &session.player,
                    enemy,
                });
                session.player = outcome.player;
                *enemy = outcome.enemy;
                for line in outcome.logs {
                    journal.player(line);
                }
                for template in &outcome.buffs {
                    let id = session.counters.buff_id();
                    buffs::apply_buff(&mut session.player, template, id);
                }
                if let Some(slot) = session.player.skill_mut(definition.id) {
                    slot.remaining_cooldown = definition.cooldown;
                }
                skip_enemy_turn = outcome.skip_enemy_turn;
            }
            _ => journal.player("You hold your ground, studying the foe."),
        }

        let enemy_fell = !enemy.is_alive();
        if enemy_fell {
            let mut dice = self.dice(stream::WAVE);
            waves::advance_wave(&mut self.next, &mut dice, &mut self.journal);
        } else if !skip_enemy_turn {
            let mut dice = self.dice(stream::ENEMY);
            let session = &mut self.next;
            if let Some(enemy) = session.enemy.as_mut() {
                combat::enemy_turn(
                    &mut session.player,
                    enemy,
                    &mut session.counters,
                    &mut dice,
                    &mut self.journal,
                );
            }
            if !session.player.is_alive() {
                session.status = SessionStatus::Defeat;
                self.journal.system("You fall defending the fields...");
                return self.finish();
            }
        }

        end_of_turn(
            &mut self.next.player,
            skill.map(|definition| definition.id),
            &mut self.journal,
        );
        if enemy_fell {
            self.journal.system(waves::stats_summary(&self.next.player));
        }
        self.finish()
    }
}

fn validate_skill(
    player: &PlayerState,
    raw: &str,
) -> Result<&'static SkillDefinition, ActionRejection> {
    let definition = SkillRegistry::lookup(raw).ok_or_else(|| ActionRejection::UnknownSkill {
        skill_id: raw.to_string(),
    })?;
    let slot = player
        .skill(definition.id)
        .ok_or_else(|| ActionRejection::SkillNotLearned {
            name: definition.name.to_string(),
        })?;
    if !slot.is_ready() {
        return Err(ActionRejection::SkillOnCooldown {
            name: definition.name.to_string(),
            remaining: slot.remaining_cooldown,
        });
    }
    Ok(definition)
}

/// Buffs, then cooldowns (sparing the skill used this turn), then regen.
fn end_of_turn(player: &mut PlayerState, used: Option<SkillId>, journal: &mut Journal) {
    buffs::tick_buffs(player, journal);

    let recovery = player.cooldown_recovery();
    for slot in &mut player.skills {
        if Some(slot.id) != used {
            slot.remaining_cooldown = slot.remaining_cooldown.saturating_sub(recovery);
        }
    }

    let regen = player.effective_regen();
    if regen > 0.0 {
        let gained = player.heal_percent(regen);
        if gained > 0 {
            journal.reward(format!("Regeneration restores {gained} HP."));
        }
    }
}
