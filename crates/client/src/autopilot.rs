//! Rule-based [`ActionProvider`] that plays the saga unattended.
use async_trait::async_trait;
use saga_core::{GameSession, PlayerAction, SkillRegistry};
use saga_runtime::{ActionProvider, Result};

/// Picks the first option of any pending decision, heals when health drops
/// below `heal_threshold` of max, fires a ready skill (ultimates first), and
/// otherwise attacks.
#[derive(Clone, Copy, Debug)]
pub struct Autopilot {
    pub heal_threshold: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            heal_threshold: 0.35,
        }
    }
}

impl Autopilot {
    pub fn choose(&self, session: &GameSession) -> PlayerAction {
        if let Some(decision) = &session.pending_decision
            && let Some(option) = decision.options.first()
        {
            return PlayerAction::decision(option.id.clone());
        }

        let player = &session.player;
        if f64::from(player.health) < f64::from(player.max_health) * self.heal_threshold {
            return PlayerAction::Heal;
        }

        let ready = player
            .skills
            .iter()
            .filter(|slot| slot.is_ready())
            .map(|slot| SkillRegistry::get(slot.id))
            .max_by_key(|definition| definition.ultimate);
        match ready {
            Some(definition) => PlayerAction::skill(definition.id),
            None => PlayerAction::Attack,
        }
    }
}

#[async_trait]
impl ActionProvider for Autopilot {
    async fn provide_action(&self, session: &GameSession) -> Result<PlayerAction> {
        Ok(self.choose(session))
    }
}

#[cfg(test)]
mod tests {
    use saga_core::{
        FixedClock, GameConfig, GameEngine, GameEnv, PcgRng, SkillId, SkillInstance,
    };

    use super::*;

    fn started() -> GameSession {
        let config = GameConfig::default();
        let clock = FixedClock(0);
        GameEngine::new(GameEnv::new(&PcgRng, &clock), &config).new_session("auto", 3, "Ada")
    }

    #[test]
    fn uses_ready_skill_then_attacks() {
        let mut session = started();
        assert_eq!(
            Autopilot::default().choose(&session),
            PlayerAction::skill(SkillId::FertilizingStrike)
        );

        session.player.skills[0].remaining_cooldown = 2;
        assert_eq!(Autopilot::default().choose(&session), PlayerAction::Attack);
    }

    #[test]
    fn prefers_the_ultimate() {
        let mut session = started();
        session.player.learn_skill(SkillId::EssenceAncient);
        assert!(session.player.skills.contains(&SkillInstance::ready(SkillId::EssenceAncient)));

        assert_eq!(
            Autopilot::default().choose(&session),
            PlayerAction::skill(SkillId::EssenceAncient)
        );
    }

    #[test]
    fn heals_when_low() {
        let mut session = started();
        session.player.health = 40;
        assert_eq!(Autopilot::default().choose(&session), PlayerAction::Heal);
    }

    #[test]
    fn resolves_decisions_first() {
        let mut session = started();
        session.player.health = 1;
        session.pending_decision =
            Some(saga_core::content::ancient_well().into_pending(Default::default()));
        assert_eq!(
            Autopilot::default().choose(&session),
            PlayerAction::decision("draw")
        );
    }
}
