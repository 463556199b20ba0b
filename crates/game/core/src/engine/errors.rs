//! Rejected actions.
//!
//! A rejection is never fatal: the reducer hands back the unchanged snapshot
//! (plus at most one log line) together with the reason.

/// Why an action was not applied.
///
/// The `Display` text is the line appended to the session log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum ActionRejection {
    #[error("the session is not running")]
    SessionNotRunning,

    #[error("The season has already begun.")]
    AlreadyStarted,

    #[error("Resolve \"{title}\" before acting.")]
    DecisionPending { title: String },

    #[error("There is no decision to make.")]
    NoPendingDecision,

    #[error("Unknown skill: {skill_id}.")]
    UnknownSkill { skill_id: String },

    #[error("You have not learned {name}.")]
    SkillNotLearned { name: String },

    #[error("{name} is not ready ({remaining} turns left).")]
    SkillOnCooldown { name: String, remaining: u32 },

    #[error("Unknown option: {option_id}.")]
    UnknownOption { option_id: String },
}

impl ActionRejection {
    /// Whether the rejection is reported in the session log. Idle and
    /// terminal sessions stay byte-for-byte unchanged.
    pub fn logs(&self) -> bool {
        !matches!(
            self,
            ActionRejection::SessionNotRunning | ActionRejection::AlreadyStarted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_message_names_skill_and_turns() {
        let rejection = ActionRejection::SkillOnCooldown {
            name: "Seed of Vigor".into(),
            remaining: 2,
        };
        assert_eq!(
            rejection.to_string(),
            "Seed of Vigor is not ready (2 turns left)."
        );
        assert!(rejection.logs());
        assert!(!ActionRejection::SessionNotRunning.logs());
    }
}
