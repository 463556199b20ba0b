//! Player-issued actions accepted by the session reducer.

use crate::content::SkillId;

/// Tagged action sent by the presentation layer.
///
/// Skill and option ids stay raw strings: unknown ids are a recoverable
/// rejection reported in the log, not a decode failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")
)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerAction {
    Attack,
    Heal,
    Skip,
    Skill { skill_id: String },
    Decision { option_id: String },
}

impl PlayerAction {
    pub fn skill(skill: SkillId) -> Self {
        PlayerAction::Skill {
            skill_id: skill.to_string(),
        }
    }

    pub fn decision(option_id: impl Into<String>) -> Self {
        PlayerAction::Decision {
            option_id: option_id.into(),
        }
    }

    /// Whether the action is a combat action (resolves an enemy turn).
    pub fn is_combat(&self) -> bool {
        !matches!(self, PlayerAction::Decision { .. })
    }
}
