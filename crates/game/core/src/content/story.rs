//! Narrative decisions: story arcs on fixed waves and the Ancient Well.

use super::{SkillId, farm_upgrade_options};
use crate::state::{
    DecisionEffect, DecisionId, DecisionKind, DecisionOption, PendingDecision, StatKind,
};

/// A decision before it receives a session-unique id.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionBlueprint {
    pub kind: DecisionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub options: Vec<DecisionOption>,
}

impl DecisionBlueprint {
    pub fn into_pending(self, id: DecisionId) -> PendingDecision {
        PendingDecision {
            id,
            kind: self.kind,
            title: self.title.to_string(),
            description: Some(self.description.to_string()),
            options: self.options,
        }
    }
}

fn option(id: &str, label: &str, summary: &str, effects: Vec<DecisionEffect>) -> DecisionOption {
    DecisionOption {
        id: id.to_string(),
        label: label.to_string(),
        summary: summary.to_string(),
        effects,
    }
}

fn stat(stat: StatKind, amount: i32) -> DecisionEffect {
    DecisionEffect::Stat { stat, amount }
}

pub fn farm_upgrade() -> DecisionBlueprint {
    DecisionBlueprint {
        kind: DecisionKind::FarmUpgrade,
        title: "Choose a permanent farm upgrade",
        description: "The land remembers your deeds.",
        options: farm_upgrade_options(),
    }
}

/// Story arc raised on `wave`, if any.
pub fn story_chapter(wave: u32) -> Option<DecisionBlueprint> {
    let chapter = match wave {
        8 => DecisionBlueprint {
            kind: DecisionKind::StoryChoice,
            title: "Defend or Strike Back",
            description: "You uncover the truth behind the blight.",
            options: vec![
                option(
                    "defend",
                    "Defend the land",
                    "+20 defense and heal 75% of max HP",
                    vec![
                        stat(StatKind::Defense, 20),
                        DecisionEffect::HealPercent { value: 0.75 },
                    ],
                ),
                option(
                    "strike-back",
                    "Strike back",
                    "+25 attack",
                    vec![stat(StatKind::Attack, 25)],
                ),
            ],
        },
        13 => DecisionBlueprint {
            kind: DecisionKind::StoryChoice,
            title: "Knowledge or Strength",
            description: "Whispers of a hidden power echo through the fields.",
            options: vec![
                option(
                    "knowledge",
                    "Seek knowledge",
                    "+30 max HP",
                    vec![stat(StatKind::MaxHealth, 30)],
                ),
                option(
                    "strength",
                    "Seek strength",
                    "+25 attack",
                    vec![stat(StatKind::Attack, 25)],
                ),
            ],
        },
        18 => DecisionBlueprint {
            kind: DecisionKind::StoryChoice,
            title: "The Omen's Sacrifice",
            description: "The sky darkens. A terrible omen demands a sacrifice.",
            options: vec![
                option(
                    "sacrifice-vitality",
                    "Sacrifice vitality",
                    "-40 max HP, +40 attack",
                    vec![stat(StatKind::MaxHealth, -40), stat(StatKind::Attack, 40)],
                ),
                option(
                    "defensive-aura",
                    "Defensive aura",
                    "-10 attack, +100 max HP, full heal",
                    vec![
                        stat(StatKind::Attack, -10),
                        stat(StatKind::MaxHealth, 100),
                        DecisionEffect::HealPercent { value: 1.0 },
                    ],
                ),
            ],
        },
        23 => DecisionBlueprint {
            kind: DecisionKind::StoryChoice,
            title: "The Neighbor's Plea",
            description: "A neighboring village is under siege.",
            options: vec![
                option(
                    "risk-all",
                    "Risk all",
                    "+15 attack, -20 max HP, +40 coins",
                    vec![
                        stat(StatKind::Attack, 15),
                        stat(StatKind::MaxHealth, -20),
                        DecisionEffect::Coins { amount: 40 },
                    ],
                ),
                option(
                    "protect-own",
                    "Protect your own",
                    "+20 max HP",
                    vec![stat(StatKind::MaxHealth, 20)],
                ),
            ],
        },
        _ => return None,
    };
    Some(chapter)
}

pub fn ancient_well() -> DecisionBlueprint {
    DecisionBlueprint {
        kind: DecisionKind::StoryChoice,
        title: "The Ancient Well",
        description: "A forgotten well hums beneath the orchard.",
        options: vec![
            option(
                "draw",
                "Draw from the well",
                "Learn Essence of the Ancient Farm, +10 attack",
                vec![
                    DecisionEffect::LearnSkill {
                        skill: SkillId::EssenceAncient,
                    },
                    stat(StatKind::Attack, 10),
                ],
            ),
            option(
                "leave",
                "Leave it be",
                "+25 coins",
                vec![DecisionEffect::Coins { amount: 25 }],
            ),
        ],
    }
}
