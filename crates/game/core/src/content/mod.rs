//! Static game content: skill registry, upgrade menu, story decisions and
//! entity factories. Everything here is immutable data or a pure
//! constructor.
mod factory;
mod skills;
mod story;
mod upgrades;

pub use factory::{create_base_player, enemy_name, roll_archetype, spawn_enemy};
pub use skills::{
    PROTECTIVE_BARRIER, SEED_OF_VIGOR, SkillContext, SkillDefinition, SkillEffect, SkillId,
    SkillOutcome, SkillRegistry,
};
pub use story::{DecisionBlueprint, ancient_well, farm_upgrade, story_chapter};
pub use upgrades::{UpgradeId, farm_upgrade_options};
