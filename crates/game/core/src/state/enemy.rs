//! Enemy combatant state.

use std::fmt;

/// Session-unique identifier of a spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyId(pub u64);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy-{}", self.0)
    }
}

/// Closed category of an enemy. Determines its special behavior in the
/// combat resolver; there is no per-archetype dispatch anywhere else.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Archetype {
    Normal,
    /// Steals attack.
    Goblin,
    /// Poisons (halved healing).
    Mutant,
    /// Innate damage mitigation on its own hits.
    Golem,
    /// Lowers defense.
    Shadow,
    /// Two phases plus ground slam.
    Boss,
}

impl Archetype {
    /// Archetypes eligible for a non-boss wave, in selection order.
    pub const COMMON: [Archetype; 5] = [
        Archetype::Normal,
        Archetype::Goblin,
        Archetype::Mutant,
        Archetype::Golem,
        Archetype::Shadow,
    ];

    pub fn is_boss(self) -> bool {
        matches!(self, Archetype::Boss)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemyState {
    pub id: EnemyId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Wave that spawned this enemy (>= 1).
    pub wave: u32,
    pub archetype: Archetype,
    /// Boss only: 1 or 2, never decreasing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase: Option<u8>,
}

impl EnemyState {
    pub const PHASE_ONE: u8 = 1;
    pub const PHASE_TWO: u8 = 2;

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies direct damage, never dropping below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    pub fn is_enraged(&self) -> bool {
        self.phase == Some(Self::PHASE_TWO)
    }
}
