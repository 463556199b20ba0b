//! Timed, reversible stat modifiers.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BuffId(pub u64);

impl fmt::Display for BuffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buff-{}", self.0)
    }
}

/// An active buff or debuff on the player.
///
/// The deltas were folded into the player's totals when the buff was applied
/// and are subtracted verbatim when `duration` reaches zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuffInstance {
    pub id: BuffId,
    pub name: String,
    /// Turns remaining; decremented once per resolved turn.
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_delta: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_delta: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_health_delta: Option<i32>,
    /// Multiplicative factor on healing received while active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_modifier: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl BuffInstance {
    pub fn attack_delta(&self) -> i32 {
        self.attack_delta.unwrap_or(0)
    }

    pub fn defense_delta(&self) -> i32 {
        self.defense_delta.unwrap_or(0)
    }

    pub fn max_health_delta(&self) -> i32 {
        self.max_health_delta.unwrap_or(0)
    }

    pub fn is_expired(&self) -> bool {
        self.duration <= 0
    }
}

/// Static description of a buff, instantiated with a fresh id on application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuffTemplate {
    pub name: &'static str,
    pub duration: i32,
    pub attack_delta: i32,
    pub defense_delta: i32,
    pub max_health_delta: i32,
    pub heal_modifier: Option<f64>,
    pub description: Option<&'static str>,
}

impl BuffTemplate {
    pub const fn new(name: &'static str, duration: i32) -> Self {
        Self {
            name,
            duration,
            attack_delta: 0,
            defense_delta: 0,
            max_health_delta: 0,
            heal_modifier: None,
            description: None,
        }
    }

    pub const fn attack(mut self, delta: i32) -> Self {
        self.attack_delta = delta;
        self
    }

    pub const fn defense(mut self, delta: i32) -> Self {
        self.defense_delta = delta;
        self
    }

    pub const fn max_health(mut self, delta: i32) -> Self {
        self.max_health_delta = delta;
        self
    }

    pub const fn heal_modifier(mut self, factor: f64) -> Self {
        self.heal_modifier = Some(factor);
        self
    }

    pub const fn description(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    pub fn instantiate(&self, id: BuffId) -> BuffInstance {
        let nonzero = |delta: i32| (delta != 0).then_some(delta);
        BuffInstance {
            id,
            name: self.name.to_string(),
            duration: self.duration,
            attack_delta: nonzero(self.attack_delta),
            defense_delta: nonzero(self.defense_delta),
            max_health_delta: nonzero(self.max_health_delta),
            heal_modifier: self.heal_modifier,
            description: self.description.map(str::to_string),
        }
    }
}
