/// Balance baseline and tunable parameters of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameConfig {
    /// Oldest log entries are dropped once the log grows past this length.
    /// `None` keeps the full history.
    pub log_capacity: Option<usize>,
    /// Name used when `start` receives a blank name.
    pub default_player_name: String,
}

impl GameConfig {
    // ===== waves =====
    /// Every n-th wave spawns a boss and offers a farm upgrade.
    pub const BOSS_INTERVAL: u32 = 5;
    pub const STORY_WAVES: [u32; 4] = [8, 13, 18, 23];

    // ===== player baseline =====
    pub const PLAYER_HEALTH: i32 = 200;
    pub const PLAYER_ATTACK: i32 = 30;
    pub const PLAYER_DEFENSE: i32 = 20;
    pub const PLAYER_MANA: u32 = 100;
    pub const PLAYER_CRIT_CHANCE: f64 = 0.05;
    pub const PLAYER_CRIT_MULTIPLIER: f64 = 1.75;
    pub const PLAYER_REGEN: f64 = 0.03;

    // ===== enemy scaling (base + per-wave) =====
    pub const ENEMY_HEALTH: (i32, i32) = (80, 14);
    pub const ENEMY_ATTACK: (i32, i32) = (10, 4);
    pub const ENEMY_DEFENSE: (i32, i32) = (5, 1);
    pub const BOSS_HEALTH_MULTIPLIER: f64 = 1.8;
    pub const BOSS_ATTACK_MULTIPLIER: f64 = 1.6;
    pub const BOSS_DEFENSE_MULTIPLIER: f64 = 1.4;

    // ===== combat =====
    pub const PLAYER_VARIANCE: (f64, f64) = (0.9, 1.2);
    pub const ENEMY_VARIANCE: (f64, f64) = (0.85, 1.15);
    pub const GOBLIN_STEAL_CHANCE: f64 = 0.25;
    pub const GOBLIN_STEAL_FRACTION: f64 = 0.08;
    /// Lowest permanent attack a steal or a story choice can leave.
    pub const PLAYER_ATTACK_FLOOR: i32 = 5;
    pub const MUTANT_POISON_CHANCE: f64 = 0.3;
    pub const GOLEM_MITIGATION: f64 = 0.75;
    pub const SHADOW_VULNERABLE_CHANCE: f64 = 0.35;
    pub const BOSS_ENRAGE_THRESHOLD: f64 = 0.5;
    pub const BOSS_ENRAGE_ATTACK: f64 = 1.3;
    pub const BOSS_ENRAGE_DEFENSE: f64 = 1.2;
    pub const BOSS_SLAM_CHANCE: f64 = 0.3;
    pub const BOSS_SLAM_FRACTION: f64 = 0.2;

    // ===== rewards =====
    pub const HEAL_ACTION_PERCENT: f64 = 0.3;
    pub const WAVE_RESPITE_PERCENT: f64 = 0.2;
    pub const WAVE_COINS: (u32, u32) = (6, 12);
    pub const WAVE_COINS_PER_WAVE: u32 = 2;
    pub const SKILL_DROP_CHANCE: f64 = 0.35;
    pub const ANCIENT_WELL_CHANCE: f64 = 0.04;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_NAME: &'static str = "Unnamed Farm";

    pub fn new() -> Self {
        Self {
            log_capacity: None,
            default_player_name: Self::DEFAULT_PLAYER_NAME.to_string(),
        }
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = Some(capacity);
        self
    }

    pub fn is_boss_wave(wave: u32) -> bool {
        wave > 0 && wave % Self::BOSS_INTERVAL == 0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
