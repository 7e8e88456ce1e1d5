//! Game tuning constants.
//!
//! Every number the simulation uses lives here so a host can load a JSON
//! override without recompiling. Missing fields fall back to the defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How often the score-threshold difficulty check may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPolicy {
    /// Fire on every frame whose score is a non-zero multiple of the current
    /// threshold, even if the score has not changed since the last increase.
    #[default]
    EveryQualifyingFrame,
    /// Fire at most once per distinct score value.
    OncePerScore,
}

impl DifficultyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPolicy::EveryQualifyingFrame => "every-frame",
            DifficultyPolicy::OncePerScore => "once-per-score",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_health: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // === Enemies ===
    pub enemy_size: f32,
    /// Starting value of the global speed term added to every new enemy.
    pub enemy_base_speed: f32,
    /// y an enemy is placed at when first spawned.
    pub enemy_spawn_y: f32,
    /// y an enemy is reset to when it wraps or rams the player.
    pub enemy_wrap_y: f32,
    pub points_per_enemy: u32,

    // === Spawning (milliseconds) ===
    pub spawn_interval_ms: u64,
    pub min_spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,

    // === Difficulty ===
    pub difficulty_points: u32,
    pub difficulty_points_step: u32,
    pub enemy_speed_step: f32,
    pub difficulty_policy: DifficultyPolicy,

    // === Boss ===
    pub boss_size: f32,
    pub boss_speed: f32,
    pub boss_spawn_y: f32,
    pub boss_base_health: i32,
    pub boss_health_per_difficulty: i32,
    /// A boss appears every time this many enemies have been defeated.
    pub boss_kill_interval: u32,
    pub boss_points: u32,
    /// Spawn interval reduction on boss defeat (not floored).
    pub boss_interval_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,

            player_width: 30.0,
            player_height: 30.0,
            player_speed: 5.0,
            player_health: 3,

            bullet_width: 5.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,

            enemy_size: 30.0,
            enemy_base_speed: 1.0,
            enemy_spawn_y: -30.0,
            enemy_wrap_y: -10.0,
            points_per_enemy: 10,

            spawn_interval_ms: 2000,
            min_spawn_interval_ms: 1000,
            spawn_interval_step_ms: 200,

            difficulty_points: 200,
            difficulty_points_step: 200,
            enemy_speed_step: 0.1,
            difficulty_policy: DifficultyPolicy::EveryQualifyingFrame,

            boss_size: 100.0,
            boss_speed: 0.5,
            boss_spawn_y: -100.0,
            boss_base_health: 10,
            boss_health_per_difficulty: 2,
            boss_kill_interval: 10,
            boss_points: 100,
            boss_interval_step_ms: 10,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "Loaded config from {} (difficulty policy: {})",
            path.as_ref().display(),
            config.difficulty_policy.as_str()
        );
        Ok(config)
    }

    /// Reject configurations the simulation cannot run: every entity must fit
    /// on the canvas, and the threshold arithmetic needs non-zero divisors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widest = self
            .player_width
            .max(self.enemy_size)
            .max(self.boss_size);
        if !(self.canvas_width > widest && self.canvas_height > self.player_height) {
            return Err(ConfigError::Invalid(format!(
                "canvas {}x{} is too small for its entities",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.player_speed <= 0.0 || self.bullet_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "player and bullet speeds must be positive".to_string(),
            ));
        }
        // a foe that never moves down never wraps
        if self.enemy_base_speed <= 0.0 || self.boss_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "enemy_base_speed and boss_speed must be positive".to_string(),
            ));
        }
        if self.difficulty_points == 0 || self.boss_kill_interval == 0 {
            return Err(ConfigError::Invalid(
                "difficulty_points and boss_kill_interval must be non-zero".to_string(),
            ));
        }
        if self.min_spawn_interval_ms > self.spawn_interval_ms {
            return Err(ConfigError::Invalid(
                "min_spawn_interval_ms exceeds spawn_interval_ms".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "canvas_width": 480.0, "difficulty_policy": "OncePerScore" }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.canvas_width, 480.0);
        assert_eq!(config.canvas_height, 600.0);
        assert_eq!(config.difficulty_policy, DifficultyPolicy::OncePerScore);
        assert_eq!(config.spawn_interval_ms, 2000);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json_str("{ canvas_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn canvas_narrower_than_boss_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "canvas_width": 90.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let config = GameConfig {
            difficulty_points: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_foe_speed_is_rejected() {
        let err = GameConfig::from_json_str(r#"{ "enemy_base_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = GameConfig::from_json_str(r#"{ "boss_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reads_overrides_from_file() {
        let path = std::env::temp_dir()
            .join(format!("canvas_blaster_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "boss_points": 250, "player_health": 5 }"#).unwrap();

        let config = GameConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        let config = config.unwrap();

        assert_eq!(config.boss_points, 250);
        assert_eq!(config.player_health, 5);
        assert_eq!(config.canvas_width, 800.0);
        assert_eq!(config.difficulty_policy, DifficultyPolicy::EveryQualifyingFrame);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/nonexistent/canvas_blaster.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
