// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub scores: ScoresConfig,
    pub decision: DecisionConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Per-turn deadline constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Upper bound on time spent evaluating candidates
    pub max_move_time_ms: u64,
    /// Reserved for the round trip to the game server
    pub network_overhead_ms: u64,
    /// Shrink the deadline to fit the game's own timeout when it is smaller
    pub respect_game_timeout: bool,
}

impl TimingConfig {
    /// Computes the evaluation deadline for a game with the given timeout
    ///
    /// A zero timeout means the host did not supply one.
    pub fn deadline(&self, game_timeout_ms: u32) -> Duration {
        let mut budget = self.max_move_time_ms;
        if self.respect_game_timeout && game_timeout_ms > 0 {
            let available = u64::from(game_timeout_ms).saturating_sub(self.network_overhead_ms);
            budget = budget.min(available);
        }
        Duration::from_millis(budget)
    }
}

/// Move scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    // Food urgency
    pub health_low_threshold: i32,
    pub health_critical_threshold: i32,
    pub food_bonus_numerator: i32,
    pub starvation_food_bonus: i32,

    // Head-to-head encounters
    pub head_collision_win_bonus: i32,
    pub head_collision_penalty: i32,
}

/// Decision fallback constants
#[derive(Debug, Deserialize, Clone)]
pub struct DecisionConfig {
    /// Direction played when no legal move exists
    pub fallback_direction: Direction,
}

/// Snake appearance reported on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                max_move_time_ms: 400,
                network_overhead_ms: 50,
                respect_game_timeout: true,
            },
            scores: ScoresConfig {
                health_low_threshold: 50,
                health_critical_threshold: 10,
                food_bonus_numerator: 50,
                starvation_food_bonus: 10,
                head_collision_win_bonus: 1,
                head_collision_penalty: -100,
            },
            decision: DecisionConfig {
                fallback_direction: Direction::Left,
            },
            appearance: AppearanceConfig {
                author: "frankban".to_string(),
                color: "#FF0000".to_string(),
                head: "bendr".to_string(),
                tail: "round-bum".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
