//! # Engine Configuration
//!
//! Every tuning constant of the match engine in one serde-friendly tree.
//!
//! ## Presets
//! - `realistic()`: defaults
//! - `arcade()`: lighter fatigue, fewer pauses, earlier bullpen
//! - `simulation()`: heavier fatigue, more pauses
//! - `deterministic()`: no AI re-rolls and no repetition penalties (tests)
//!
//! ## Usage
//! ```rust
//! use bb_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(config.validate().is_ok() && arcade.validate().is_ok());
//! ```

mod adaptation_config;
mod env;
mod fatigue_config;
mod leverage_config;
mod reward_config;
mod rotation_config;
mod safety_config;

pub use adaptation_config::AdaptationConfig;
pub use env::{apply_config_from_env, ENGINE_CONFIG_PATH_ENV};
pub use fatigue_config::FatigueConfig;
pub use leverage_config::LeverageConfig;
pub use reward_config::RewardConfig;
pub use rotation_config::RotationConfig;
pub use safety_config::SafetyConfig;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the player's team bats in the bottom half (default: true)
    #[serde(default = "default_my_team_is_home")]
    pub my_team_is_home: bool,
    #[serde(default)]
    pub fatigue: FatigueConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub leverage: LeverageConfig,
    #[serde(default)]
    pub adaptation: AdaptationConfig,
}

fn default_my_team_is_home() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            my_team_is_home: default_my_team_is_home(),
            fatigue: FatigueConfig::default(),
            rotation: RotationConfig::default(),
            safety: SafetyConfig::default(),
            leverage: LeverageConfig::default(),
            adaptation: AdaptationConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.fatigue.patient_fatigue = 0.05;
        cfg.fatigue.paint_fatigue = 0.04;
        cfg.rotation.starter_innings_limit = 5;
        cfg.rotation.second_reliever_inning = 7;
        cfg.leverage.early_threshold = 2.5;
        cfg.leverage.middle_threshold = 2.0;
        cfg.leverage.late_threshold = 1.6;
        cfg
    }

    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.fatigue.patient_fatigue = 0.12;
        cfg.fatigue.paint_fatigue = 0.10;
        cfg.leverage.early_threshold = 1.8;
        cfg.leverage.middle_threshold = 1.4;
        cfg.leverage.late_threshold = 1.1;
        cfg
    }

    /// Test preset: the only randomness left is the outcome roll and base running.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.adaptation.override_enabled = false;
        cfg.adaptation.penalties_enabled = false;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(MatchError::InvalidConfig(msg));

        for (name, value) in [
            ("fatigue.patient_fatigue", self.fatigue.patient_fatigue),
            ("fatigue.paint_fatigue", self.fatigue.paint_fatigue),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        for (name, value) in [
            ("leverage.early_threshold", self.leverage.early_threshold),
            ("leverage.middle_threshold", self.leverage.middle_threshold),
            ("leverage.late_threshold", self.leverage.late_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be finite and > 0, got {value}"));
            }
        }
        if self.leverage.early_last_inning >= self.leverage.middle_last_inning {
            return invalid(format!(
                "leverage.early_last_inning ({}) must be below middle_last_inning ({})",
                self.leverage.early_last_inning, self.leverage.middle_last_inning
            ));
        }
        if self.safety.max_innings < 9 {
            return invalid(format!(
                "safety.max_innings must be at least 9, got {}",
                self.safety.max_innings
            ));
        }
        if self.safety.at_bats_per_lineup_slot == 0 {
            return invalid("safety.at_bats_per_lineup_slot must be at least 1".to_string());
        }
        if self.rotation.starter_innings_limit == 0 {
            return invalid("rotation.starter_innings_limit must be at least 1".to_string());
        }
        Ok(())
    }
}
