//! High-leverage pause thresholds
//!
//! The bar drops as the game goes on: a 2.0 spot in the 2nd is rare and
//! worth a pause, while late innings pause on smaller swings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageConfig {
    /// Threshold through `early_last_inning` (default: 2.0)
    pub early_threshold: f64,
    /// Threshold through `middle_last_inning` (default: 1.5)
    pub middle_threshold: f64,
    /// Threshold afterwards (default: 1.2)
    pub late_threshold: f64,
    pub early_last_inning: u32,
    pub middle_last_inning: u32,
}

impl Default for LeverageConfig {
    fn default() -> Self {
        Self {
            early_threshold: 2.0,
            middle_threshold: 1.5,
            late_threshold: 1.2,
            early_last_inning: 5,
            middle_last_inning: 7,
        }
    }
}

impl LeverageConfig {
    pub fn threshold_for(&self, inning: u32) -> f64 {
        if inning <= self.early_last_inning {
            self.early_threshold
        } else if inning <= self.middle_last_inning {
            self.middle_threshold
        } else {
            self.late_threshold
        }
    }
}
