//! Fatigue Configuration

use serde::{Deserialize, Serialize};

/// Extra-fatigue costs of high-effort choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Added to the opposing pitcher when the batter works the count (default: 0.10)
    pub patient_fatigue: f64,
    /// Added to the pitcher when they paint the corners (default: 0.08)
    pub paint_fatigue: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            patient_fatigue: 0.10,
            paint_fatigue: 0.08,
        }
    }
}
