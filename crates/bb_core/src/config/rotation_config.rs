//! Pitcher rotation thresholds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Innings pitched after which the starter hands over (default: 6)
    pub starter_innings_limit: u32,
    /// First inning the second reliever may take over (default: 8)
    pub second_reliever_inning: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            starter_innings_limit: 6,
            second_reliever_inning: 8,
        }
    }
}
