//! Runaway guards for the inning loop

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Hard stop on extra innings (default: 18)
    pub max_innings: u32,
    /// Plate appearances allowed per half-inning, per lineup slot (default: 3)
    pub at_bats_per_lineup_slot: u32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_innings: 18,
            at_bats_per_lineup_slot: 3,
        }
    }
}

impl SafetyConfig {
    pub fn max_at_bats_per_half(&self, lineup_len: usize) -> u32 {
        (lineup_len as u32).saturating_mul(self.at_bats_per_lineup_slot)
    }
}
