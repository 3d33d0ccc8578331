//! Repetition handling switches

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// AI re-rolls away from a choice repeated 2+ times (default: true)
    pub override_enabled: bool,
    /// Repeated choices lose effectiveness (default: true)
    pub penalties_enabled: bool,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            override_enabled: true,
            penalties_enabled: true,
        }
    }
}
