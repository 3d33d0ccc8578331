//! Play-by-play and diagnostics
//!
//! Both logs are append-only and chronological.

use serde::{Deserialize, Serialize};

use super::game::{Half, TeamSide};
use crate::engine::base_state::ExtraBaseAttempt;
use crate::engine::decision::{BattingApproach, PitchingStrategy};
use crate::engine::outcome::OutcomeKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayByPlayEvent {
    pub inning: u32,
    pub half: Half,
    pub batter_name: String,
    pub pitcher_name: String,
    pub outcome: OutcomeKind,
    /// Runs driven in; `None` when nobody scored.
    pub rbi: Option<u8>,
    pub outs_after: u8,
    pub approach_used: Option<BattingApproach>,
    pub strategy_used: Option<PitchingStrategy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_base_attempts: Vec<ExtraBaseAttempt>,
    pub home_score: u32,
    pub away_score: u32,
    pub description: String,
}

/// Something the engine handled without failing, but the caller should know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchDiagnostic {
    /// Roster can't field a game (no batters or no pitchers).
    InvalidRoster { side: TeamSide, reason: String },
    /// Half-inning cut short after too many plate appearances.
    AtBatCapReached { inning: u32, half: Half, at_bats: u32 },
    /// Game stopped at the extra-innings limit.
    InningCapReached { inning: u32 },
    WalkOff { inning: u32 },
}

impl MatchDiagnostic {
    /// Safety caps and bad input, as opposed to informational markers.
    pub fn is_warning(&self) -> bool {
        !matches!(self, MatchDiagnostic::WalkOff { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_json_is_tagged() {
        let diag = MatchDiagnostic::InningCapReached { inning: 18 };
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(json, r#"{"kind":"inning_cap_reached","inning":18}"#);
        assert!(diag.is_warning());
        assert!(!MatchDiagnostic::WalkOff { inning: 9 }.is_warning());
    }
}
