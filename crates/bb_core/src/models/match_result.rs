//! Match result
//!
//! ```text
//! initialize_match ──► MatchState ──apply_decision──► ... ──► finalize_match
//!                                                               │
//!                                       RewardConfig ──────────►│
//!                                                               ▼
//!                                                         MatchResult
//!                                                           ├─ score / win / cash
//!                                                           ├─ play_by_play
//!                                                           ├─ box_score + line_score
//!                                                           └─ diagnostics
//! ```
//!
//! Runs are reported from the player's point of view (`my_runs`), not by
//! home/away.

use serde::{Deserialize, Serialize};

use super::box_score::{BoxScore, LineScore};
use super::events::{MatchDiagnostic, PlayByPlayEvent};
use super::game::TeamSide;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub my_side: TeamSide,
    pub my_runs: u32,
    pub opponent_runs: u32,
    pub is_win: bool,
    pub cash_earned: u32,
    pub total_innings: u32,
    pub walk_off: bool,
    pub play_by_play: Vec<PlayByPlayEvent>,
    pub box_score: BoxScore,
    pub line_score: LineScore,
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl MatchResult {
    pub fn is_tie(&self) -> bool {
        self.my_runs == self.opponent_runs
    }

    /// "W 5-3", "L 2-4" or "T 1-1".
    pub fn summary(&self) -> String {
        let tag = if self.is_win {
            "W"
        } else if self.is_tie() {
            "T"
        } else {
            "L"
        };
        format!("{tag} {}-{}", self.my_runs, self.opponent_runs)
    }
}
