//! Data model: rosters, game sides, play-by-play and results

pub mod box_score;
pub mod events;
pub mod game;
pub mod match_result;
pub mod roster;

pub use box_score::{BattingLine, BoxScore, LineScore, PitchingLine, PlateAppearance, TeamBox};
pub use events::{MatchDiagnostic, PlayByPlayEvent};
pub use game::{Half, TeamSide};
pub use match_result::MatchResult;
pub use roster::{demo_roster, BattingStats, PitchingStats, Player, Role, Roster};
