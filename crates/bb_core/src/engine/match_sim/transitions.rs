//! Half-inning, pitching-change and game-over transitions
//!
//! ## Game over
//! - After the top of the 9th or later, if home leads (no bottom half needed)
//! - After the bottom of the 9th or later, if the score is not tied
//! - Mid-half in the bottom of the 9th or later, the moment home goes ahead
//!   (walk-off)
//! - After the bottom of the last allowed inning, tied or not

use tracing::{debug, info, warn};

use super::state::{MatchPhase, MatchState};
use crate::config::EngineConfig;
use crate::engine::base_state::BaseState;
use crate::engine::win_expectancy::REGULATION_INNINGS;
use crate::models::{Half, MatchDiagnostic, TeamSide};

pub(crate) fn finish_game(state: &mut MatchState) {
    state.is_complete = true;
    state.inning_complete = true;
    state.phase = MatchPhase::GameComplete;
    info!(
        home = state.home.runs,
        away = state.away.runs,
        inning = state.inning,
        half = state.half.label(),
        walk_off = state.walk_off,
        "game complete"
    );
}

/// Ends the game on the spot if home just took the lead late.
pub(crate) fn check_walk_off(state: &mut MatchState) -> bool {
    if state.half != Half::Bottom
        || state.inning < REGULATION_INNINGS
        || state.home.runs <= state.away.runs
    {
        return false;
    }
    state.walk_off = true;
    state
        .diagnostics
        .push(MatchDiagnostic::WalkOff { inning: state.inning });
    finish_game(state);
    true
}

/// Credits the inning, swaps the pitcher if due, then either ends the game or
/// sets up the next half.
pub(crate) fn close_half(state: &mut MatchState, config: &EngineConfig) {
    let fielding = state.half.fielding_side();
    state.team_mut(fielding).pitcher.innings_pitched += 1;
    rotate_pitcher(state, fielding, config);

    let late = state.inning >= REGULATION_INNINGS;
    let home_leads = state.home.runs > state.away.runs;
    let tied = state.home.runs == state.away.runs;

    match state.half {
        Half::Top if late && home_leads => return finish_game(state),
        Half::Bottom if late && !tied => return finish_game(state),
        Half::Bottom if state.inning >= config.safety.max_innings => {
            warn!(inning = state.inning, "inning cap reached, ending game");
            state.diagnostics.push(MatchDiagnostic::InningCapReached {
                inning: state.inning,
            });
            return finish_game(state);
        }
        _ => {}
    }

    let (inning, half) = match state.half {
        Half::Top => (state.inning, Half::Bottom),
        Half::Bottom => (state.inning + 1, Half::Top),
    };
    debug!(
        from_inning = state.inning,
        from_half = state.half.label(),
        home = state.home.runs,
        away = state.away.runs,
        "half-inning complete"
    );

    state.inning = inning;
    state.half = half;
    state.outs = 0;
    state.bases = BaseState::EMPTY;
    state.adaptation.reset();
    state.at_bats_this_half = 0;
    state.phase = MatchPhase::HalfComplete;
    state.inning_complete = true;
    state.line_score.open_half(inning, half);
}

/// Starter hands over once they reach the innings limit; the first reliever
/// hands over from the configured late inning on. Needs the arms to exist.
pub(crate) fn rotate_pitcher(state: &mut MatchState, side: TeamSide, config: &EngineConfig) {
    let completed_inning = state.inning;
    let team = state.team_mut(side);
    let slot = team.pitcher.staff_slot;
    let staff_size = team.staff.len();

    let next_slot = match slot {
        0 if team.pitcher.innings_pitched >= config.rotation.starter_innings_limit
            && staff_size >= 2 =>
        {
            Some(1)
        }
        1 if completed_inning + 1 >= config.rotation.second_reliever_inning && staff_size >= 3 => {
            Some(2)
        }
        _ => None,
    };

    if let Some(next_slot) = next_slot {
        debug!(
            side = ?side,
            from_slot = slot,
            to_slot = next_slot,
            innings = team.pitcher.innings_pitched,
            "pitching change"
        );
        team.pitcher.relieve(next_slot);
    }
}

/// Cuts a runaway half-inning short. Returns whether the cap hit.
pub(crate) fn enforce_at_bat_cap(state: &mut MatchState, config: &EngineConfig) -> bool {
    let cap = config
        .safety
        .max_at_bats_per_half(state.batting_team().lineup.len());
    if state.at_bats_this_half < cap {
        return false;
    }
    warn!(
        inning = state.inning,
        half = state.half.label(),
        at_bats = state.at_bats_this_half,
        "at-bat cap reached, closing half-inning"
    );
    state.diagnostics.push(MatchDiagnostic::AtBatCapReached {
        inning: state.inning,
        half: state.half,
        at_bats: state.at_bats_this_half,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::state::TeamState;
    use crate::engine::rng::MatchRng;
    use crate::models::demo_roster;
    use std::sync::Arc;

    fn state() -> MatchState {
        MatchState::new(
            TeamState::new(TeamSide::Home, Arc::new(demo_roster("Home", 60))),
            TeamState::new(TeamSide::Away, Arc::new(demo_roster("Away", 60))),
            TeamSide::Home,
            MatchRng::seeded(3),
        )
    }

    #[test]
    fn test_close_top_moves_to_bottom() {
        let mut s = state();
        s.outs = 3;
        s.adaptation.batting.consecutive_count = 2;
        s.bases = BaseState::from_occupancy(0b101);
        close_half(&mut s, &EngineConfig::default());
        assert_eq!((s.inning, s.half, s.outs), (1, Half::Bottom, 0));
        assert!(s.bases.is_empty());
        assert_eq!(s.adaptation.batting.consecutive_count, 0);
        assert_eq!(s.home.pitcher.innings_pitched, 1);
        assert_eq!(s.phase, MatchPhase::HalfComplete);
        assert!(s.inning_complete);
    }

    #[test]
    fn test_home_ahead_after_top_ninth_skips_bottom() {
        let mut s = state();
        s.inning = 9;
        s.home.runs = 3;
        s.away.runs = 2;
        close_half(&mut s, &EngineConfig::default());
        assert!(s.is_complete);
        assert_eq!(s.half, Half::Top);
        assert_eq!(s.phase, MatchPhase::GameComplete);
    }

    #[test]
    fn test_bottom_ninth_unequal_ends_no_tenth() {
        let mut s = state();
        s.inning = 9;
        s.half = Half::Bottom;
        s.home.runs = 4;
        s.away.runs = 1;
        close_half(&mut s, &EngineConfig::default());
        assert!(s.is_complete);
        assert_eq!(s.inning, 9);
    }

    #[test]
    fn test_tie_after_nine_goes_to_extras() {
        let mut s = state();
        s.inning = 9;
        s.half = Half::Bottom;
        s.home.runs = 2;
        s.away.runs = 2;
        close_half(&mut s, &EngineConfig::default());
        assert!(!s.is_complete);
        assert_eq!((s.inning, s.half), (10, Half::Top));
        assert_eq!(s.line_score.away.len(), 10);
    }

    #[test]
    fn test_inning_cap_ends_tied_game() {
        let mut s = state();
        s.inning = 18;
        s.half = Half::Bottom;
        close_half(&mut s, &EngineConfig::default());
        assert!(s.is_complete);
        assert_eq!(s.diagnostics, vec![MatchDiagnostic::InningCapReached { inning: 18 }]);
    }

    #[test]
    fn test_walk_off_only_late_in_bottom() {
        let mut s = state();
        s.inning = 8;
        s.half = Half::Bottom;
        s.home.runs = 1;
        assert!(!check_walk_off(&mut s));

        s.inning = 9;
        assert!(check_walk_off(&mut s));
        assert!(s.walk_off && s.is_complete);
    }

    #[test]
    fn test_starter_relieved_after_six() {
        let cfg = EngineConfig::default();
        let mut s = state();
        s.half = Half::Bottom;
        s.inning = 6;
        s.away.pitcher.innings_pitched = 5;
        close_half(&mut s, &cfg);
        assert_eq!(s.away.pitcher.staff_slot, 1);
        assert_eq!(s.away.pitcher.innings_pitched, 0);
        assert_eq!(s.away.current_pitcher().unwrap().name, "Away Setup");
    }

    #[test]
    fn test_second_reliever_from_eighth() {
        let cfg = EngineConfig::default();
        let mut s = state();
        s.away.pitcher.relieve(1);

        s.inning = 6;
        rotate_pitcher(&mut s, TeamSide::Away, &cfg);
        assert_eq!(s.away.pitcher.staff_slot, 1);

        s.inning = 7;
        rotate_pitcher(&mut s, TeamSide::Away, &cfg);
        assert_eq!(s.away.pitcher.staff_slot, 2);
    }

    #[test]
    fn test_no_reliever_no_change() {
        let cfg = EngineConfig::default();
        let mut roster = demo_roster("Solo", 50);
        roster.players.truncate(10);
        let mut s = MatchState::new(
            TeamState::new(TeamSide::Home, Arc::new(roster)),
            TeamState::new(TeamSide::Away, Arc::new(demo_roster("Away", 50))),
            TeamSide::Home,
            MatchRng::seeded(1),
        );
        s.home.pitcher.innings_pitched = 8;
        rotate_pitcher(&mut s, TeamSide::Home, &cfg);
        assert_eq!(s.home.pitcher.staff_slot, 0);
    }

    #[test]
    fn test_at_bat_cap() {
        let cfg = EngineConfig::default();
        let mut s = state();
        s.at_bats_this_half = 26;
        assert!(!enforce_at_bat_cap(&mut s, &cfg));
        s.at_bats_this_half = 27;
        assert!(enforce_at_bat_cap(&mut s, &cfg));
        assert_eq!(s.diagnostics.len(), 1);
    }
}
