//! Leverage index
//!
//! How much the next plate appearance can move the game, relative to an
//! average plate appearance.
//!
//! ## Computation
//! 1. Project four representative outcomes (out, walk, single, homer) through
//!    the primary base-running pass
//! 2. Weight the absolute change in win expectancy by league frequencies
//! 3. Divide by [`AVG_PA_WE_SWING`], the same quantity averaged over a fixed
//!    reference grid, so the grid mean of LI is 1.0
//!
//! A projection that ends the half flips perspective: the batting team's WE
//! becomes one minus the other team's WE at the start of the next half.

use once_cell::sync::Lazy;

use super::base_state::{advance_runners, BaseState, MAX_OUTS};
use super::outcome::OutcomeKind;
use super::win_expectancy::{win_expectancy, GameSituation, REGULATION_INNINGS};
use crate::models::Half;

/// Outcome mix of an average plate appearance.
pub const OUTCOME_WEIGHTS: [(OutcomeKind, f64); 4] = [
    (OutcomeKind::Groundout, 0.713),
    (OutcomeKind::Walk, 0.082),
    (OutcomeKind::Single, 0.165),
    (OutcomeKind::HomeRun, 0.040),
];

/// Mean expected |ΔWE| over innings 1-9, both halves, 0-2 outs, all base
/// states and run differentials -4..=4.
pub static AVG_PA_WE_SWING: Lazy<f64> = Lazy::new(|| {
    let grid = reference_grid();
    let total: f64 = grid.iter().map(expected_we_swing).sum();
    total / grid.len() as f64
});

pub fn reference_grid() -> Vec<GameSituation> {
    let mut grid = Vec::with_capacity(9 * 2 * 3 * 8 * 9);
    for inning in 1..=REGULATION_INNINGS {
        for half in [Half::Top, Half::Bottom] {
            for outs in 0..MAX_OUTS {
                for bases in 0..8u8 {
                    for run_diff in -4..=4 {
                        grid.push(GameSituation {
                            inning,
                            half,
                            outs,
                            bases,
                            run_diff,
                        });
                    }
                }
            }
        }
    }
    grid
}

/// Batting team's WE after one hypothetical outcome.
pub fn projected_we(situation: &GameSituation, outcome: OutcomeKind) -> f64 {
    let adv = advance_runners(outcome, BaseState::from_occupancy(situation.bases), 0);
    let outs = situation.outs + adv.outs_added;
    let run_diff = situation.run_diff + adv.runs() as i32;
    let late = situation.inning >= REGULATION_INNINGS;

    if situation.half == Half::Bottom && late && run_diff > 0 {
        // Walk-off, or a bottom half that ends with home ahead.
        return 1.0;
    }

    if outs < MAX_OUTS {
        return win_expectancy(&GameSituation {
            outs,
            bases: adv.bases.occupancy(),
            run_diff,
            ..*situation
        });
    }

    match situation.half {
        Half::Top => {
            if late && run_diff < 0 {
                // Home leads after the top of the 9th or later: no bottom half.
                return 0.0;
            }
            let next = GameSituation::start_of_half(situation.inning, Half::Bottom, -run_diff);
            1.0 - win_expectancy(&next)
        }
        Half::Bottom => {
            if late && run_diff < 0 {
                return 0.0;
            }
            let next = GameSituation::start_of_half(situation.inning + 1, Half::Top, -run_diff);
            1.0 - win_expectancy(&next)
        }
    }
}

/// Frequency-weighted mean of |ΔWE| over the four representative outcomes.
pub fn expected_we_swing(situation: &GameSituation) -> f64 {
    let current = win_expectancy(situation);
    OUTCOME_WEIGHTS
        .iter()
        .map(|(outcome, weight)| weight * (projected_we(situation, *outcome) - current).abs())
        .sum()
}

pub fn leverage_index(situation: &GameSituation) -> f64 {
    let baseline = *AVG_PA_WE_SWING;
    if baseline <= 0.0 {
        return 0.0;
    }
    (expected_we_swing(situation) / baseline).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{RandomProvider, SeededRandom};

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = OUTCOME_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_mean_is_one() {
        let grid = reference_grid();
        assert_eq!(grid.len(), 3888);
        let mean = grid.iter().map(leverage_index).sum::<f64>() / grid.len() as f64;
        assert!((mean - 1.0).abs() < 1e-9, "{mean}");
    }

    #[test]
    fn test_random_states_average_near_one() {
        let grid = reference_grid();
        let mut rng = SeededRandom::new(2024);
        let samples = 4000;
        let mut total = 0.0;
        for _ in 0..samples {
            let idx = rng.random_int(0, grid.len() as i64) as usize;
            let li = leverage_index(&grid[idx]);
            assert!(li >= 0.0);
            total += li;
        }
        let mean = total / samples as f64;
        assert!((mean - 1.0).abs() < 0.15, "{mean}");
    }

    #[test]
    fn test_late_close_beats_blowout() {
        let tense = GameSituation {
            inning: 9,
            half: Half::Bottom,
            outs: 2,
            bases: 0b011,
            run_diff: -1,
        };
        let blowout = GameSituation {
            inning: 2,
            half: Half::Top,
            outs: 0,
            bases: 0,
            run_diff: -8,
        };
        let hot = leverage_index(&tense);
        let cold = leverage_index(&blowout);
        assert!(hot > 2.0, "{hot}");
        assert!(cold < 0.5, "{cold}");
    }

    #[test]
    fn test_third_out_flips_perspective() {
        // Two outs in the top of the 1st, tied: an out hands the home team a
        // fresh bottom half.
        let situation = GameSituation {
            inning: 1,
            half: Half::Top,
            outs: 2,
            bases: 0,
            run_diff: 0,
        };
        let after_out = projected_we(&situation, OutcomeKind::Groundout);
        let home = win_expectancy(&GameSituation::start_of_half(1, Half::Bottom, 0));
        assert!((after_out - (1.0 - home)).abs() < 1e-12);
        assert!(after_out < 0.5);
    }

    #[test]
    fn test_walk_off_projection_is_certain() {
        let situation = GameSituation {
            inning: 9,
            half: Half::Bottom,
            outs: 1,
            bases: 0b100,
            run_diff: 0,
        };
        assert_eq!(projected_we(&situation, OutcomeKind::Single), 1.0);
        assert_eq!(projected_we(&situation, OutcomeKind::HomeRun), 1.0);
    }

    #[test]
    fn test_game_ending_out_in_bottom_ninth() {
        let situation = GameSituation {
            inning: 9,
            half: Half::Bottom,
            outs: 2,
            bases: 0,
            run_diff: -2,
        };
        assert_eq!(projected_we(&situation, OutcomeKind::Groundout), 0.0);
    }
}
