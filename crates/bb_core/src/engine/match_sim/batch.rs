//! Whole-game and batch simulation
//!
//! Matches share nothing mutable, so a batch is a plain `par_iter` over
//! seeds. Results come back in seed order and do not depend on scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::session::MatchSession;
use super::MatchEngine;
use crate::config::RewardConfig;
use crate::models::{MatchResult, Roster};

/// Below this many games the thread pool costs more than it saves.
const PARALLEL_THRESHOLD: usize = 8;

/// AI plays both sides from `seed` to the final out.
pub fn simulate_match(
    engine: &MatchEngine,
    my_roster: Arc<Roster>,
    opponent_roster: Arc<Roster>,
    seed: u64,
    reward: &RewardConfig,
) -> MatchResult {
    let state = engine.initialize_match_with_seed(my_roster, opponent_roster, seed);
    MatchSession::new(engine, state, seed).run_to_completion(reward)
}

pub fn simulate_batch(
    engine: &MatchEngine,
    my_roster: Arc<Roster>,
    opponent_roster: Arc<Roster>,
    seeds: &[u64],
    reward: &RewardConfig,
) -> Vec<MatchResult> {
    let run = |&seed: &u64| {
        simulate_match(
            engine,
            Arc::clone(&my_roster),
            Arc::clone(&opponent_roster),
            seed,
            reward,
        )
    };
    if seeds.len() >= PARALLEL_THRESHOLD {
        seeds.par_iter().map(run).collect()
    } else {
        seeds.iter().map(run).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub walk_offs: u32,
    pub extra_inning_games: u32,
    pub avg_my_runs: f64,
    pub avg_opponent_runs: f64,
    pub avg_innings: f64,
    pub total_cash: u64,
    /// Games that hit a safety cap or had an unplayable roster.
    pub games_with_warnings: u32,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = BatchSummary {
            games: results.len() as u32,
            ..Default::default()
        };
        if results.is_empty() {
            return summary;
        }

        let (mut my_runs, mut opp_runs, mut innings) = (0u64, 0u64, 0u64);
        for result in results {
            if result.is_win {
                summary.wins += 1;
            } else if result.is_tie() {
                summary.ties += 1;
            } else {
                summary.losses += 1;
            }
            if result.walk_off {
                summary.walk_offs += 1;
            }
            if result.total_innings > 9 {
                summary.extra_inning_games += 1;
            }
            if result.diagnostics.iter().any(|d| d.is_warning()) {
                summary.games_with_warnings += 1;
            }
            my_runs += result.my_runs as u64;
            opp_runs += result.opponent_runs as u64;
            innings += result.total_innings as u64;
            summary.total_cash += result.cash_earned as u64;
        }

        let n = results.len() as f64;
        summary.avg_my_runs = my_runs as f64 / n;
        summary.avg_opponent_runs = opp_runs as f64 / n;
        summary.avg_innings = innings as f64 / n;
        summary
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }
}
