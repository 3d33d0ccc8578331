//! Win expectancy
//!
//! P(batting team wins) from inning, half, outs, bases and run differential.
//!
//! ## Model
//! - Runs still to come this half come from the RE24 table
//! - Every remaining half-inning is worth the league average (the RE24
//!   value for empty bases, no outs)
//! - Both sides' future runs are Poisson; the batting side wins when
//!   `B - F > -diff`, and a tie after regulation is a coin flip
//!
//! Small totals (`lambda_b + lambda_f < 2.5`) use an exact convolution of the
//! two PMFs; larger totals use a normal approximation of the difference.

use serde::{Deserialize, Serialize};

use super::base_state::MAX_OUTS;
use crate::models::Half;

/// Expected runs for the rest of the half, `[outs][occupancy]` (bit 0 = first).
pub const RE24: [[f64; 8]; 3] = [
    [0.481, 0.859, 1.100, 1.437, 1.350, 1.784, 1.964, 2.292],
    [0.254, 0.509, 0.664, 0.884, 0.950, 1.130, 1.376, 1.541],
    [0.098, 0.224, 0.319, 0.429, 0.353, 0.478, 0.580, 0.752],
];

pub const LEAGUE_RUNS_PER_HALF: f64 = 0.481;
pub const REGULATION_INNINGS: u32 = 9;
pub const EXACT_LAMBDA_LIMIT: f64 = 2.5;
pub const MAX_RUNS_PER_SIDE: u32 = 30;

/// Situation as seen by the batting team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSituation {
    pub inning: u32,
    pub half: Half,
    pub outs: u8,
    /// 3-bit base occupancy.
    pub bases: u8,
    /// Batting runs minus fielding runs.
    pub run_diff: i32,
}

impl GameSituation {
    pub fn start_of_half(inning: u32, half: Half, run_diff: i32) -> Self {
        Self {
            inning,
            half,
            outs: 0,
            bases: 0,
            run_diff,
        }
    }
}

pub fn run_expectancy(outs: u8, bases: u8) -> f64 {
    if outs >= MAX_OUTS {
        return 0.0;
    }
    RE24[outs as usize][(bases & 0b111) as usize]
}

/// Half-innings left after the current one: `(batting, fielding)`.
pub fn remaining_halves(inning: u32, half: Half) -> (u32, u32) {
    let n = inning.clamp(1, REGULATION_INNINGS);
    match half {
        Half::Top => (REGULATION_INNINGS - n, REGULATION_INNINGS + 1 - n),
        Half::Bottom => (REGULATION_INNINGS - n, REGULATION_INNINGS - n),
    }
}

/// Poisson rates of future runs: `(batting, fielding)`.
pub fn future_run_rates(situation: &GameSituation) -> (f64, f64) {
    let (batting_halves, fielding_halves) = remaining_halves(situation.inning, situation.half);
    let lambda_b =
        run_expectancy(situation.outs, situation.bases) + batting_halves as f64 * LEAGUE_RUNS_PER_HALF;
    let lambda_f = fielding_halves as f64 * LEAGUE_RUNS_PER_HALF;
    (lambda_b, lambda_f)
}

pub fn win_expectancy(situation: &GameSituation) -> f64 {
    let (lambda_b, lambda_f) = future_run_rates(situation);
    win_probability(lambda_b, lambda_f, situation.run_diff)
}

/// `P(B - F > -diff) + 0.5 * P(B - F = -diff)` for Poisson `B`, `F`.
pub fn win_probability(lambda_b: f64, lambda_f: f64, run_diff: i32) -> f64 {
    let p = if lambda_b + lambda_f < EXACT_LAMBDA_LIMIT {
        exact_win_probability(lambda_b, lambda_f, run_diff)
    } else {
        normal_win_probability(lambda_b, lambda_f, run_diff)
    };
    p.clamp(0.0, 1.0)
}

fn exact_win_probability(lambda_b: f64, lambda_f: f64, run_diff: i32) -> f64 {
    let pb = poisson_pmf(lambda_b, MAX_RUNS_PER_SIDE);
    let pf = poisson_pmf(lambda_f, MAX_RUNS_PER_SIDE);
    let needed = -run_diff as i64;

    let mut p = 0.0;
    for (b, p_b) in pb.iter().enumerate() {
        for (f, p_f) in pf.iter().enumerate() {
            let margin = b as i64 - f as i64;
            if margin > needed {
                p += p_b * p_f;
            } else if margin == needed {
                p += 0.5 * p_b * p_f;
            }
        }
    }
    p
}

fn normal_win_probability(lambda_b: f64, lambda_f: f64, run_diff: i32) -> f64 {
    let mean = lambda_b - lambda_f;
    let sigma = (lambda_b + lambda_f).sqrt();
    normal_cdf((run_diff as f64 + mean) / sigma)
}

/// PMF for `0..=max_k`; tail mass folded into the last bucket.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];

    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }

    let sum: f64 = out.iter().sum();
    if sum < 1.0 {
        out[max_k] += 1.0 - sum;
    }
    out
}

pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz-Stegun 7.1.26, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = x.signum();
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}
