//! Context rules for the AI's approach and strategy
//!
//! ## Evaluation Order (Fixed)
//! Each axis has a static rule list sorted by confidence, highest first. The
//! first rule whose predicate matches samples its weighted choice with one
//! draw. If nothing matches, the axis fallback weights are sampled instead.
//!
//! Every predicate is a plain `fn`, so each rule can be tested on its own.

use super::{BattingApproach, DecisionOption, PitchingStrategy};
use crate::engine::base_state::{Base, BaseState};
use crate::engine::fatigue::FatigueLevel;
use crate::engine::rng::RandomProvider;

use BattingApproach::{Contact, Patient, Power};
use PitchingStrategy::{Challenge, Finesse, Paint};

/// Game situation as seen from the plate.
///
/// `score_diff` is batting runs minus fielding runs; the pitcher rules read
/// it negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    pub inning: u32,
    pub outs: u8,
    pub bases: BaseState,
    pub score_diff: i32,
    /// Tier of the pitcher on the mound.
    pub pitcher_fatigue: FatigueLevel,
    pub batter_power: u8,
    pub batter_contact: u8,
}

impl DecisionContext {
    /// Runs the fielding team leads by (negative when trailing).
    pub fn fielding_lead(&self) -> i32 {
        -self.score_diff
    }

    fn runner_on_third_less_than_two_outs(&self) -> bool {
        self.bases.is_occupied(Base::Third) && self.outs < 2
    }

    fn two_outs_empty(&self) -> bool {
        self.outs == 2 && self.bases.is_empty()
    }
}

impl Default for DecisionContext {
    fn default() -> Self {
        Self {
            inning: 1,
            outs: 0,
            bases: BaseState::EMPTY,
            score_diff: 0,
            pitcher_fatigue: FatigueLevel::Fresh,
            batter_power: 50,
            batter_contact: 50,
        }
    }
}

// ============================================================================
// Rule type
// ============================================================================

pub struct DecisionRule<T: 'static> {
    pub name: &'static str,
    pub confidence: f64,
    pub applies: fn(&DecisionContext) -> bool,
    pub weights: &'static [(T, f64)],
}

impl<T: DecisionOption> DecisionRule<T> {
    /// `None` without drawing when the predicate does not match.
    pub fn evaluate<R>(&self, ctx: &DecisionContext, rng: &mut R) -> Option<T>
    where
        R: RandomProvider + ?Sized,
    {
        if !(self.applies)(ctx) {
            return None;
        }
        Some(sample_weighted(self.weights, rng))
    }
}

/// One draw against the cumulative weights. Weights need not sum to 1.
pub fn sample_weighted<T, R>(weights: &[(T, f64)], rng: &mut R) -> T
where
    T: Copy,
    R: RandomProvider + ?Sized,
{
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let roll = rng.random() * total;
    let mut cumulative = 0.0;
    for (choice, weight) in weights {
        cumulative += weight;
        if roll < cumulative {
            return *choice;
        }
    }
    weights[weights.len() - 1].0
}

// ============================================================================
// Batter rules
// ============================================================================

pub static BATTING_RULES: [DecisionRule<BattingApproach>; 7] = [
    DecisionRule {
        name: "down_big",
        confidence: 0.90,
        applies: |c| c.score_diff <= -4,
        weights: &[(Power, 0.75), (Contact, 0.25)],
    },
    DecisionRule {
        name: "runner_on_third",
        confidence: 0.85,
        applies: |c| c.runner_on_third_less_than_two_outs(),
        weights: &[(Contact, 0.80), (Power, 0.20)],
    },
    DecisionRule {
        name: "bases_loaded",
        confidence: 0.80,
        applies: |c| c.bases.is_loaded(),
        weights: &[(Power, 0.60), (Contact, 0.40)],
    },
    DecisionRule {
        name: "late_and_close_trailing",
        confidence: 0.75,
        applies: |c| c.inning >= 7 && (-3..=-1).contains(&c.score_diff),
        weights: &[(Power, 0.55), (Contact, 0.30), (Patient, 0.15)],
    },
    DecisionRule {
        name: "protect_lead",
        confidence: 0.70,
        applies: |c| c.score_diff >= 3,
        weights: &[(Contact, 0.60), (Patient, 0.40)],
    },
    DecisionRule {
        name: "two_outs_empty",
        confidence: 0.65,
        applies: DecisionContext::two_outs_empty,
        weights: &[(Power, 0.60), (Patient, 0.25), (Contact, 0.15)],
    },
    DecisionRule {
        name: "tired_pitcher",
        confidence: 0.60,
        applies: |c| c.pitcher_fatigue >= FatigueLevel::Tired,
        weights: &[(Patient, 0.60), (Contact, 0.25), (Power, 0.15)],
    },
];

pub static BATTING_FALLBACK: [(BattingApproach, f64); 3] =
    [(Contact, 45.0), (Power, 30.0), (Patient, 25.0)];

// ============================================================================
// Pitcher rules
// ============================================================================

pub static PITCHING_RULES: [DecisionRule<PitchingStrategy>; 8] = [
    DecisionRule {
        name: "big_lead",
        confidence: 0.90,
        applies: |c| c.fielding_lead() >= 4,
        weights: &[(Challenge, 0.75), (Finesse, 0.25)],
    },
    DecisionRule {
        name: "power_hitter",
        confidence: 0.85,
        applies: |c| c.batter_power >= 75,
        weights: &[(Paint, 0.60), (Finesse, 0.30), (Challenge, 0.10)],
    },
    DecisionRule {
        name: "bases_loaded",
        confidence: 0.80,
        applies: |c| c.bases.is_loaded(),
        weights: &[(Challenge, 0.60), (Finesse, 0.40)],
    },
    DecisionRule {
        name: "runner_on_third",
        confidence: 0.78,
        applies: |c| c.runner_on_third_less_than_two_outs(),
        weights: &[(Paint, 0.50), (Finesse, 0.30), (Challenge, 0.20)],
    },
    DecisionRule {
        name: "contact_hitter",
        confidence: 0.72,
        applies: |c| c.batter_contact >= 75,
        weights: &[(Finesse, 0.60), (Paint, 0.25), (Challenge, 0.15)],
    },
    DecisionRule {
        name: "tiring",
        confidence: 0.68,
        applies: |c| c.pitcher_fatigue >= FatigueLevel::Tired,
        weights: &[(Finesse, 0.55), (Challenge, 0.45)],
    },
    DecisionRule {
        name: "trailing",
        confidence: 0.60,
        applies: |c| c.fielding_lead() <= -3,
        weights: &[(Challenge, 0.50), (Finesse, 0.30), (Paint, 0.20)],
    },
    DecisionRule {
        name: "two_outs_empty",
        confidence: 0.55,
        applies: DecisionContext::two_outs_empty,
        weights: &[(Challenge, 0.70), (Finesse, 0.30)],
    },
];

pub static PITCHING_FALLBACK: [(PitchingStrategy, f64); 3] =
    [(Challenge, 40.0), (Finesse, 35.0), (Paint, 25.0)];

// ============================================================================
// Selection
// ============================================================================

/// First matching rule wins. Returns the choice and the rule name
/// (`"fallback"` when none matched). Exactly one draw.
pub fn select<T, R>(
    rules: &[DecisionRule<T>],
    fallback: &[(T, f64)],
    ctx: &DecisionContext,
    rng: &mut R,
) -> (T, &'static str)
where
    T: DecisionOption,
    R: RandomProvider + ?Sized,
{
    for rule in rules {
        if let Some(choice) = rule.evaluate(ctx, rng) {
            return (choice, rule.name);
        }
    }
    (sample_weighted(fallback, rng), "fallback")
}

pub fn select_batting_approach<R>(ctx: &DecisionContext, rng: &mut R) -> BattingApproach
where
    R: RandomProvider + ?Sized,
{
    select(&BATTING_RULES, &BATTING_FALLBACK, ctx, rng).0
}

pub fn select_pitching_strategy<R>(ctx: &DecisionContext, rng: &mut R) -> PitchingStrategy
where
    R: RandomProvider + ?Sized,
{
    select(&PITCHING_RULES, &PITCHING_FALLBACK, ctx, rng).0
}
