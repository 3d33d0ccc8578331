//! Repetition override and penalty scale
//!
//! An AI that keeps picking the same option gets read and punished. Two
//! mechanisms model that:
//! - the override re-rolls away from a choice already used twice or more in a
//!   row (0.80 at a streak of 2, 0.95 from 3 on)
//! - a repeated choice that does go through loses effectiveness according to
//!   [`PENALTY_SCALE`]

use super::{AxisAdaptation, DecisionOption};
use crate::engine::outcome::OutcomeModifiers;
use crate::engine::rng::RandomProvider;

pub const SWITCH_PROBABILITY_AT_TWO: f64 = 0.80;
pub const SWITCH_PROBABILITY_AT_THREE_PLUS: f64 = 0.95;

/// Effectiveness by streak length, indexed by `min(count - 1, len - 1)`.
pub const PENALTY_SCALE: [f64; 4] = [1.00, 0.90, 0.75, 0.60];

pub fn switch_probability(consecutive_count: u32) -> f64 {
    match consecutive_count {
        0 | 1 => 0.0,
        2 => SWITCH_PROBABILITY_AT_TWO,
        _ => SWITCH_PROBABILITY_AT_THREE_PLUS,
    }
}

/// Applied after rule selection. Draws only when a switch is possible: one
/// draw for the switch roll, one for the replacement pick.
pub fn apply_adaptation_override<T, R>(choice: T, history: &AxisAdaptation<T>, rng: &mut R) -> T
where
    T: DecisionOption,
    R: RandomProvider + ?Sized,
{
    if history.last_decision != Some(choice) || history.consecutive_count < 2 {
        return choice;
    }
    if rng.random() >= switch_probability(history.consecutive_count) {
        return choice;
    }
    let others: Vec<T> = T::ALL.iter().copied().filter(|o| *o != choice).collect();
    let pick = rng.random_int(0, others.len() as i64) as usize;
    others[pick]
}

pub fn penalty_multiplier(consecutive_count: u32) -> f64 {
    if consecutive_count == 0 {
        return 1.0;
    }
    let idx = ((consecutive_count - 1) as usize).min(PENALTY_SCALE.len() - 1);
    PENALTY_SCALE[idx]
}

/// A batter repeating an approach: fewer hits, walks and homers, more strikeouts.
pub fn batter_penalty(modifiers: OutcomeModifiers, multiplier: f64) -> OutcomeModifiers {
    OutcomeModifiers {
        hit: modifiers.hit * multiplier,
        strikeout: modifiers.strikeout / multiplier,
        walk: modifiers.walk * multiplier,
        homerun: modifiers.homerun * multiplier,
    }
}

/// A pitcher repeating a strategy: fewer strikeouts, more of everything else.
pub fn pitcher_penalty(modifiers: OutcomeModifiers, multiplier: f64) -> OutcomeModifiers {
    OutcomeModifiers {
        hit: modifiers.hit / multiplier,
        strikeout: modifiers.strikeout * multiplier,
        walk: modifiers.walk / multiplier,
        homerun: modifiers.homerun / multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decision::{BattingApproach, PitchingStrategy};
    use crate::engine::rng::{MockRandom, SeededRandom};

    fn streak<T: DecisionOption>(choice: T, count: u32) -> AxisAdaptation<T> {
        AxisAdaptation {
            last_decision: Some(choice),
            consecutive_count: count,
        }
    }

    #[test]
    fn test_no_override_below_two() {
        let mut rng = MockRandom::new(vec![0.0]).unwrap();
        let history = streak(BattingApproach::Power, 1);
        let out = apply_adaptation_override(BattingApproach::Power, &history, &mut rng);
        assert_eq!(out, BattingApproach::Power);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_no_override_for_different_choice() {
        let mut rng = MockRandom::new(vec![0.0]).unwrap();
        let history = streak(BattingApproach::Power, 5);
        let out = apply_adaptation_override(BattingApproach::Contact, &history, &mut rng);
        assert_eq!(out, BattingApproach::Contact);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_switch_roll_boundaries() {
        let history = streak(PitchingStrategy::Paint, 2);

        // 0.79 < 0.80: switch, then pick index 0 of [Challenge, Finesse].
        let mut rng = MockRandom::new(vec![0.79, 0.1]).unwrap();
        let out = apply_adaptation_override(PitchingStrategy::Paint, &history, &mut rng);
        assert_eq!(out, PitchingStrategy::Challenge);
        assert_eq!(rng.draws(), 2);

        // 0.80 is not below 0.80: keep.
        let mut rng = MockRandom::new(vec![0.80]).unwrap();
        let out = apply_adaptation_override(PitchingStrategy::Paint, &history, &mut rng);
        assert_eq!(out, PitchingStrategy::Paint);
        assert_eq!(rng.draws(), 1);

        let history = streak(PitchingStrategy::Paint, 3);
        let mut rng = MockRandom::new(vec![0.94, 0.9]).unwrap();
        let out = apply_adaptation_override(PitchingStrategy::Paint, &history, &mut rng);
        assert_eq!(out, PitchingStrategy::Finesse);

        let mut rng = MockRandom::new(vec![0.95]).unwrap();
        let out = apply_adaptation_override(PitchingStrategy::Paint, &history, &mut rng);
        assert_eq!(out, PitchingStrategy::Paint);
    }

    #[test]
    fn test_switch_picks_uniformly_among_others() {
        let history = streak(BattingApproach::Contact, 3);
        let mut rng = SeededRandom::new(31);
        let mut counts = [0u32; 3];
        for _ in 0..2000 {
            let out = apply_adaptation_override(BattingApproach::Contact, &history, &mut rng);
            counts[BattingApproach::ALL.iter().position(|a| *a == out).unwrap()] += 1;
        }
        let [power, contact, patient] = counts;
        assert!(contact < 160, "kept contact {contact} times");
        assert!(power > 800 && patient > 800, "power {power}, patient {patient}");
    }

    #[test]
    fn test_switch_probabilities_exact() {
        assert_eq!(switch_probability(0), 0.0);
        assert_eq!(switch_probability(1), 0.0);
        assert_eq!(switch_probability(2), 0.80);
        assert_eq!(switch_probability(3), 0.95);
        assert_eq!(switch_probability(12), 0.95);
    }

    #[test]
    fn test_penalty_scale_index() {
        assert_eq!(penalty_multiplier(0), 1.0);
        assert_eq!(penalty_multiplier(1), 1.0);
        assert_eq!(penalty_multiplier(2), 0.90);
        assert_eq!(penalty_multiplier(3), 0.75);
        assert_eq!(penalty_multiplier(4), 0.60);
        assert_eq!(penalty_multiplier(40), 0.60);
    }

    #[test]
    fn test_penalties_hurt_the_repeater() {
        let base = OutcomeModifiers::NEUTRAL;
        let batter = batter_penalty(base, 0.75);
        assert!(batter.hit < 1.0 && batter.strikeout > 1.0);
        let pitcher = pitcher_penalty(base, 0.75);
        assert!(pitcher.hit > 1.0 && pitcher.strikeout < 1.0);
        assert_eq!(batter_penalty(base, 1.0), base);
    }
}
