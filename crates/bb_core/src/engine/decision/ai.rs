//! AI decision maker
//!
//! Rule selection followed by the repetition override, per axis. The AI draws
//! from its own stream so its choices never shift the match RNG.

use super::adaptation::apply_adaptation_override;
use super::rules::{select_batting_approach, select_pitching_strategy, DecisionContext};
use super::{AdaptationState, AxisAdaptation, BattingApproach, Decision, PitchingStrategy};
use crate::config::AdaptationConfig;
use crate::engine::rng::{MatchRng, RandomProvider};

/// Mixed into the match seed to derive the AI stream.
pub const AI_STREAM_SALT: u64 = 0x5eed_a1a1_0b5e_ba11;

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveAi {
    rng: MatchRng,
    override_enabled: bool,
}

impl AdaptiveAi {
    pub fn new(match_seed: u64) -> Self {
        Self::with_rng(MatchRng::seeded(match_seed ^ AI_STREAM_SALT))
    }

    pub fn with_rng(rng: MatchRng) -> Self {
        Self {
            rng,
            override_enabled: true,
        }
    }

    pub fn with_config(mut self, config: &AdaptationConfig) -> Self {
        self.override_enabled = config.override_enabled;
        self
    }

    pub fn choose_approach(
        &mut self,
        ctx: &DecisionContext,
        history: &AxisAdaptation<BattingApproach>,
    ) -> BattingApproach {
        let choice = select_batting_approach(ctx, &mut self.rng);
        self.adapt(choice, history)
    }

    pub fn choose_strategy(
        &mut self,
        ctx: &DecisionContext,
        history: &AxisAdaptation<PitchingStrategy>,
    ) -> PitchingStrategy {
        let choice = select_pitching_strategy(ctx, &mut self.rng);
        self.adapt(choice, history)
    }

    /// Both axes, batter first.
    pub fn decide(&mut self, ctx: &DecisionContext, adaptation: &AdaptationState) -> Decision {
        let approach = self.choose_approach(ctx, &adaptation.batting);
        let strategy = self.choose_strategy(ctx, &adaptation.pitching);
        Decision::new(Some(approach), Some(strategy))
    }

    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }

    pub fn rng(&self) -> &MatchRng {
        &self.rng
    }

    fn adapt<T: super::DecisionOption>(&mut self, choice: T, history: &AxisAdaptation<T>) -> T {
        if !self.override_enabled {
            return choice;
        }
        apply_adaptation_override(choice, history, &mut self.rng)
    }
}

impl RandomProvider for AdaptiveAi {
    fn random(&mut self) -> f64 {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decision::DecisionOption;

    fn repeated<T: DecisionOption>(choice: T, count: u32) -> AxisAdaptation<T> {
        AxisAdaptation {
            last_decision: Some(choice),
            consecutive_count: count,
        }
    }

    /// Counts how often the AI leaves `choice` when its rules picked it.
    fn switch_rate(count: u32, trials: usize) -> usize {
        let ctx = DecisionContext::default();
        let mut ai = AdaptiveAi::new(77);
        let mut switched = 0;
        let mut considered = 0;
        while considered < trials {
            // Fallback favors contact; only trials where rules picked contact count.
            let picked = select_batting_approach(&ctx, &mut ai);
            if picked != BattingApproach::Contact {
                continue;
            }
            considered += 1;
            let history = repeated(BattingApproach::Contact, count);
            if ai.adapt(picked, &history) != BattingApproach::Contact {
                switched += 1;
            }
        }
        switched
    }

    #[test]
    fn test_count_three_switches_95_percent() {
        assert!(switch_rate(3, 1000) >= 920);
    }

    #[test]
    fn test_count_two_switches_80_percent() {
        assert!(switch_rate(2, 100) >= 65);
    }

    #[test]
    fn test_count_one_has_no_forced_bias() {
        assert_eq!(switch_rate(1, 200), 0);

        // Neutral context, streak of 1: frequencies match the fallback weights.
        let ctx = DecisionContext::default();
        let mut ai = AdaptiveAi::new(9);
        let history = repeated(BattingApproach::Power, 1);
        let trials = 3000;
        let power = (0..trials)
            .filter(|_| ai.choose_approach(&ctx, &history) == BattingApproach::Power)
            .count() as f64
            / trials as f64;
        assert!((0.2..=0.4).contains(&power), "power {power}");
    }

    #[test]
    fn test_ai_is_deterministic_per_seed() {
        let ctx = DecisionContext::default();
        let state = AdaptationState::default();
        let mut a = AdaptiveAi::new(5);
        let mut b = AdaptiveAi::new(5);
        for _ in 0..50 {
            assert_eq!(a.decide(&ctx, &state), b.decide(&ctx, &state));
        }
    }

    #[test]
    fn test_disabled_override_keeps_choice() {
        let config = AdaptationConfig {
            override_enabled: false,
            penalties_enabled: true,
        };
        let mut ai = AdaptiveAi::new(1).with_config(&config);
        let history = repeated(PitchingStrategy::Finesse, 9);
        for _ in 0..100 {
            assert_eq!(ai.adapt(PitchingStrategy::Finesse, &history), PitchingStrategy::Finesse);
        }
    }
}
