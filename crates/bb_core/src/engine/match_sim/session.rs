//! Stepped match driver
//!
//! The AI plays both sides until a plate appearance is tense enough to hand
//! to the player, then waits for `resume_with_decision`.
//!
//! ## Functions
//! - `simulate_until_intervention()` - auto-play up to the next pause
//! - `resume_with_decision()` - play the player's call, then continue
//! - `run_to_completion()` - auto-play everything, no pauses

use serde::{Deserialize, Serialize};

use super::{MatchEngine, MatchState};
use crate::config::RewardConfig;
use crate::engine::decision::{AdaptiveAi, Decision};
use crate::engine::win_expectancy::GameSituation;
use crate::models::MatchResult;

/// Which decision axis the player owns for the paused plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanRole {
    Batting,
    Pitching,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPrompt {
    pub role: HumanRole,
    pub situation: GameSituation,
    pub leverage_index: f64,
    pub batter_name: String,
    pub pitcher_name: String,
    /// What the AI would have done on the player's axis.
    pub suggestion: Decision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    AwaitingDecision(DecisionPrompt),
    Complete,
}

pub struct MatchSession<'e> {
    engine: &'e MatchEngine,
    state: MatchState,
    ai: AdaptiveAi,
    pending: Option<DecisionPrompt>,
    pauses: u32,
}

impl<'e> MatchSession<'e> {
    /// The AI stream is derived from `ai_seed`, separate from the match RNG.
    /// `ai_seed` is ignored when `state` already carries an AI stream.
    pub fn new(engine: &'e MatchEngine, mut state: MatchState, ai_seed: u64) -> Self {
        let ai = match state.ai_rng.clone() {
            Some(rng) => AdaptiveAi::with_rng(rng),
            None => AdaptiveAi::new(ai_seed),
        }
        .with_config(&engine.config().adaptation);
        state.ai_rng = Some(ai.rng().clone());
        Self {
            engine,
            state,
            ai,
            pending: None,
            pauses: 0,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn pending(&self) -> Option<&DecisionPrompt> {
        self.pending.as_ref()
    }

    /// How many times the session has paused for the player.
    pub fn pauses(&self) -> u32 {
        self.pauses
    }

    pub fn simulate_until_intervention(&mut self) -> SessionStep {
        if let Some(prompt) = &self.pending {
            return SessionStep::AwaitingDecision(prompt.clone());
        }
        while !self.state.is_complete {
            if self.engine.is_high_leverage(&self.state) {
                if let Some(prompt) = self.build_prompt() {
                    self.pauses += 1;
                    self.pending = Some(prompt.clone());
                    return SessionStep::AwaitingDecision(prompt);
                }
            }
            self.play_ai_turn();
        }
        SessionStep::Complete
    }

    /// Plays the player's axis from `decision`; the AI fills in the other one.
    pub fn resume_with_decision(&mut self, decision: Decision) -> SessionStep {
        let Some(prompt) = self.pending.take() else {
            return self.simulate_until_intervention();
        };
        let Some(ctx) = self.state.decision_context() else {
            return SessionStep::Complete;
        };

        let combined = match prompt.role {
            HumanRole::Batting => Decision {
                strategy: Some(self.ai.choose_strategy(&ctx, &self.state.adaptation.pitching)),
                ..decision
            },
            HumanRole::Pitching => Decision {
                approach: Some(self.ai.choose_approach(&ctx, &self.state.adaptation.batting)),
                ..decision
            },
        };
        self.apply(&combined);
        self.simulate_until_intervention()
    }

    pub fn run_to_completion(mut self, reward: &RewardConfig) -> MatchResult {
        while !self.state.is_complete {
            self.play_ai_turn();
        }
        self.engine.finalize_match(&self.state, reward)
    }

    pub fn finish(self, reward: &RewardConfig) -> MatchResult {
        self.engine.finalize_match(&self.state, reward)
    }

    fn play_ai_turn(&mut self) {
        let decision = match self.state.decision_context() {
            Some(ctx) => self.ai.decide(&ctx, &self.state.adaptation),
            None => Decision::default(),
        };
        self.apply(&decision);
    }

    fn apply(&mut self, decision: &Decision) {
        self.state = self.engine.apply_decision(&self.state, decision);
        self.state.ai_rng = Some(self.ai.rng().clone());
    }

    fn build_prompt(&mut self) -> Option<DecisionPrompt> {
        let ctx = self.state.decision_context()?;
        let batter_name = self.state.batting_team().current_batter()?.name.clone();
        let pitcher_name = self.state.fielding_team().current_pitcher()?.name.clone();
        let role = if self.state.is_my_team_batting() {
            HumanRole::Batting
        } else {
            HumanRole::Pitching
        };

        // Suggestions come from a fork so they don't consume the AI stream.
        let mut advisor = self.ai.clone();
        let suggestion = match role {
            HumanRole::Batting => Decision::batting(
                advisor.choose_approach(&ctx, &self.state.adaptation.batting),
            ),
            HumanRole::Pitching => Decision::pitching(
                advisor.choose_strategy(&ctx, &self.state.adaptation.pitching),
            ),
        };

        Some(DecisionPrompt {
            role,
            situation: self.state.situation(),
            leverage_index: self.engine.compute_leverage_index(&self.state),
            batter_name,
            pitcher_name,
            suggestion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decision::{BattingApproach, PitchingStrategy};
    use crate::models::demo_roster;

    #[test]
    fn test_session_pauses_and_finishes() {
        let engine = MatchEngine::default();
        let state = engine.initialize_match_with_seed(
            demo_roster("Mine", 60),
            demo_roster("Theirs", 60),
            12,
        );
        let mut session = MatchSession::new(&engine, state, 12);

        let mut step = session.simulate_until_intervention();
        let mut guard = 0;
        while let SessionStep::AwaitingDecision(prompt) = step {
            let threshold = engine.config().leverage.threshold_for(prompt.situation.inning);
            assert!(prompt.leverage_index >= threshold);
            let decision = match prompt.role {
                HumanRole::Batting => Decision::batting(BattingApproach::Contact),
                HumanRole::Pitching => Decision::pitching(PitchingStrategy::Paint),
            };
            step = session.resume_with_decision(decision);
            guard += 1;
            assert!(guard < 500);
        }
        assert!(session.state().is_complete);
        assert_eq!(session.pauses(), guard);
    }

    #[test]
    fn test_pending_prompt_is_repeated() {
        let engine = MatchEngine::default();
        for seed in 0..20 {
            let state =
                engine.initialize_match_with_seed(demo_roster("A", 55), demo_roster("B", 55), seed);
            let mut session = MatchSession::new(&engine, state, seed);
            if let SessionStep::AwaitingDecision(first) = session.simulate_until_intervention() {
                let again = session.simulate_until_intervention();
                assert_eq!(again, SessionStep::AwaitingDecision(first));
                return;
            }
        }
        panic!("no seed produced a high-leverage pause");
    }

    #[test]
    fn test_run_to_completion_matches_manual_loop() {
        let engine = MatchEngine::default();
        let state = engine.initialize_match_with_seed(demo_roster("A", 50), demo_roster("B", 50), 7);
        let auto =
            MatchSession::new(&engine, state.clone(), 99).run_to_completion(&RewardConfig::default());

        let mut ai = AdaptiveAi::new(99);
        let mut manual = state;
        while let Some(ctx) = manual.decision_context() {
            let decision = ai.decide(&ctx, &manual.adaptation);
            manual = engine.apply_decision(&manual, &decision);
        }
        assert_eq!(engine.finalize_match(&manual, &RewardConfig::default()), auto);
    }

    #[test]
    fn test_saved_state_resumes_same_ai_stream() {
        let engine = MatchEngine::default();
        let reward = RewardConfig::default();
        let state = engine.initialize_match_with_seed(demo_roster("A", 50), demo_roster("B", 50), 5);
        let straight = MatchSession::new(&engine, state.clone(), 5).run_to_completion(&reward);

        let mut first = MatchSession::new(&engine, state, 5);
        for _ in 0..20 {
            first.play_ai_turn();
        }
        assert!(!first.state().is_complete);
        let json = serde_json::to_string(first.state()).unwrap();
        let restored: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, first.state());
        assert_eq!(restored.ai_rng.as_ref().map(|r| r.draws()), Some(first.ai.draws()));

        // A different seed must not matter once the state carries the stream.
        let mut resumed = MatchSession::new(&engine, restored, 12345);
        while !resumed.state().is_complete {
            resumed.play_ai_turn();
        }
        assert_eq!(resumed.finish(&reward), straight);
    }
}
