//! Match state machine
//!
//! ```text
//!  initialize_match(my, opp, rng)
//!          │
//!          ▼
//!   ┌─────────────┐  apply_decision   ┌──────────────┐  3 outs   ┌──────────────┐
//!   │   PreGame   │ ────────────────► │  InProgress  │ ────────► │ HalfComplete │
//!   └─────────────┘                   └──────────────┘ ◄──────── └──────────────┘
//!                                            │        apply_decision     │
//!                                  walk-off  │                           │ game over
//!                                            ▼                           ▼
//!                                       ┌───────────────────────────────────┐
//!                                       │            GameComplete           │
//!                                       └───────────────────────────────────┘
//! ```
//!
//! `apply_decision` never mutates its input. It clones the state, plays one
//! plate appearance on the clone and returns it. A completed state comes back
//! unchanged.
//!
//! ## One plate appearance
//! 1. Record the decision in the repeat counters
//! 2. Combine approach, strategy and repetition penalties into modifiers
//! 3. Resolve the outcome (one draw in the stock resolver)
//! 4. Advance runners, then the extra-base pass if the half is still alive
//! 5. Score, box score, batting order, pitcher fatigue, play-by-play
//! 6. Walk-off check, then half-inning close or the at-bat cap

pub mod batch;
pub mod session;
pub mod state;
mod transitions;

pub use batch::{simulate_batch, simulate_match, BatchSummary};
pub use session::{DecisionPrompt, HumanRole, MatchSession, SessionStep};
pub use state::{MatchPhase, MatchState, TeamState};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::config::{EngineConfig, RewardConfig};
use crate::engine::base_state::{
    advance_runners, resolve_extra_base_attempts, ExtraBaseAttempt, MAX_OUTS,
};
use crate::engine::decision::adaptation::{batter_penalty, pitcher_penalty};
use crate::engine::decision::Decision;
use crate::engine::fatigue::{fatigue_delta, FatigueLevel};
use crate::engine::leverage::leverage_index;
use crate::engine::outcome::{AtBatInput, OutcomeKind, OutcomeModifiers, OutcomeResolver};
use crate::engine::outcome::StatOutcomeResolver;
use crate::engine::rng::MatchRng;
use crate::models::{
    Half, MatchDiagnostic, MatchResult, PlateAppearance, PlayByPlayEvent, Roster, TeamSide,
};
use crate::narrative::{NarrativeContext, NarrativeGenerator, PlainNarrator};

/// What happened inside one `apply_decision`, for debugging and replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtBatTrace {
    pub inning: u32,
    pub half: Half,
    pub outs_before: u8,
    pub bases_before: u8,
    pub leverage_before: f64,
    pub pitcher_fatigue: FatigueLevel,
    pub modifiers: OutcomeModifiers,
    pub batting_penalty: f64,
    pub pitching_penalty: f64,
    pub outcome: OutcomeKind,
    pub runs_scored: u8,
    pub extra_base_attempts: Vec<ExtraBaseAttempt>,
    pub rng_draws_before: u64,
    pub rng_draws_after: u64,
}

pub struct MatchEngine {
    config: EngineConfig,
    resolver: Box<dyn OutcomeResolver>,
    narrator: Box<dyn NarrativeGenerator>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            resolver: Box::new(StatOutcomeResolver),
            narrator: Box::new(PlainNarrator),
        }
    }

    pub fn with_resolver(mut self, resolver: impl OutcomeResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_narrator(mut self, narrator: impl NarrativeGenerator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Sets up a game. A roster without batters or pitchers produces a state
    /// that is already complete, with an `InvalidRoster` diagnostic.
    pub fn initialize_match(
        &self,
        my_roster: impl Into<Arc<Roster>>,
        opponent_roster: impl Into<Arc<Roster>>,
        rng: MatchRng,
    ) -> MatchState {
        let my_side = if self.config.my_team_is_home {
            TeamSide::Home
        } else {
            TeamSide::Away
        };
        let mine = TeamState::new(my_side, my_roster.into());
        let theirs = TeamState::new(my_side.opponent(), opponent_roster.into());
        let (home, away) = match my_side {
            TeamSide::Home => (mine, theirs),
            TeamSide::Away => (theirs, mine),
        };

        let mut state = MatchState::new(home, away, my_side, rng);
        for side in [TeamSide::Away, TeamSide::Home] {
            if let Some(reason) = state.team(side).roster_problem() {
                warn!(side = ?side, team = state.team(side).name(), reason, "invalid roster");
                state.diagnostics.push(MatchDiagnostic::InvalidRoster {
                    side,
                    reason: reason.to_string(),
                });
            }
        }
        if !state.diagnostics.is_empty() {
            state.is_complete = true;
            state.phase = MatchPhase::GameComplete;
        }
        state
    }

    pub fn initialize_match_with_seed(
        &self,
        my_roster: impl Into<Arc<Roster>>,
        opponent_roster: impl Into<Arc<Roster>>,
        seed: u64,
    ) -> MatchState {
        self.initialize_match(my_roster, opponent_roster, MatchRng::seeded(seed))
    }

    pub fn apply_decision(&self, state: &MatchState, decision: &Decision) -> MatchState {
        self.apply_decision_traced(state, decision).0
    }

    /// Same as [`apply_decision`](Self::apply_decision), plus what happened.
    /// The trace is `None` when the game was already over.
    pub fn apply_decision_traced(
        &self,
        state: &MatchState,
        decision: &Decision,
    ) -> (MatchState, Option<AtBatTrace>) {
        let mut next = state.clone();
        if next.is_complete {
            return (next, None);
        }
        let leverage_before = self.compute_leverage_index(&next);
        let rng_draws_before = next.rng.draws();

        next.phase = MatchPhase::InProgress;
        next.inning_complete = false;
        next.adaptation.record(decision);

        let batting_side = next.half.batting_side();
        let fielding_side = batting_side.opponent();
        let batting_roster = Arc::clone(&next.team(batting_side).roster);
        let fielding_roster = Arc::clone(&next.team(fielding_side).roster);

        let lineup_slot = next.team(batting_side).batting_order_index;
        let batter = next
            .team(batting_side)
            .lineup
            .get(lineup_slot)
            .and_then(|&idx| batting_roster.player(idx));
        let staff_slot = next.team(fielding_side).pitcher.staff_slot;
        let pitcher = next
            .team(fielding_side)
            .staff
            .get(staff_slot)
            .and_then(|&idx| fielding_roster.player(idx));
        let (Some(batter), Some(pitcher)) = (batter, pitcher) else {
            warn!("missing batter or pitcher, ending game");
            next.diagnostics.push(MatchDiagnostic::InvalidRoster {
                side: if batter.is_none() { batting_side } else { fielding_side },
                reason: "lineup or staff slot out of range".to_string(),
            });
            transitions::finish_game(&mut next);
            return (next, None);
        };

        // Modifiers: approach x strategy x repetition penalties.
        let mut modifiers = OutcomeModifiers::NEUTRAL;
        let mut batting_penalty = 1.0;
        let mut pitching_penalty = 1.0;
        if let Some(approach) = decision.approach {
            modifiers = modifiers.combine(approach.modifiers());
        }
        if let Some(strategy) = decision.strategy {
            modifiers = modifiers.combine(strategy.modifiers());
        }
        if self.config.adaptation.penalties_enabled {
            if decision.approach.is_some() {
                batting_penalty = next.adaptation.batting.penalty();
                modifiers = batter_penalty(modifiers, batting_penalty);
            }
            if decision.strategy.is_some() {
                pitching_penalty = next.adaptation.pitching.penalty();
                modifiers = pitcher_penalty(modifiers, pitching_penalty);
            }
        }

        let fielding = next.team(fielding_side);
        let pitcher_fatigue = fielding.pitcher.level();
        let mean_defense = fielding.mean_defense;
        let input = AtBatInput {
            batter,
            pitcher,
            defense: mean_defense,
            fatigue: pitcher_fatigue,
            innings_pitched: fielding.pitcher.innings_pitched,
            modifiers,
            abilities: &decision.abilities,
            aim: decision.aim,
        };
        let outcome = self.resolver.resolve(&input, &mut next.rng);

        // Base running.
        let outs_before = next.outs;
        let bases_before = next.bases.occupancy();
        let mut advancement = advance_runners(outcome, next.bases, lineup_slot as u8);
        if outs_before + advancement.outs_added < MAX_OUTS {
            let speeds: Vec<f64> = next
                .team(batting_side)
                .lineup
                .iter()
                .map(|&idx| {
                    batting_roster
                        .player(idx)
                        .map_or(50.0, |p| p.batting.speed as f64)
                })
                .collect();
            resolve_extra_base_attempts(
                &mut advancement,
                outs_before,
                |runner| speeds.get(runner as usize).copied().unwrap_or(50.0),
                mean_defense,
                &mut next.rng,
            );
        }
        let runs = advancement.runs();
        next.outs = (outs_before + advancement.outs_added).min(MAX_OUTS);
        next.bases = advancement.bases;

        // Score and lineup.
        let inning = next.inning;
        let half = next.half;
        {
            let team = next.team_mut(batting_side);
            team.runs += runs as u32;
            if outcome.is_hit() {
                team.hits += 1;
            }
            team.batting_order_index = (lineup_slot + 1) % team.lineup.len();
        }
        next.line_score.add_runs(inning, half, runs as u32);
        next.box_score.record(PlateAppearance {
            batting_side,
            lineup_slot,
            staff_slot,
            outcome,
            scorers: &advancement.scorers,
            outs_recorded: advancement.outs_added,
        });

        {
            let workload = &mut next.team_mut(fielding_side).pitcher;
            workload.add_extra(fatigue_delta(
                decision.approach,
                decision.strategy,
                &self.config.fatigue,
            ));
            workload.batters_faced += 1;
        }
        next.at_bats_this_half += 1;

        let walk_off = transitions::check_walk_off(&mut next);

        let description = self.narrator.describe(
            outcome,
            &NarrativeContext {
                batter_name: &batter.name,
                pitcher_name: &pitcher.name,
                inning,
                half,
                runs_scored: runs,
                outs_after: next.outs,
                walk_off,
            },
        );
        next.play_by_play.push(PlayByPlayEvent {
            inning,
            half,
            batter_name: batter.name.clone(),
            pitcher_name: pitcher.name.clone(),
            outcome,
            rbi: (runs > 0).then_some(runs),
            outs_after: next.outs,
            approach_used: decision.approach,
            strategy_used: decision.strategy,
            extra_base_attempts: advancement.attempts.clone(),
            home_score: next.home.runs,
            away_score: next.away.runs,
            description,
        });

        if !walk_off
            && (next.outs >= MAX_OUTS || transitions::enforce_at_bat_cap(&mut next, &self.config))
        {
            transitions::close_half(&mut next, &self.config);
        }

        let trace = AtBatTrace {
            inning,
            half,
            outs_before,
            bases_before,
            leverage_before,
            pitcher_fatigue,
            modifiers,
            batting_penalty,
            pitching_penalty,
            outcome,
            runs_scored: runs,
            extra_base_attempts: advancement.attempts,
            rng_draws_before,
            rng_draws_after: next.rng.draws(),
        };
        (next, Some(trace))
    }

    // ========================================================================
    // Leverage
    // ========================================================================

    pub fn compute_leverage_index(&self, state: &MatchState) -> f64 {
        if state.is_complete {
            return 0.0;
        }
        leverage_index(&state.situation())
    }

    pub fn is_high_leverage(&self, state: &MatchState) -> bool {
        !state.is_complete
            && self.compute_leverage_index(state) >= self.config.leverage.threshold_for(state.inning)
    }

    // ========================================================================
    // Result
    // ========================================================================

    pub fn finalize_match(&self, state: &MatchState, reward: &RewardConfig) -> MatchResult {
        let my_runs = state.my_team().runs;
        let opponent_runs = state.opponent_team().runs;
        let is_win = my_runs > opponent_runs;
        let invalid = state
            .diagnostics
            .iter()
            .any(|d| matches!(d, MatchDiagnostic::InvalidRoster { .. }));
        let played = !state.play_by_play.is_empty();

        let cash_earned = if invalid || !played {
            0
        } else {
            reward.payout(my_runs, is_win, state.walk_off)
        };

        MatchResult {
            my_side: state.my_side,
            my_runs,
            opponent_runs,
            is_win,
            cash_earned,
            total_innings: if played { state.inning } else { 0 },
            walk_off: state.walk_off,
            play_by_play: state.play_by_play.clone(),
            box_score: state.box_score.clone(),
            line_score: state.line_score.clone(),
            diagnostics: state.diagnostics.clone(),
        }
    }
}
