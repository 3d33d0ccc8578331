//! Match engine
//!
//! Leaves first: `rng` → `outcome` / `base_state` / `fatigue` → `decision` →
//! `win_expectancy` → `leverage` → `match_sim`.

pub mod base_state;
pub mod decision;
pub mod fatigue;
pub mod leverage;
pub mod match_sim;
pub mod outcome;
pub mod rng;
pub mod win_expectancy;

pub use base_state::{advance_runners, resolve_extra_base_attempts, Advancement, Base, BaseState};
pub use decision::{AdaptiveAi, BattingApproach, Decision, DecisionContext, PitchingStrategy};
pub use fatigue::{fatigue_level, FatigueLevel, PitcherWorkload};
pub use leverage::{leverage_index, AVG_PA_WE_SWING};
pub use match_sim::{
    simulate_batch, simulate_match, AtBatTrace, BatchSummary, MatchEngine, MatchPhase,
    MatchSession, MatchState, SessionStep,
};
pub use outcome::{AtBatInput, OutcomeKind, OutcomeModifiers, OutcomeResolver, StatOutcomeResolver};
pub use rng::{ChaChaRandom, MatchRng, MockRandom, RandomProvider, SeededRandom};
pub use win_expectancy::{win_expectancy, GameSituation};
