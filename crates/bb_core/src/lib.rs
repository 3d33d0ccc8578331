//! # bb_core - Deterministic Baseball Match Engine
//!
//! Turn-based baseball simulation where every random draw comes from a
//! seeded stream: the same rosters, seed and decisions replay the same game.
//!
//! ## Features
//! - Plate-appearance resolution with base running and pitcher fatigue
//! - Rule-based AI with a repetition override and penalty scale
//! - Poisson win expectancy and a normalized leverage index
//! - Human-in-the-loop sessions that pause on high-leverage moments
//! - JSON API and parallel batch simulation
//!
//! ## Quick start
//! ```no_run
//! use bb_core::{demo_roster, simulate_match, MatchEngine, RewardConfig};
//! use std::sync::Arc;
//!
//! let engine = MatchEngine::default();
//! let result = simulate_match(
//!     &engine,
//!     Arc::new(demo_roster("Harbor Cats", 60)),
//!     Arc::new(demo_roster("Mill Town", 55)),
//!     42,
//!     &RewardConfig::default(),
//! );
//! println!("{}", result.summary());
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod narrative;

pub use api::{simulate_match_json, MatchRequest, MatchResponse, SCHEMA_VERSION};
pub use config::{EngineConfig, RewardConfig};
pub use engine::decision::{BattingApproach, Decision, PitchingStrategy};
pub use engine::match_sim::{
    simulate_batch, simulate_match, AtBatTrace, BatchSummary, DecisionPrompt, HumanRole,
    MatchEngine, MatchSession, MatchState, SessionStep,
};
pub use engine::outcome::{OutcomeKind, OutcomeResolver, StatOutcomeResolver};
pub use engine::rng::{MatchRng, MockRandom, RandomProvider, SeededRandom};
pub use error::{MatchError, Result};
pub use models::{demo_roster, MatchResult, PlayByPlayEvent, Roster, TeamSide};
pub use narrative::{NarrativeGenerator, PlainNarrator};
