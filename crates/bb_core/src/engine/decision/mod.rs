//! Adaptive decision layer
//!
//! Two independent axes are decided every plate appearance:
//! - batter approach: [`BattingApproach`] (power / contact / patient)
//! - pitcher strategy: [`PitchingStrategy`] (challenge / finesse / paint)
//!
//! Selection is a priority-ordered rule list per axis ([`rules`]), followed by
//! the repetition override ([`adaptation`]) that pushes the AI off a choice it
//! keeps repeating. The match state machine only *tracks* the repeat counters;
//! choosing is done by [`AdaptiveAi`] or by a human.

pub mod adaptation;
pub mod ai;
pub mod rules;

pub use adaptation::{apply_adaptation_override, penalty_multiplier, switch_probability};
pub use ai::AdaptiveAi;
pub use rules::{select_batting_approach, select_pitching_strategy, DecisionContext};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::outcome::OutcomeModifiers;

/// One value on a decision axis.
pub trait DecisionOption: Copy + Eq + Debug + 'static {
    const ALL: [Self; 3];

    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattingApproach {
    Power,
    Contact,
    Patient,
}

impl DecisionOption for BattingApproach {
    const ALL: [Self; 3] = [
        BattingApproach::Power,
        BattingApproach::Contact,
        BattingApproach::Patient,
    ];

    fn label(&self) -> &'static str {
        match self {
            BattingApproach::Power => "power",
            BattingApproach::Contact => "contact",
            BattingApproach::Patient => "patient",
        }
    }
}

impl BattingApproach {
    pub fn modifiers(self) -> OutcomeModifiers {
        match self {
            BattingApproach::Power => OutcomeModifiers::new(0.90, 1.25, 0.90, 1.50),
            BattingApproach::Contact => OutcomeModifiers::new(1.15, 0.70, 0.90, 0.60),
            BattingApproach::Patient => OutcomeModifiers::new(0.95, 1.05, 1.50, 0.90),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchingStrategy {
    Challenge,
    Finesse,
    Paint,
}

impl DecisionOption for PitchingStrategy {
    const ALL: [Self; 3] = [
        PitchingStrategy::Challenge,
        PitchingStrategy::Finesse,
        PitchingStrategy::Paint,
    ];

    fn label(&self) -> &'static str {
        match self {
            PitchingStrategy::Challenge => "challenge",
            PitchingStrategy::Finesse => "finesse",
            PitchingStrategy::Paint => "paint",
        }
    }
}

impl PitchingStrategy {
    pub fn modifiers(self) -> OutcomeModifiers {
        match self {
            PitchingStrategy::Challenge => OutcomeModifiers::new(1.10, 1.00, 0.70, 1.10),
            PitchingStrategy::Finesse => OutcomeModifiers::new(0.95, 0.95, 1.00, 0.90),
            PitchingStrategy::Paint => OutcomeModifiers::new(0.90, 1.25, 1.30, 0.85),
        }
    }
}

/// Strike-zone cell (3x3, row 0 = high) for the aim/read minigame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneCell {
    pub row: u8,
    pub col: u8,
}

impl ZoneCell {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 3 && col < 3).then_some(Self { row, col })
    }
}

/// Input for one plate appearance. Consumed by exactly one `apply_decision`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub approach: Option<BattingApproach>,
    #[serde(default)]
    pub strategy: Option<PitchingStrategy>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub aim: Option<ZoneCell>,
}

impl Decision {
    pub fn new(approach: Option<BattingApproach>, strategy: Option<PitchingStrategy>) -> Self {
        Self {
            approach,
            strategy,
            ..Default::default()
        }
    }

    pub fn batting(approach: BattingApproach) -> Self {
        Self::new(Some(approach), None)
    }

    pub fn pitching(strategy: PitchingStrategy) -> Self {
        Self::new(None, Some(strategy))
    }
}

/// Repeat tracking for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisAdaptation<T> {
    pub last_decision: Option<T>,
    pub consecutive_count: u32,
}

impl<T> Default for AxisAdaptation<T> {
    fn default() -> Self {
        Self {
            last_decision: None,
            consecutive_count: 0,
        }
    }
}

impl<T: DecisionOption> AxisAdaptation<T> {
    pub fn record(&mut self, choice: T) {
        if self.last_decision == Some(choice) {
            self.consecutive_count += 1;
        } else {
            self.last_decision = Some(choice);
            self.consecutive_count = 1;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Effectiveness multiplier for the current streak.
    pub fn penalty(&self) -> f64 {
        penalty_multiplier(self.consecutive_count)
    }
}

/// Repeat counters for both axes of the current half-inning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationState {
    pub batting: AxisAdaptation<BattingApproach>,
    pub pitching: AxisAdaptation<PitchingStrategy>,
}

impl AdaptationState {
    /// Records whichever axes the decision sets. An unset axis keeps its streak.
    pub fn record(&mut self, decision: &Decision) {
        if let Some(approach) = decision.approach {
            self.batting.record(approach);
        }
        if let Some(strategy) = decision.strategy {
            self.pitching.record(strategy);
        }
    }

    pub fn reset(&mut self) {
        self.batting.reset();
        self.pitching.reset();
    }
}
