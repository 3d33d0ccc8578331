//! Base occupancy and runner advancement
//!
//! Pure functions from (outcome, bases, outs) to (bases', outs added, runs).
//! Runners are tracked by lineup slot so the extra-base pass can read their
//! speed; [`BaseState::occupancy`] exposes the 3-bit mask (bit 0 = first).
//!
//! ## Passes
//! 1. [`advance_runners`] - forced/standard advancement, no randomness
//! 2. [`resolve_extra_base_attempts`] - speed vs. defense rolls on singles and
//!    doubles, only while fewer than 3 outs are on the board

use serde::{Deserialize, Serialize};

use super::outcome::OutcomeKind;
use super::rng::RandomProvider;

pub const MAX_OUTS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    pub fn index(self) -> usize {
        match self {
            Base::First => 0,
            Base::Second => 1,
            Base::Third => 2,
        }
    }

    /// Next base, `None` = home plate.
    pub fn next(self) -> Option<Base> {
        match self {
            Base::First => Some(Base::Second),
            Base::Second => Some(Base::Third),
            Base::Third => None,
        }
    }
}

/// Runner on each base, identified by batting-order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BaseState {
    runners: [Option<u8>; 3],
}

impl BaseState {
    pub const EMPTY: Self = Self { runners: [None; 3] };

    /// Bases from a 3-bit mask; runners get placeholder slot 0.
    ///
    /// Only for projections that never read runner identity.
    pub fn from_occupancy(mask: u8) -> Self {
        let mut runners = [None; 3];
        for (bit, runner) in runners.iter_mut().enumerate() {
            if mask & (1 << bit) != 0 {
                *runner = Some(0);
            }
        }
        Self { runners }
    }

    pub fn occupancy(&self) -> u8 {
        self.runners
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_some())
            .fold(0u8, |mask, (bit, _)| mask | (1 << bit))
    }

    pub fn runner_on(&self, base: Base) -> Option<u8> {
        self.runners[base.index()]
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.runners[base.index()].is_some()
    }

    pub fn runner_count(&self) -> u8 {
        self.runners.iter().filter(|r| r.is_some()).count() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.occupancy() == 0b111
    }
}

/// A runner who may try for one more base after the primary pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraBaseCandidate {
    pub runner: u8,
    /// Base the runner holds after the primary pass.
    pub from: Base,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraBaseAttempt {
    pub runner: u8,
    pub from: Base,
    pub safe: bool,
}

/// Result of advancing runners for one plate appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    pub bases: BaseState,
    pub outs_added: u8,
    /// Lineup slots that crossed the plate, in order.
    pub scorers: Vec<u8>,
    /// Lead runner first.
    pub candidates: Vec<ExtraBaseCandidate>,
    pub attempts: Vec<ExtraBaseAttempt>,
}

impl Advancement {
    pub fn runs(&self) -> u8 {
        self.scorers.len() as u8
    }
}

// ============================================================================
// Primary pass
// ============================================================================

pub fn advance_runners(outcome: OutcomeKind, bases: BaseState, batter: u8) -> Advancement {
    let [first, second, third] = bases.runners;
    let mut scorers = Vec::new();
    let mut candidates = Vec::new();
    let mut outs_added = 0;

    let runners = match outcome {
        OutcomeKind::Strikeout
        | OutcomeKind::Groundout
        | OutcomeKind::Flyout
        | OutcomeKind::Lineout
        | OutcomeKind::Popout => {
            outs_added = 1;
            bases.runners
        }
        OutcomeKind::Walk => {
            // A runner moves only when forced by every base behind it.
            if first.is_none() {
                [Some(batter), second, third]
            } else if second.is_none() {
                [Some(batter), first, third]
            } else if third.is_none() {
                [Some(batter), first, second]
            } else {
                scorers.extend(third);
                [Some(batter), first, second]
            }
        }
        OutcomeKind::Single => {
            scorers.extend(third);
            if let Some(r) = second {
                candidates.push(ExtraBaseCandidate {
                    runner: r,
                    from: Base::Third,
                });
            }
            if let Some(r) = first {
                candidates.push(ExtraBaseCandidate {
                    runner: r,
                    from: Base::Second,
                });
            }
            [Some(batter), first, second]
        }
        OutcomeKind::Double => {
            scorers.extend(third);
            scorers.extend(second);
            if let Some(r) = first {
                candidates.push(ExtraBaseCandidate {
                    runner: r,
                    from: Base::Third,
                });
            }
            [None, Some(batter), first]
        }
        OutcomeKind::Triple => {
            scorers.extend(third);
            scorers.extend(second);
            scorers.extend(first);
            [None, None, Some(batter)]
        }
        OutcomeKind::HomeRun => {
            scorers.extend(third);
            scorers.extend(second);
            scorers.extend(first);
            scorers.push(batter);
            [None, None, None]
        }
    };

    Advancement {
        bases: BaseState { runners },
        outs_added,
        scorers,
        candidates,
        attempts: Vec::new(),
    }
}

// ============================================================================
// Extra-base pass
// ============================================================================

/// Chance a runner tries for the extra base.
pub fn attempt_probability(speed: f64, mean_defense: f64, outs: u8) -> f64 {
    let two_out_bonus = if outs == 2 { 0.15 } else { 0.0 };
    (0.10 + (speed - mean_defense) / 100.0 + two_out_bonus).clamp(0.05, 0.60)
}

/// Chance an attempt is safe.
pub fn success_probability(speed: f64, mean_defense: f64) -> f64 {
    (0.50 + (speed - mean_defense) / 100.0).clamp(0.20, 0.90)
}

/// Speed-vs-defense rolls for the candidates of a single or double.
///
/// `outs_before` is the out count before this plate appearance. Does nothing
/// once the primary pass has reached three outs. One draw per candidate for
/// the attempt decision, one more only when the runner actually goes.
pub fn resolve_extra_base_attempts<R, F>(
    advancement: &mut Advancement,
    outs_before: u8,
    speed_of: F,
    mean_defense: f64,
    rng: &mut R,
) where
    R: RandomProvider + ?Sized,
    F: Fn(u8) -> f64,
{
    let candidates = std::mem::take(&mut advancement.candidates);

    for candidate in candidates.iter() {
        let outs = outs_before + advancement.outs_added;
        if outs >= MAX_OUTS {
            break;
        }
        // Runner must still be where the primary pass left them, and the
        // next base must be open.
        if advancement.bases.runner_on(candidate.from) != Some(candidate.runner) {
            continue;
        }
        let target = candidate.from.next();
        if let Some(target_base) = target {
            if advancement.bases.is_occupied(target_base) {
                continue;
            }
        }

        let speed = speed_of(candidate.runner);
        if rng.random() >= attempt_probability(speed, mean_defense, outs) {
            continue;
        }

        let safe = rng.random() < success_probability(speed, mean_defense);
        advancement.bases.runners[candidate.from.index()] = None;
        if safe {
            match target {
                Some(target_base) => {
                    advancement.bases.runners[target_base.index()] = Some(candidate.runner)
                }
                None => advancement.scorers.push(candidate.runner),
            }
        } else {
            advancement.outs_added += 1;
        }
        advancement.attempts.push(ExtraBaseAttempt {
            runner: candidate.runner,
            from: candidate.from,
            safe,
        });
    }

    advancement.candidates = candidates;
}
