//! At-bat outcome resolution
//!
//! The engine treats outcome resolution as a collaborator: it hands an
//! [`OutcomeResolver`] the matchup, the combined modifiers and the match RNG,
//! and gets back one of ten [`OutcomeKind`]s.
//!
//! [`StatOutcomeResolver`] is the stock resolver. It turns ratings into a
//! ten-way probability table and samples it with a single draw.

use serde::{Deserialize, Serialize};

use super::decision::ZoneCell;
use super::fatigue::FatigueLevel;
use super::rng::RandomProvider;
use crate::models::Player;

// ============================================================================
// Outcome kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Strikeout,
    Groundout,
    Flyout,
    Lineout,
    Popout,
    Walk,
    Single,
    Double,
    Triple,
    HomeRun,
}

impl OutcomeKind {
    pub const ALL: [OutcomeKind; 10] = [
        OutcomeKind::Strikeout,
        OutcomeKind::Groundout,
        OutcomeKind::Flyout,
        OutcomeKind::Lineout,
        OutcomeKind::Popout,
        OutcomeKind::Walk,
        OutcomeKind::Single,
        OutcomeKind::Double,
        OutcomeKind::Triple,
        OutcomeKind::HomeRun,
    ];

    pub fn is_out(self) -> bool {
        matches!(
            self,
            OutcomeKind::Strikeout
                | OutcomeKind::Groundout
                | OutcomeKind::Flyout
                | OutcomeKind::Lineout
                | OutcomeKind::Popout
        )
    }

    pub fn is_hit(self) -> bool {
        matches!(
            self,
            OutcomeKind::Single | OutcomeKind::Double | OutcomeKind::Triple | OutcomeKind::HomeRun
        )
    }

    /// Counts as an official at-bat (walks do not).
    pub fn is_at_bat(self) -> bool {
        !matches!(self, OutcomeKind::Walk)
    }

    pub fn label(self) -> &'static str {
        match self {
            OutcomeKind::Strikeout => "strikeout",
            OutcomeKind::Groundout => "groundout",
            OutcomeKind::Flyout => "flyout",
            OutcomeKind::Lineout => "lineout",
            OutcomeKind::Popout => "popout",
            OutcomeKind::Walk => "walk",
            OutcomeKind::Single => "single",
            OutcomeKind::Double => "double",
            OutcomeKind::Triple => "triple",
            OutcomeKind::HomeRun => "home run",
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Multipliers applied to the base rate of each outcome family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeModifiers {
    pub hit: f64,
    pub strikeout: f64,
    pub walk: f64,
    pub homerun: f64,
}

impl Default for OutcomeModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl OutcomeModifiers {
    pub const NEUTRAL: Self = Self {
        hit: 1.0,
        strikeout: 1.0,
        walk: 1.0,
        homerun: 1.0,
    };

    pub const fn new(hit: f64, strikeout: f64, walk: f64, homerun: f64) -> Self {
        Self {
            hit,
            strikeout,
            walk,
            homerun,
        }
    }

    /// Component-wise product.
    pub fn combine(self, other: Self) -> Self {
        Self {
            hit: self.hit * other.hit,
            strikeout: self.strikeout * other.strikeout,
            walk: self.walk * other.walk,
            homerun: self.homerun * other.homerun,
        }
    }
}

// ============================================================================
// Resolver contract
// ============================================================================

/// Everything a resolver may look at for one plate appearance.
#[derive(Debug, Clone)]
pub struct AtBatInput<'a> {
    pub batter: &'a Player,
    pub pitcher: &'a Player,
    /// Mean defensive rating of the fielding lineup.
    pub defense: f64,
    pub fatigue: FatigueLevel,
    pub innings_pitched: u32,
    pub modifiers: OutcomeModifiers,
    pub abilities: &'a [String],
    pub aim: Option<ZoneCell>,
}

pub trait OutcomeResolver: Send + Sync {
    fn resolve(&self, input: &AtBatInput<'_>, rng: &mut dyn RandomProvider) -> OutcomeKind;
}

// ============================================================================
// Stock resolver
// ============================================================================

const BASE_WALK: f64 = 0.085;
const BASE_STRIKEOUT: f64 = 0.22;
const BASE_HOMERUN: f64 = 0.03;
const BASE_HIT: f64 = 0.21;
const MIN_RATE: f64 = 0.005;
const MAX_NON_OUT_SHARE: f64 = 0.9;

/// Share of non-homer hits by type.
const SINGLE_SHARE: f64 = 0.75;
const DOUBLE_SHARE: f64 = 0.22;

/// Share of balls in play that become each kind of out.
const IN_PLAY_OUTS: [(OutcomeKind, f64); 4] = [
    (OutcomeKind::Groundout, 0.44),
    (OutcomeKind::Flyout, 0.28),
    (OutcomeKind::Lineout, 0.14),
    (OutcomeKind::Popout, 0.14),
];

/// Rating-driven resolver with one RNG draw per plate appearance.
#[derive(Debug, Clone, Default)]
pub struct StatOutcomeResolver;

impl StatOutcomeResolver {
    /// Pitcher rating loss by fatigue tier.
    fn fatigue_penalty(level: FatigueLevel) -> f64 {
        match level {
            FatigueLevel::Fresh => 0.0,
            FatigueLevel::Tired => 8.0,
            FatigueLevel::Gassed => 18.0,
        }
    }

    /// Probability per outcome, in sampling order. Sums to 1.
    pub fn outcome_table(&self, input: &AtBatInput<'_>) -> [(OutcomeKind, f64); 10] {
        let clamp = |v: f64| v.clamp(0.0, 100.0);
        let penalty = Self::fatigue_penalty(input.fatigue);

        let contact = clamp(input.batter.batting.contact as f64);
        let power = clamp(input.batter.batting.power as f64);
        let eye = clamp(input.batter.batting.eye as f64);
        let velocity = clamp(input.pitcher.pitching.velocity as f64 - penalty);
        let control = clamp(input.pitcher.pitching.control as f64 - penalty);
        let movement = clamp(input.pitcher.pitching.movement as f64 - penalty);
        let defense = clamp(input.defense);
        let m = input.modifiers;

        let walk = BASE_WALK * (1.0 + (eye - control) / 100.0) * m.walk;
        let strikeout =
            BASE_STRIKEOUT * (1.0 + ((velocity + movement) / 2.0 - contact) / 100.0) * m.strikeout;
        let homerun = BASE_HOMERUN * (1.0 + (power - movement) / 60.0) * m.homerun;
        let hit = BASE_HIT
            * (1.0 + (contact - (control + movement) / 2.0) / 100.0)
            * (1.0 + (50.0 - defense) / 200.0)
            * m.hit;

        let mut rates = [
            walk.max(MIN_RATE),
            strikeout.max(MIN_RATE),
            homerun.max(MIN_RATE),
            hit.max(MIN_RATE),
        ];
        let total: f64 = rates.iter().sum();
        if total > MAX_NON_OUT_SHARE {
            let scale = MAX_NON_OUT_SHARE / total;
            rates.iter_mut().for_each(|r| *r *= scale);
        }
        let [walk, strikeout, homerun, hit] = rates;
        let in_play_outs = 1.0 - walk - strikeout - homerun - hit;

        [
            (OutcomeKind::Walk, walk),
            (OutcomeKind::Strikeout, strikeout),
            (OutcomeKind::HomeRun, homerun),
            (OutcomeKind::Triple, hit * (1.0 - SINGLE_SHARE - DOUBLE_SHARE)),
            (OutcomeKind::Double, hit * DOUBLE_SHARE),
            (OutcomeKind::Single, hit * SINGLE_SHARE),
            (IN_PLAY_OUTS[0].0, in_play_outs * IN_PLAY_OUTS[0].1),
            (IN_PLAY_OUTS[1].0, in_play_outs * IN_PLAY_OUTS[1].1),
            (IN_PLAY_OUTS[2].0, in_play_outs * IN_PLAY_OUTS[2].1),
            (IN_PLAY_OUTS[3].0, in_play_outs * IN_PLAY_OUTS[3].1),
        ]
    }
}

impl OutcomeResolver for StatOutcomeResolver {
    fn resolve(&self, input: &AtBatInput<'_>, rng: &mut dyn RandomProvider) -> OutcomeKind {
        let table = self.outcome_table(input);
        let roll = rng.random();
        let mut cumulative = 0.0;
        for (kind, p) in table.iter() {
            cumulative += p;
            if roll < cumulative {
                return *kind;
            }
        }
        // Float drift: land on the last bucket.
        table[table.len() - 1].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::MockRandom;
    use crate::models::{BattingStats, PitchingStats};

    fn matchup() -> (Player, Player) {
        (
            Player::batter("Hitter", BattingStats::default(), 50),
            Player::pitcher("Thrower", PitchingStats::default()),
        )
    }

    fn input<'a>(batter: &'a Player, pitcher: &'a Player, modifiers: OutcomeModifiers) -> AtBatInput<'a> {
        AtBatInput {
            batter,
            pitcher,
            defense: 50.0,
            fatigue: FatigueLevel::Fresh,
            innings_pitched: 0,
            modifiers,
            abilities: &[],
            aim: None,
        }
    }

    #[test]
    fn test_table_sums_to_one() {
        let (b, p) = matchup();
        let table = StatOutcomeResolver.outcome_table(&input(&b, &p, OutcomeModifiers::NEUTRAL));
        let sum: f64 = table.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(table.iter().all(|(_, p)| *p >= 0.0));
    }

    #[test]
    fn test_extreme_modifiers_stay_normalized() {
        let (b, p) = matchup();
        let wild = OutcomeModifiers::new(5.0, 5.0, 5.0, 5.0);
        let table = StatOutcomeResolver.outcome_table(&input(&b, &p, wild));
        let sum: f64 = table.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(table.iter().all(|(_, p)| *p >= 0.0));
    }

    #[test]
    fn test_low_roll_is_walk_high_roll_is_out() {
        let (b, p) = matchup();
        let at_bat = input(&b, &p, OutcomeModifiers::NEUTRAL);
        let mut low = MockRandom::new(vec![0.0]).unwrap();
        assert_eq!(StatOutcomeResolver.resolve(&at_bat, &mut low), OutcomeKind::Walk);
        let mut high = MockRandom::new(vec![0.999_999]).unwrap();
        assert_eq!(StatOutcomeResolver.resolve(&at_bat, &mut high), OutcomeKind::Popout);
    }

    #[test]
    fn test_power_modifier_raises_homeruns() {
        let (b, p) = matchup();
        let neutral = StatOutcomeResolver.outcome_table(&input(&b, &p, OutcomeModifiers::NEUTRAL));
        let boosted = StatOutcomeResolver
            .outcome_table(&input(&b, &p, OutcomeModifiers::new(1.0, 1.0, 1.0, 1.5)));
        assert!(boosted[2].1 > neutral[2].1);
    }

    #[test]
    fn test_fatigue_helps_batter() {
        let (b, p) = matchup();
        let fresh = StatOutcomeResolver.outcome_table(&input(&b, &p, OutcomeModifiers::NEUTRAL));
        let mut tired_input = input(&b, &p, OutcomeModifiers::NEUTRAL);
        tired_input.fatigue = FatigueLevel::Gassed;
        let gassed = StatOutcomeResolver.outcome_table(&tired_input);
        // Walk and strikeout buckets move the right way.
        assert!(gassed[0].1 > fresh[0].1);
        assert!(gassed[1].1 < fresh[1].1);
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(OutcomeKind::ALL.iter().filter(|o| o.is_out()).count(), 5);
        assert_eq!(OutcomeKind::ALL.iter().filter(|o| o.is_hit()).count(), 4);
        assert!(!OutcomeKind::Walk.is_at_bat());
    }
}
