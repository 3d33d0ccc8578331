//! Box score and line score
//!
//! Batting lines are indexed by lineup slot and pitching lines by staff slot,
//! so the state machine can update them without name lookups.

use serde::{Deserialize, Serialize};

use super::game::{Half, TeamSide};
use crate::engine::outcome::OutcomeKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub name: String,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub name: String,
    pub batters_faced: u32,
    pub outs_recorded: u32,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs_allowed: u32,
}

impl PitchingLine {
    /// Baseball notation: 6.2 = six and two-thirds innings.
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs_recorded / 3, self.outs_recorded % 3)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBox {
    pub name: String,
    pub batting: Vec<BattingLine>,
    pub pitching: Vec<PitchingLine>,
}

impl TeamBox {
    pub fn new<'a>(
        name: impl Into<String>,
        lineup: impl IntoIterator<Item = &'a str>,
        staff: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            name: name.into(),
            batting: lineup
                .into_iter()
                .map(|n| BattingLine {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            pitching: staff
                .into_iter()
                .map(|n| PitchingLine {
                    name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    pub fn runs(&self) -> u32 {
        self.batting.iter().map(|l| l.runs).sum()
    }

    pub fn hits(&self) -> u32 {
        self.batting.iter().map(|l| l.hits).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxScore {
    pub home: TeamBox,
    pub away: TeamBox,
}

/// One plate appearance, as the box score sees it.
#[derive(Debug, Clone, Copy)]
pub struct PlateAppearance<'a> {
    pub batting_side: TeamSide,
    pub lineup_slot: usize,
    pub staff_slot: usize,
    pub outcome: OutcomeKind,
    pub scorers: &'a [u8],
    pub outs_recorded: u8,
}

impl BoxScore {
    pub fn side(&self, side: TeamSide) -> &TeamBox {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut TeamBox {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn record(&mut self, pa: PlateAppearance<'_>) {
        let runs = pa.scorers.len() as u32;

        let batting = self.side_mut(pa.batting_side);
        for &scorer in pa.scorers {
            if let Some(line) = batting.batting.get_mut(scorer as usize) {
                line.runs += 1;
            }
        }
        if let Some(line) = batting.batting.get_mut(pa.lineup_slot) {
            line.plate_appearances += 1;
            line.rbi += runs;
            if pa.outcome.is_at_bat() {
                line.at_bats += 1;
            }
            if pa.outcome.is_hit() {
                line.hits += 1;
            }
            match pa.outcome {
                OutcomeKind::Double => line.doubles += 1,
                OutcomeKind::Triple => line.triples += 1,
                OutcomeKind::HomeRun => line.home_runs += 1,
                OutcomeKind::Walk => line.walks += 1,
                OutcomeKind::Strikeout => line.strikeouts += 1,
                _ => {}
            }
        }

        let fielding = self.side_mut(pa.batting_side.opponent());
        if let Some(line) = fielding.pitching.get_mut(pa.staff_slot) {
            line.batters_faced += 1;
            line.outs_recorded += pa.outs_recorded as u32;
            line.runs_allowed += runs;
            if pa.outcome.is_hit() {
                line.hits_allowed += 1;
            }
            match pa.outcome {
                OutcomeKind::HomeRun => line.home_runs_allowed += 1,
                OutcomeKind::Walk => line.walks += 1,
                OutcomeKind::Strikeout => line.strikeouts += 1,
                _ => {}
            }
        }
    }
}

/// Runs per inning; away bats in the top, home in the bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineScore {
    pub away: Vec<u32>,
    pub home: Vec<u32>,
}

impl LineScore {
    /// Opens the frame for a half so scoreless halves still show as 0.
    pub fn open_half(&mut self, inning: u32, half: Half) {
        let row = self.row_mut(half);
        let needed = inning as usize;
        if row.len() < needed {
            row.resize(needed, 0);
        }
    }

    pub fn add_runs(&mut self, inning: u32, half: Half, runs: u32) {
        self.open_half(inning, half);
        let idx = inning.saturating_sub(1) as usize;
        self.row_mut(half)[idx] += runs;
    }

    pub fn total(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home.iter().sum(),
            TeamSide::Away => self.away.iter().sum(),
        }
    }

    fn row_mut(&mut self, half: Half) -> &mut Vec<u32> {
        match half {
            Half::Top => &mut self.away,
            Half::Bottom => &mut self.home,
        }
    }
}
