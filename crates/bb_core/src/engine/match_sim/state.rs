//! Match state
//!
//! `MatchState` is a plain value: cloning it clones the RNG position along
//! with the score, so two clones advanced with the same decisions stay
//! identical. Rosters sit behind `Arc` so clones stay cheap.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::base_state::BaseState;
use crate::engine::decision::{AdaptationState, DecisionContext};
use crate::engine::fatigue::PitcherWorkload;
use crate::engine::rng::MatchRng;
use crate::engine::win_expectancy::GameSituation;
use crate::models::{
    BoxScore, Half, LineScore, MatchDiagnostic, PlayByPlayEvent, Player, Role, Roster, TeamBox,
    TeamSide,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    PreGame,
    InProgress,
    HalfComplete,
    GameComplete,
}

/// One side's roster, lineup position, score and pitcher on the mound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub side: TeamSide,
    pub roster: Arc<Roster>,
    /// Roster indices of the batters, in batting order.
    pub lineup: Vec<usize>,
    /// Roster indices of the pitchers: starter, then relievers.
    pub staff: Vec<usize>,
    pub batting_order_index: usize,
    pub runs: u32,
    pub hits: u32,
    pub pitcher: PitcherWorkload,
    /// Mean defensive rating of the lineup, fixed for the game.
    pub mean_defense: f64,
}

impl TeamState {
    pub fn new(side: TeamSide, roster: Arc<Roster>) -> Self {
        let lineup = roster.indices_of(Role::Batter);
        let staff = roster.indices_of(Role::Pitcher);
        let mean_defense = roster.mean_defense(&lineup);
        Self {
            side,
            roster,
            lineup,
            staff,
            batting_order_index: 0,
            runs: 0,
            hits: 0,
            pitcher: PitcherWorkload::fresh(0),
            mean_defense,
        }
    }

    pub fn name(&self) -> &str {
        &self.roster.name
    }

    /// Why this team can't play, if it can't.
    pub fn roster_problem(&self) -> Option<&'static str> {
        if self.lineup.is_empty() {
            Some("no batters")
        } else if self.staff.is_empty() {
            Some("no pitchers")
        } else if self.lineup.len() > usize::from(u8::MAX) + 1 {
            // Runners are tracked by u8 lineup slot.
            Some("more than 256 batters")
        } else {
            None
        }
    }

    pub fn batter_at(&self, slot: usize) -> Option<&Player> {
        self.lineup.get(slot).and_then(|&idx| self.roster.player(idx))
    }

    pub fn current_batter(&self) -> Option<&Player> {
        self.batter_at(self.batting_order_index)
    }

    pub fn current_pitcher(&self) -> Option<&Player> {
        self.staff
            .get(self.pitcher.staff_slot)
            .and_then(|&idx| self.roster.player(idx))
    }

    pub fn box_template(&self) -> TeamBox {
        let names = |slots: &[usize]| -> Vec<String> {
            slots
                .iter()
                .filter_map(|&idx| self.roster.player(idx))
                .map(|p| p.name.clone())
                .collect()
        };
        let lineup = names(&self.lineup);
        let staff = names(&self.staff);
        TeamBox::new(
            self.name(),
            lineup.iter().map(String::as_str),
            staff.iter().map(String::as_str),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub inning: u32,
    pub half: Half,
    pub outs: u8,
    pub bases: BaseState,
    pub home: TeamState,
    pub away: TeamState,
    /// Side controlled by the player.
    pub my_side: TeamSide,
    /// Repeat counters for the current half-inning.
    pub adaptation: AdaptationState,
    pub rng: MatchRng,
    /// AI decision stream, kept here so a saved match resumes with the same AI draws.
    #[serde(default)]
    pub ai_rng: Option<MatchRng>,
    pub phase: MatchPhase,
    pub is_complete: bool,
    pub inning_complete: bool,
    pub at_bats_this_half: u32,
    pub walk_off: bool,
    pub play_by_play: Vec<PlayByPlayEvent>,
    pub box_score: BoxScore,
    pub line_score: LineScore,
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl MatchState {
    pub fn new(home: TeamState, away: TeamState, my_side: TeamSide, rng: MatchRng) -> Self {
        let box_score = BoxScore {
            home: home.box_template(),
            away: away.box_template(),
        };
        let mut line_score = LineScore::default();
        line_score.open_half(1, Half::Top);
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            bases: BaseState::EMPTY,
            home,
            away,
            my_side,
            adaptation: AdaptationState::default(),
            rng,
            ai_rng: None,
            phase: MatchPhase::PreGame,
            is_complete: false,
            inning_complete: false,
            at_bats_this_half: 0,
            walk_off: false,
            play_by_play: Vec::new(),
            box_score,
            line_score,
            diagnostics: Vec::new(),
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamState {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamState {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn batting_team(&self) -> &TeamState {
        self.team(self.half.batting_side())
    }

    pub fn fielding_team(&self) -> &TeamState {
        self.team(self.half.fielding_side())
    }

    pub fn my_team(&self) -> &TeamState {
        self.team(self.my_side)
    }

    pub fn opponent_team(&self) -> &TeamState {
        self.team(self.my_side.opponent())
    }

    pub fn is_my_team_batting(&self) -> bool {
        self.half.batting_side() == self.my_side
    }

    /// Batting runs minus fielding runs.
    pub fn batting_run_diff(&self) -> i32 {
        self.batting_team().runs as i32 - self.fielding_team().runs as i32
    }

    pub fn situation(&self) -> GameSituation {
        GameSituation {
            inning: self.inning,
            half: self.half,
            outs: self.outs,
            bases: self.bases.occupancy(),
            run_diff: self.batting_run_diff(),
        }
    }

    /// Inputs for the AI rules. `None` once the game is over.
    pub fn decision_context(&self) -> Option<DecisionContext> {
        if self.is_complete {
            return None;
        }
        let batter = self.batting_team().current_batter()?;
        Some(DecisionContext {
            inning: self.inning,
            outs: self.outs,
            bases: self.bases,
            score_diff: self.batting_run_diff(),
            pitcher_fatigue: self.fielding_team().pitcher.level(),
            batter_power: batter.batting.power,
            batter_contact: batter.batting.contact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_roster;

    fn state() -> MatchState {
        MatchState::new(
            TeamState::new(TeamSide::Home, Arc::new(demo_roster("Home", 60))),
            TeamState::new(TeamSide::Away, Arc::new(demo_roster("Away", 55))),
            TeamSide::Home,
            MatchRng::seeded(1),
        )
    }

    #[test]
    fn test_new_state_shape() {
        let s = state();
        assert_eq!((s.inning, s.half, s.outs), (1, Half::Top, 0));
        assert_eq!(s.phase, MatchPhase::PreGame);
        assert_eq!(s.home.lineup.len(), 9);
        assert_eq!(s.home.staff, vec![9, 10, 11]);
        assert_eq!(s.box_score.away.batting.len(), 9);
        assert_eq!(s.box_score.away.pitching[0].name, "Away Starter");
        assert!(!s.is_my_team_batting());
    }

    #[test]
    fn test_roster_problem() {
        let empty = TeamState::new(TeamSide::Away, Arc::new(Roster::new("Nobody")));
        assert_eq!(empty.roster_problem(), Some("no batters"));

        let mut no_arms = demo_roster("Bats", 50);
        no_arms.players.retain(|p| p.role == Role::Batter);
        let team = TeamState::new(TeamSide::Away, Arc::new(no_arms));
        assert_eq!(team.roster_problem(), Some("no pitchers"));

        let mut deep = demo_roster("Deep", 50);
        let spare = deep.players[0].clone();
        while deep.indices_of(Role::Batter).len() < 256 {
            deep.players.push(spare.clone());
        }
        assert_eq!(TeamState::new(TeamSide::Home, Arc::new(deep.clone())).roster_problem(), None);
        deep.players.push(spare);
        let team = TeamState::new(TeamSide::Home, Arc::new(deep));
        assert_eq!(team.roster_problem(), Some("more than 256 batters"));
    }

    #[test]
    fn test_decision_context_reads_matchup() {
        let s = state();
        let ctx = s.decision_context().unwrap();
        let leadoff = s.away.current_batter().unwrap();
        assert_eq!(ctx.batter_power, leadoff.batting.power);
        assert_eq!(ctx.score_diff, 0);
        assert_eq!(s.home.current_pitcher().unwrap().name, "Home Starter");
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let s = state();
        let json = serde_json::to_string(&s).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
