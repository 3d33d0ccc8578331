//! Pitcher fatigue
//!
//! Workload is innings pitched plus "extra fatigue" from high-effort choices:
//! a batter working the count (`Patient`) wears down the opposing pitcher, and
//! a pitcher nibbling corners (`Paint`) wears down their own arm. Both land on
//! the pitcher currently on the mound.

use serde::{Deserialize, Serialize};

use super::decision::{BattingApproach, PitchingStrategy};
use crate::config::FatigueConfig;

pub const GASSED_INNINGS: u32 = 6;
pub const GASSED_EXTRA: f64 = 1.5;
pub const FRESH_INNINGS: u32 = 4;
pub const FRESH_EXTRA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    Fresh,
    Tired,
    Gassed,
}

pub fn fatigue_level(innings: u32, extra_fatigue: f64) -> FatigueLevel {
    if innings >= GASSED_INNINGS || extra_fatigue >= GASSED_EXTRA {
        FatigueLevel::Gassed
    } else if innings < FRESH_INNINGS && extra_fatigue < FRESH_EXTRA {
        FatigueLevel::Fresh
    } else {
        FatigueLevel::Tired
    }
}

/// Extra fatigue the pitcher on the mound picks up from one plate appearance.
pub fn fatigue_delta(
    approach: Option<BattingApproach>,
    strategy: Option<PitchingStrategy>,
    config: &FatigueConfig,
) -> f64 {
    let mut delta = 0.0;
    if approach == Some(BattingApproach::Patient) {
        delta += config.patient_fatigue;
    }
    if strategy == Some(PitchingStrategy::Paint) {
        delta += config.paint_fatigue;
    }
    delta
}

/// The pitcher currently on the mound for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherWorkload {
    /// Position in the staff (0 = starter).
    pub staff_slot: usize,
    pub innings_pitched: u32,
    pub extra_fatigue: f64,
    pub batters_faced: u32,
}

impl PitcherWorkload {
    pub fn fresh(staff_slot: usize) -> Self {
        Self {
            staff_slot,
            innings_pitched: 0,
            extra_fatigue: 0.0,
            batters_faced: 0,
        }
    }

    pub fn level(&self) -> FatigueLevel {
        fatigue_level(self.innings_pitched, self.extra_fatigue)
    }

    pub fn add_extra(&mut self, delta: f64) {
        self.extra_fatigue += delta;
    }

    /// Reliever entry: new arm, workload starts over.
    pub fn relieve(&mut self, staff_slot: usize) {
        *self = Self::fresh(staff_slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatigue_tiers() {
        assert_eq!(fatigue_level(0, 0.0), FatigueLevel::Fresh);
        assert_eq!(fatigue_level(3, 0.49), FatigueLevel::Fresh);
        assert_eq!(fatigue_level(4, 0.0), FatigueLevel::Tired);
        assert_eq!(fatigue_level(0, 0.5), FatigueLevel::Tired);
        assert_eq!(fatigue_level(5, 1.49), FatigueLevel::Tired);
        assert_eq!(fatigue_level(6, 0.0), FatigueLevel::Gassed);
        assert_eq!(fatigue_level(1, 1.5), FatigueLevel::Gassed);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(FatigueLevel::Gassed > FatigueLevel::Tired);
        assert!(FatigueLevel::Tired > FatigueLevel::Fresh);
    }

    #[test]
    fn test_fatigue_delta_sources() {
        let cfg = FatigueConfig::default();
        assert_eq!(fatigue_delta(None, None, &cfg), 0.0);
        assert_eq!(
            fatigue_delta(Some(BattingApproach::Patient), None, &cfg),
            cfg.patient_fatigue
        );
        assert_eq!(
            fatigue_delta(Some(BattingApproach::Power), Some(PitchingStrategy::Paint), &cfg),
            cfg.paint_fatigue
        );
        let both = fatigue_delta(
            Some(BattingApproach::Patient),
            Some(PitchingStrategy::Paint),
            &cfg,
        );
        assert!((both - (cfg.patient_fatigue + cfg.paint_fatigue)).abs() < 1e-12);
    }

    #[test]
    fn test_relief_resets_workload() {
        let mut workload = PitcherWorkload::fresh(0);
        workload.innings_pitched = 6;
        workload.add_extra(0.7);
        assert_eq!(workload.level(), FatigueLevel::Gassed);
        workload.relieve(1);
        assert_eq!(workload, PitcherWorkload::fresh(1));
        assert_eq!(workload.level(), FatigueLevel::Fresh);
    }
}
