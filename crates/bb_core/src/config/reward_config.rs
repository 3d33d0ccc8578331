//! Post-game payout

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Paid for any completed game (default: 100)
    pub base_cash: u32,
    /// Extra for a win (default: 150)
    pub win_bonus: u32,
    /// Per run scored by the player's team (default: 10)
    pub per_run: u32,
    /// Extra for winning on a walk-off (default: 50)
    pub walk_off_bonus: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base_cash: 100,
            win_bonus: 150,
            per_run: 10,
            walk_off_bonus: 50,
        }
    }
}

impl RewardConfig {
    pub fn payout(&self, my_runs: u32, is_win: bool, walk_off: bool) -> u32 {
        let mut cash = self.base_cash.saturating_add(self.per_run.saturating_mul(my_runs));
        if is_win {
            cash = cash.saturating_add(self.win_bonus);
            if walk_off {
                cash = cash.saturating_add(self.walk_off_bonus);
            }
        }
        cash
    }
}
