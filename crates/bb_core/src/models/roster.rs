//! Rosters and player ratings
//!
//! All ratings are on a 0-100 scale. A roster is split by [`Role`]: batters in
//! roster order form the lineup, pitchers in roster order form the staff
//! (starter, first reliever, second reliever).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Batter,
    Pitcher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingStats {
    pub contact: u8,
    pub power: u8,
    pub eye: u8,
    pub speed: u8,
}

impl Default for BattingStats {
    fn default() -> Self {
        Self {
            contact: 50,
            power: 50,
            eye: 50,
            speed: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingStats {
    pub velocity: u8,
    pub control: u8,
    pub movement: u8,
}

impl Default for PitchingStats {
    fn default() -> Self {
        Self {
            velocity: 50,
            control: 50,
            movement: 50,
        }
    }
}

fn default_defense() -> u8 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub batting: BattingStats,
    #[serde(default)]
    pub pitching: PitchingStats,
    #[serde(default = "default_defense")]
    pub defense: u8,
}

impl Player {
    pub fn batter(name: impl Into<String>, batting: BattingStats, defense: u8) -> Self {
        Self {
            name: name.into(),
            role: Role::Batter,
            batting,
            pitching: PitchingStats::default(),
            defense,
        }
    }

    pub fn pitcher(name: impl Into<String>, pitching: PitchingStats) -> Self {
        Self {
            name: name.into(),
            role: Role::Pitcher,
            batting: BattingStats {
                contact: 20,
                power: 15,
                eye: 20,
                speed: 30,
            },
            pitching,
            defense: default_defense(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
        }
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Players of one role, in roster order.
    pub fn filter(&self, role: Role) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(move |p| p.role == role)
    }

    /// Roster indices of players of one role, in roster order.
    pub fn indices_of(&self, role: Role) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.role == role)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    /// Mean defensive rating of the given roster slots (50 when empty).
    pub fn mean_defense(&self, slots: &[usize]) -> f64 {
        let ratings: Vec<f64> = slots
            .iter()
            .filter_map(|&idx| self.players.get(idx))
            .map(|p| p.defense as f64)
            .collect();
        if ratings.is_empty() {
            return default_defense() as f64;
        }
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }
}

/// Nine batters and three pitchers around a single overall rating.
///
/// Used for demos, benches and tests. Ratings vary slightly by lineup slot so
/// the top of the order hits for contact and the middle for power.
pub fn demo_roster(name: &str, rating: u8) -> Roster {
    let r = rating.min(100) as i32;
    let stat = |delta: i32| (r + delta).clamp(0, 100) as u8;

    let mut roster = Roster::new(name);
    for slot in 0..9i32 {
        let power_bias = if (2..=5).contains(&slot) { 12 } else { -6 };
        let contact_bias = (if slot < 2 { 10 } else { 0 }) - slot / 3;
        let speed_bias = if slot < 2 || slot == 8 { 12 } else { -4 };
        roster = roster.with_player(Player::batter(
            format!("{name} Batter {}", slot + 1),
            BattingStats {
                contact: stat(contact_bias),
                power: stat(power_bias),
                eye: stat(-slot % 4),
                speed: stat(speed_bias),
            },
            stat(slot % 3 - 1),
        ));
    }
    for (idx, title) in ["Starter", "Setup", "Closer"].iter().enumerate() {
        let idx = idx as i32;
        roster = roster.with_player(Player::pitcher(
            format!("{name} {title}"),
            PitchingStats {
                velocity: stat(idx * 3),
                control: stat(2 - idx * 2),
                movement: stat(idx),
            },
        ));
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_role() {
        let roster = demo_roster("Owls", 60);
        assert_eq!(roster.filter(Role::Batter).count(), 9);
        assert_eq!(roster.filter(Role::Pitcher).count(), 3);
        assert_eq!(roster.indices_of(Role::Pitcher), vec![9, 10, 11]);
    }

    #[test]
    fn test_mean_defense() {
        let roster = Roster::new("Two")
            .with_player(Player::batter("A", BattingStats::default(), 40))
            .with_player(Player::batter("B", BattingStats::default(), 80));
        assert!((roster.mean_defense(&[0, 1]) - 60.0).abs() < 1e-9);
        assert!((roster.mean_defense(&[]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_demo_roster_stats_clamped() {
        let strong = demo_roster("Max", 100);
        assert!(strong
            .players
            .iter()
            .all(|p| p.batting.power <= 100 && p.pitching.velocity <= 100));
        let weak = demo_roster("Min", 0);
        assert!(weak.players.iter().all(|p| p.defense <= 100));
    }

    #[test]
    fn test_player_defaults_from_json() {
        let json = r#"{"name": "Rookie", "role": "batter"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.defense, 50);
        assert_eq!(player.batting, BattingStats::default());
    }
}
