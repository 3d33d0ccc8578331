//! JSON entry point for embedding hosts
//!
//! One request in, one response out, both as JSON strings. The request names
//! the two rosters and a seed; the same request always produces the same
//! response.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{apply_config_from_env, EngineConfig, RewardConfig};
use crate::engine::match_sim::{simulate_match, MatchEngine};
use crate::error::{MatchError, Result};
use crate::models::{MatchResult, Roster};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub my_team: Roster,
    pub opponent_team: Roster,
    /// Engine settings; defaults (or `BB_ENGINE_CONFIG_PATH`) when absent.
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub reward: Option<RewardConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub summary: String,
    pub result: MatchResult,
}

/// Simulates a full AI-vs-AI game from a JSON [`MatchRequest`].
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(MatchError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let MatchRequest {
        seed,
        my_team,
        opponent_team,
        config,
        reward,
        ..
    } = request;

    let config = match config {
        Some(config) => config,
        None => {
            let mut config = EngineConfig::default();
            if apply_config_from_env(&mut config)? {
                debug!("using engine config from environment");
            }
            config
        }
    };
    config.validate()?;
    let reward = reward.unwrap_or_default();

    info!(seed, my_team = %my_team.name, opponent = %opponent_team.name, "simulating match");
    let engine = MatchEngine::new(config);
    let result = simulate_match(
        &engine,
        Arc::new(my_team),
        Arc::new(opponent_team),
        seed,
        &reward,
    );

    let response = MatchResponse {
        schema_version: SCHEMA_VERSION,
        seed,
        summary: result.summary(),
        result,
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_roster;

    fn request(seed: u64) -> MatchRequest {
        MatchRequest {
            schema_version: SCHEMA_VERSION,
            seed,
            my_team: demo_roster("Harbor Cats", 62),
            opponent_team: demo_roster("Mill Town", 58),
            config: Some(EngineConfig::default()),
            reward: None,
        }
    }

    #[test]
    fn test_json_roundtrip_is_deterministic() {
        let json = serde_json::to_string(&request(31)).unwrap();
        let a = simulate_match_json(&json).unwrap();
        let b = simulate_match_json(&json).unwrap();
        assert_eq!(a, b);

        let response: MatchResponse = serde_json::from_str(&a).unwrap();
        assert_eq!(response.seed, 31);
        assert!(response.result.total_innings >= 9);
        assert!(!response.result.play_by_play.is_empty());
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let mut req = request(1);
        req.schema_version = 2;
        let json = serde_json::to_string(&req).unwrap();
        let err = simulate_match_json(&json).unwrap_err();
        assert!(matches!(err, MatchError::SchemaVersion { found: 2, expected: 1 }));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut req = request(1);
        let mut config = EngineConfig::default();
        config.safety.max_innings = 3;
        req.config = Some(config);
        let json = serde_json::to_string(&req).unwrap();
        assert!(matches!(
            simulate_match_json(&json),
            Err(MatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(simulate_match_json("{"), Err(MatchError::Json(_))));
    }

    #[test]
    fn test_empty_opponent_is_not_an_error() {
        let mut req = request(4);
        req.opponent_team = Roster::new("Ghosts");
        let json = serde_json::to_string(&req).unwrap();
        let response: MatchResponse =
            serde_json::from_str(&simulate_match_json(&json).unwrap()).unwrap();
        assert_eq!(response.result.my_runs, 0);
        assert_eq!(response.result.total_innings, 0);
        assert_eq!(response.result.cash_earned, 0);
        assert!(response.result.play_by_play.is_empty());
    }
}
