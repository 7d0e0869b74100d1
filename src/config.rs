//! Runtime configuration read from `LAZY_BLOCKS_*` environment variables.
//!
//! Unparseable values fall back to their defaults.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::level_filters::LevelFilter;

use crate::core::{EngineConfig, GravityPolicy, RowClearPolicy};
use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub engine: EngineConfig,
    pub tick_ms: u32,
    pub scores_path: PathBuf,
    pub player: String,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub bell: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("LAZY_BLOCKS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = var("LAZY_BLOCKS_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let gravity = var("LAZY_BLOCKS_GRAVITY_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .map_or(GravityPolicy::InputDriven, |interval_ms| {
                GravityPolicy::Timed { interval_ms }
            });

        let row_clear = if var("LAZY_BLOCKS_MANUAL_CLEAR").is_some_and(|s| parse_flag(&s)) {
            RowClearPolicy::Manual
        } else {
            RowClearPolicy::OnLock
        };

        Self {
            engine: EngineConfig {
                seed,
                gravity,
                row_clear,
            },
            tick_ms,
            scores_path: var("LAZY_BLOCKS_SCORES_PATH")
                .map_or_else(|| PathBuf::from("scores.csv"), PathBuf::from),
            player: var("LAZY_BLOCKS_PLAYER").unwrap_or_else(|| "Player".to_string()),
            log_path: var("LAZY_BLOCKS_LOG_PATH").map(PathBuf::from),
            log_level: var("LAZY_BLOCKS_LOG")
                .and_then(|s| s.parse().ok())
                .unwrap_or(LevelFilter::INFO),
            bell: var("LAZY_BLOCKS_BELL").is_some_and(|s| parse_flag(&s)),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]);
        assert_eq!(c.tick_ms, 100);
        assert_eq!(c.engine.gravity, GravityPolicy::InputDriven);
        assert_eq!(c.engine.row_clear, RowClearPolicy::OnLock);
        assert_eq!(c.scores_path, PathBuf::from("scores.csv"));
        assert_eq!(c.player, "Player");
        assert_eq!(c.log_path, None);
        assert_eq!(c.log_level, LevelFilter::INFO);
        assert!(!c.bell);
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("LAZY_BLOCKS_SEED", "42"),
            ("LAZY_BLOCKS_TICK_MS", "50"),
            ("LAZY_BLOCKS_GRAVITY_MS", "700"),
            ("LAZY_BLOCKS_MANUAL_CLEAR", "true"),
            ("LAZY_BLOCKS_PLAYER", " Ada "),
            ("LAZY_BLOCKS_LOG_PATH", "/tmp/lb.log"),
            ("LAZY_BLOCKS_LOG", "debug"),
            ("LAZY_BLOCKS_BELL", "1"),
        ]);
        assert_eq!(c.engine.seed, 42);
        assert_eq!(c.tick_ms, 50);
        assert_eq!(c.engine.gravity, GravityPolicy::Timed { interval_ms: 700 });
        assert_eq!(c.engine.row_clear, RowClearPolicy::Manual);
        assert_eq!(c.player, "Ada");
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/lb.log")));
        assert_eq!(c.log_level, LevelFilter::DEBUG);
        assert!(c.bell);
    }

    #[test]
    fn invalid_values_fall_back() {
        let c = config(&[
            ("LAZY_BLOCKS_TICK_MS", "0"),
            ("LAZY_BLOCKS_GRAVITY_MS", "fast"),
            ("LAZY_BLOCKS_LOG", "chatty"),
            ("LAZY_BLOCKS_LOG_PATH", "   "),
        ]);
        assert_eq!(c.tick_ms, 100);
        assert_eq!(c.engine.gravity, GravityPolicy::InputDriven);
        assert_eq!(c.log_level, LevelFilter::INFO);
        assert_eq!(c.log_path, None);
    }
}
