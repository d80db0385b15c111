//! Game configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `TAMBOLA_TICKETS` | tickets dealt at start, clamped to 1-10 | 3 |
//! | `TAMBOLA_SEED` | seed for a reproducible game | random |
//! | `TAMBOLA_MARK_MODE` | `assist` or `manual` | assist |
//! | `TAMBOLA_AUTO_CALL` | start with auto-call on (`1`/`true`) | off |
//! | `TAMBOLA_AUTO_CALL_MS` | countdown between automatic calls | 6000 |
//! | `TAMBOLA_ENTRY_FEE` | entry fee per player (pool prizes) | 50 |
//! | `TAMBOLA_PLAYERS` | players paying in; 1 keeps fixed prizes | 1 |
//! | `TAMBOLA_EVENT_LOG` | JSON-lines event log path | none |
//! | `TAMBOLA_LOG_FILE` | tracing output file for the terminal game | none |
//!
//! Values that fail to parse fall back to their default.

use std::path::PathBuf;

use crate::core::{PrizeTable, SessionOptions};
use crate::types::{
    MarkMode, AUTO_CALL_COUNTDOWN_MS, DEFAULT_ENTRY_FEE, DEFAULT_TICKET_COUNT, MAX_TICKETS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub tickets: usize,
    pub seed: Option<u32>,
    pub mark_mode: MarkMode,
    pub auto_call: bool,
    pub auto_call_ms: u32,
    pub entry_fee: u32,
    pub players: u32,
    pub event_log: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tickets: DEFAULT_TICKET_COUNT,
            seed: None,
            mark_mode: MarkMode::default(),
            auto_call: false,
            auto_call_ms: AUTO_CALL_COUNTDOWN_MS,
            entry_fee: DEFAULT_ENTRY_FEE,
            players: 1,
            event_log: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let tickets = get("TAMBOLA_TICKETS")
            .and_then(|s| s.parse::<usize>().ok())
            .map(|n| n.clamp(1, MAX_TICKETS))
            .unwrap_or(defaults.tickets);

        let seed = get("TAMBOLA_SEED").and_then(|s| s.parse().ok());

        let mark_mode = get("TAMBOLA_MARK_MODE")
            .and_then(|s| MarkMode::from_str(&s))
            .unwrap_or(defaults.mark_mode);

        let auto_call = get("TAMBOLA_AUTO_CALL")
            .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.auto_call);

        let auto_call_ms = get("TAMBOLA_AUTO_CALL_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.auto_call_ms);

        let entry_fee = get("TAMBOLA_ENTRY_FEE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.entry_fee);

        let players = get("TAMBOLA_PLAYERS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.players);

        Self {
            tickets,
            seed,
            mark_mode,
            auto_call,
            auto_call_ms,
            entry_fee,
            players,
            event_log: get("TAMBOLA_EVENT_LOG").map(PathBuf::from),
            log_file: get("TAMBOLA_LOG_FILE").map(PathBuf::from),
        }
    }

    /// Fixed prizes for a single player, a split of the pool otherwise.
    pub fn prizes(&self) -> PrizeTable {
        if self.players > 1 {
            PrizeTable::from_pool(self.entry_fee, self.players)
        } else {
            PrizeTable::default()
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            ticket_count: self.tickets,
            mark_mode: self.mark_mode,
            prizes: self.prizes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> GameConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), GameConfig::default());
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = GameConfig::from_env();
    }

    #[test]
    fn parses_every_variable() {
        let cfg = config(&[
            ("TAMBOLA_TICKETS", "5"),
            ("TAMBOLA_SEED", "99"),
            ("TAMBOLA_MARK_MODE", "manual"),
            ("TAMBOLA_AUTO_CALL", "true"),
            ("TAMBOLA_AUTO_CALL_MS", "2500"),
            ("TAMBOLA_ENTRY_FEE", "100"),
            ("TAMBOLA_PLAYERS", "8"),
            ("TAMBOLA_EVENT_LOG", "/tmp/events.jsonl"),
            ("TAMBOLA_LOG_FILE", " /tmp/tambola.log "),
        ]);
        assert_eq!(cfg.tickets, 5);
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.mark_mode, MarkMode::Manual);
        assert!(cfg.auto_call);
        assert_eq!(cfg.auto_call_ms, 2500);
        assert_eq!(cfg.event_log, Some(PathBuf::from("/tmp/events.jsonl")));
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/tambola.log")));
        assert_eq!(cfg.prizes(), PrizeTable::from_pool(100, 8));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[
            ("TAMBOLA_TICKETS", "many"),
            ("TAMBOLA_SEED", "-1"),
            ("TAMBOLA_MARK_MODE", "psychic"),
            ("TAMBOLA_AUTO_CALL_MS", "0"),
            ("TAMBOLA_EVENT_LOG", "   "),
        ]);
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn ticket_count_is_clamped() {
        assert_eq!(config(&[("TAMBOLA_TICKETS", "0")]).tickets, 1);
        assert_eq!(config(&[("TAMBOLA_TICKETS", "25")]).tickets, MAX_TICKETS);
    }

    #[test]
    fn single_player_keeps_fixed_prizes() {
        let cfg = config(&[("TAMBOLA_ENTRY_FEE", "10")]);
        assert_eq!(cfg.prizes(), PrizeTable::default());
        assert_eq!(cfg.session_options().prizes, PrizeTable::default());
    }
}
