//! Best score persistence
//!
//! One integer per game identity, persisted to LocalStorage on wasm32 and
//! held in memory elsewhere. Loaded at session start, written at session end,
//! never touched mid-round.

use serde::{Deserialize, Serialize};

use crate::sinks::ScoreStore;

/// Persisted payload - a single integer, versioned only by its storage key
/// (read and written only on wasm32)
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
struct StoredBest {
    best: u64,
}

/// Best score for one game identity
#[derive(Debug, Clone)]
pub struct BestScore {
    /// Storage key suffix distinguishing game identities
    game_id: String,
    value: u64,
}

impl BestScore {
    /// Load the best score for `game_id` (zero when nothing is stored)
    pub fn load(game_id: &str) -> Self {
        let value = read_storage(game_id).unwrap_or(0);
        if value > 0 {
            log::info!("Loaded best score {} for {}", value, game_id);
        } else {
            log::info!("No stored best score for {}, starting fresh", game_id);
        }
        Self {
            game_id: game_id.to_string(),
            value,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a finished round. Keeps the maximum and persists only on
    /// improvement; returns true when the record moved.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        write_storage(&self.game_id, score);
        log::info!("New best score {} for {}", score, self.game_id);
        true
    }
}

impl ScoreStore for BestScore {
    fn load_best(&self) -> u64 {
        self.value
    }

    fn save_best(&mut self, score: u64) {
        self.record(score);
    }
}

#[allow(dead_code)]
fn storage_key(game_id: &str) -> String {
    format!("pond_arena_best_{game_id}")
}

#[cfg(target_arch = "wasm32")]
fn read_storage(game_id: &str) -> Option<u64> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()?;
    let json = storage.get_item(&storage_key(game_id)).ok()??;
    serde_json::from_str::<StoredBest>(&json).ok().map(|s| s.best)
}

#[cfg(target_arch = "wasm32")]
fn write_storage(game_id: &str, best: u64) {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten();
    if let Some(storage) = storage {
        if let Ok(json) = serde_json::to_string(&StoredBest { best }) {
            let _ = storage.set_item(&storage_key(game_id), &json);
        }
    }
}

/// Native stubs - scores live for the process only
#[cfg(not(target_arch = "wasm32"))]
fn read_storage(_game_id: &str) -> Option<u64> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write_storage(_game_id: &str, _best: u64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut best = BestScore::load("test");
        assert_eq!(best.value(), 0);
        assert!(best.record(150));
        assert!(!best.record(100), "lower score does not replace the best");
        assert_eq!(best.value(), 150);
        assert!(best.record(151));
        assert_eq!(best.value(), 151);
    }

    #[test]
    fn test_store_round_trip_is_monotonic() {
        let mut store = BestScore::load("round-trip");
        store.save_best(90);
        store.save_best(40);
        assert_eq!(store.load_best(), 90u64.max(40));
    }

    #[test]
    fn test_payload_serializes_flat() {
        let json = serde_json::to_string(&StoredBest { best: 42 }).expect("serialize");
        assert_eq!(json, r#"{"best":42}"#);
    }
}
