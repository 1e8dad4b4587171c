//! Best-score bookkeeping over an injected key/value store.
//!
//! The engine never talks to browser storage directly: anything that can get,
//! set and remove strings by key works, so tests run against [`MemoryStore`]
//! and the WASM layer plugs in `localStorage`.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::StoreError;

/// String key/value storage capability.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Identity of a puzzle instance for best-score tracking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigKey {
    pub width: usize,
    pub height: usize,
    pub strains: u8,
    pub seed: String,
}

impl ConfigKey {
    pub fn new(config: &GameConfig, seed: impl Into<String>) -> Self {
        Self {
            width: config.width,
            height: config.height,
            strains: config.strains,
            seed: seed.into(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "virusFlood:best:{}x{}:{}:{}",
            self.width, self.height, self.strains, self.seed
        )
    }
}

/// Lowest winning move count per configuration.
#[derive(Debug, Default)]
pub struct BestScores<S> {
    store: S,
}

impl<S: ScoreStore> BestScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, key: &ConfigKey) -> Option<u32> {
        let key = key.to_string();
        let raw = self.store.get(&key)?;
        match raw.trim().parse() {
            Ok(moves) => Some(moves),
            Err(_) => {
                warn!(%key, value = %raw, "ignoring unreadable best score");
                None
            }
        }
    }

    /// Store `moves` if it beats the recorded best. Returns true once a new
    /// best has been written.
    pub fn record(&mut self, key: &ConfigKey, moves: u32) -> bool {
        if self.get(key).is_some_and(|best| moves >= best) {
            return false;
        }
        match self.store.set(&key.to_string(), moves.to_string()) {
            Ok(()) => {
                info!(%key, moves, "new best score");
                true
            }
            Err(err) => {
                warn!(%key, moves, %err, "best score not saved");
                false
            }
        }
    }

    /// Returns false if the store kept the old value.
    pub fn reset(&mut self, key: &ConfigKey) -> bool {
        match self.store.remove(&key.to_string()) {
            Ok(()) => true,
            Err(err) => {
                warn!(%key, %err, "best score not cleared");
                false
            }
        }
    }
}
