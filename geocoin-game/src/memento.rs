//! Authoritative coin counts for caches the player has touched.
//!
//! A cache's current value is its memento when one exists, otherwise the
//! generator's deterministic default. Presence is explicit: a memento holding
//! `0` coins is an emptied cache, not a missing entry.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::grid::GridCell;

/// Persisted state of one cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMemento {
    pub cell_key: String,
    pub coin_count: u32,
}

impl CacheMemento {
    #[must_use]
    pub fn new(cell: &GridCell, coin_count: u32) -> Self {
        Self {
            cell_key: cell.key(),
            coin_count,
        }
    }
}

/// Memento manager keyed by [`GridCell::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MementoStore {
    mementos: BTreeMap<String, CacheMemento>,
}

impl MementoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the memento for `cell`, replacing any previous count.
    pub fn save(&mut self, cell: &GridCell, coin_count: u32) {
        let memento = CacheMemento::new(cell, coin_count);
        self.mementos.insert(memento.cell_key.clone(), memento);
    }

    /// Stored count for `cell`, or `None` when the cache was never touched.
    #[must_use]
    pub fn restore(&self, cell: &GridCell) -> Option<u32> {
        self.get(&cell.key()).map(|memento| memento.coin_count)
    }

    #[must_use]
    pub fn get(&self, cell_key: &str) -> Option<&CacheMemento> {
        self.mementos.get(cell_key)
    }

    #[must_use]
    pub fn contains(&self, cell: &GridCell) -> bool {
        self.mementos.contains_key(&cell.key())
    }

    pub fn clear(&mut self) {
        self.mementos.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    /// Mementos in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheMemento)> {
        self.mementos.iter()
    }

    /// Snapshot as `(cellKey, memento)` pairs, the persisted layout.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, CacheMemento)> {
        self.mementos
            .iter()
            .map(|(key, memento)| (key.clone(), memento.clone()))
            .collect()
    }

    /// Replace the whole store with loaded pairs, verbatim.
    pub fn load_entries(&mut self, entries: impl IntoIterator<Item = (String, CacheMemento)>) {
        self.mementos = entries.into_iter().collect();
    }
}
