//! Whole-snapshot save and load of a game.
//!
//! Every write replaces the single `gameState` blob. Reads that find
//! malformed data report "no prior state" rather than failing the load.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;
use thiserror::Error;

use crate::DurableStore;
use crate::coin::Coin;
use crate::constants::GAME_STATE_KEY;
use crate::geo::LatLng;
use crate::grid::{CellKeyError, GridCell};
use crate::memento::{CacheMemento, MementoStore};
use crate::player::{MovementHistory, Player};

/// The persisted snapshot, stored as JSON under [`GAME_STATE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGameState {
    pub position: LatLng,
    pub coins_collected: u32,
    pub cache_states: Vec<(String, CacheMemento)>,
    #[serde(default)]
    pub movement_history: MovementHistory,
    #[serde(default)]
    pub inventory: Vec<Coin>,
}

#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("saved game is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    CellKey(#[from] CellKeyError),
    #[error("memento stored under {key:?} names cell {memento_key:?}")]
    KeyMismatch { key: String, memento_key: String },
    #[error("saved position is not finite")]
    Position,
}

#[derive(Debug, Error)]
pub enum PersistError<E> {
    #[error("durable store failure: {0}")]
    Store(#[source] E),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PersistedGameState {
    /// Snapshot the live game. Pure: nothing is mutated.
    #[must_use]
    pub fn serialize(player: &Player, mementos: &MementoStore, history: &MovementHistory) -> Self {
        Self {
            position: player.position,
            coins_collected: player.coins_collected,
            cache_states: mementos.entries(),
            movement_history: history.clone(),
            inventory: player.inventory.clone(),
        }
    }

    /// Parse a stored blob and check that every memento names a real cell.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, missing fields, unparsable cell
    /// keys, or a memento whose own key disagrees with its slot.
    pub fn deserialize(raw: &str) -> Result<Self, DeserializationError> {
        let state: Self = serde_json::from_str(raw)?;
        if !state.position.is_finite() {
            return Err(DeserializationError::Position);
        }
        for (key, memento) in &state.cache_states {
            key.parse::<GridCell>()?;
            if *key != memento.cell_key {
                return Err(DeserializationError::KeyMismatch {
                    key: key.clone(),
                    memento_key: memento.cell_key.clone(),
                });
            }
        }
        Ok(state)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild the player this snapshot was taken from.
    #[must_use]
    pub fn player(&self) -> Player {
        Player {
            position: self.position,
            coins_collected: self.coins_collected,
            inventory: self.inventory.clone(),
        }
    }
}

/// Thin wrapper binding a [`DurableStore`] to the fixed game-state key.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: DurableStore> Persistence<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or stored.
    pub fn write(&self, state: &PersistedGameState) -> Result<(), PersistError<S::Error>> {
        let json = state.to_json().map_err(PersistError::Serialize)?;
        self.store
            .set_item(GAME_STATE_KEY, &json)
            .map_err(PersistError::Store)?;
        log::debug!(
            "saved game: {} mementos, {} coins",
            state.cache_states.len(),
            state.coins_collected
        );
        Ok(())
    }

    /// Load the stored snapshot. Malformed data reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the durable store itself fails.
    pub fn read(&self) -> Result<Option<PersistedGameState>, S::Error> {
        let Some(raw) = self.store.get_item(GAME_STATE_KEY)? else {
            return Ok(None);
        };
        match PersistedGameState::deserialize(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                log::warn!("discarding unreadable saved game: {err}");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the durable store fails to remove the key.
    pub fn clear_all(&self) -> Result<(), S::Error> {
        self.store.remove_item(GAME_STATE_KEY)
    }
}

/// In-process [`DurableStore`]; clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl DurableStore for MemoryStore {
    type Error = Infallible;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
