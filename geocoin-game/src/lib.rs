//! Geocoin Game Engine
//!
//! Platform-agnostic core for the Geocoin map game: deterministic cache
//! placement on a lat/lng grid, coin mementos that survive regeneration, and
//! whole-snapshot persistence. No UI or browser dependencies live here.

pub mod auto_move;
pub mod coin;
pub mod config;
pub mod constants;
pub mod generator;
pub mod geo;
pub mod grid;
pub mod luck;
pub mod memento;
pub mod numbers;
pub mod persistence;
pub mod player;
pub mod session;
pub mod world;

// Re-export commonly used types
pub use auto_move::{AutoMove, AutoMoveHandle};
pub use coin::{Coin, coins_in_cache};
pub use config::{ConfigError, GameConfig};
pub use constants::{AUTO_MOVE_INTERVAL_MS, GAME_STATE_KEY, MAX_NEIGHBORHOOD_RANGE};
pub use generator::{CacheGenerator, spawn_seed, value_seed};
pub use geo::{Direction, LatLng};
pub use grid::{Board, CellBounds, CellKeyError, GridCell};
pub use luck::{HashLuck, Luck};
pub use memento::{CacheMemento, MementoStore};
pub use persistence::{
    DeserializationError, MemoryStore, PersistError, PersistedGameState, Persistence,
};
pub use player::{MovementHistory, Player};
pub use session::{GameSession, Outcome, Refusal, SessionPhase, SessionResult, StartKind};
pub use world::{Cache, World};

/// Trait for abstracting the key-value store the game saves into.
/// Platform-specific implementations should provide this
pub trait DurableStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key` if present
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be removed.
    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}

impl<T: DurableStore + ?Sized> DurableStore for &T {
    type Error = T::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fmt;

    #[derive(Debug)]
    struct QuotaExceeded;

    impl fmt::Display for QuotaExceeded {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("quota exceeded")
        }
    }

    impl std::error::Error for QuotaExceeded {}

    /// Store that reads fine but refuses every write.
    #[derive(Default)]
    struct ReadOnlyStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl DurableStore for ReadOnlyStore {
        type Error = QuotaExceeded;

        fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }

        fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
            self.items.borrow_mut().remove(key);
            Ok(())
        }
    }

    #[test]
    fn store_failures_surface_but_state_stays_consistent() {
        let store = ReadOnlyStore::default();
        let mut session = GameSession::with_default_luck(GameConfig::default(), &store);
        assert_eq!(session.start().unwrap(), StartKind::Fresh);

        let err = session.step(Direction::North).unwrap_err();
        assert!(matches!(err, PersistError::Store(QuotaExceeded)));
        assert_eq!(err.to_string(), "durable store failure: quota exceeded");
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn borrowed_stores_share_state() {
        let store = MemoryStore::new();
        {
            let mut session = GameSession::with_default_luck(GameConfig::default(), &store);
            session.start().unwrap();
            session.step(Direction::South).unwrap();
        }
        assert!(store.raw(GAME_STATE_KEY).is_some());
    }
}
