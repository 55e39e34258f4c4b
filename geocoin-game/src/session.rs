//! Game session controller.
//!
//! Owns the player, the cache world, and the persistence binding, and runs
//! every user event through them in a fixed order: mutate, regenerate the
//! visible neighborhood, then persist the full snapshot.
use std::rc::Rc;

use crate::DurableStore;
use crate::coin::{Coin, top_coin};
use crate::config::GameConfig;
use crate::geo::{Direction, LatLng};
use crate::grid::GridCell;
use crate::luck::{HashLuck, Luck};
use crate::persistence::{PersistError, PersistedGameState, Persistence};
use crate::player::{MovementHistory, Player};
use crate::world::{Cache, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Uninitialized,
    Ready,
    Moving,
    Collecting,
    Depositing,
    Resetting,
}

/// Why an event was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Refusal {
    NotReady,
    InvalidPosition,
    NoCache,
    OutOfRange,
    CacheEmpty,
    PurseEmpty,
    CacheFull,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Refused(Refusal),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    #[must_use]
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Refused(_) => None,
        }
    }
}

/// How `start` found durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartKind {
    Fresh,
    Resumed { orphaned_mementos: usize },
}

pub type SessionResult<T, S> = Result<T, PersistError<<S as DurableStore>::Error>>;

#[derive(Debug)]
pub struct GameSession<L, S> {
    config: GameConfig,
    world: World<L>,
    player: Player,
    history: MovementHistory,
    persistence: Persistence<S>,
    caches: Vec<Cache>,
    phase: SessionPhase,
}

impl<S: DurableStore> GameSession<HashLuck, S> {
    /// Session over the default hashed world.
    #[must_use]
    pub fn with_default_luck(config: GameConfig, store: S) -> Self {
        Self::new(config, HashLuck::new(), store)
    }
}

impl<L: Luck, S: DurableStore> GameSession<L, S> {
    #[must_use]
    pub fn new(config: GameConfig, luck: L, store: S) -> Self {
        let world = World::new(&config, luck);
        let player = Player::new(config.start_location);
        Self {
            config,
            world,
            player,
            history: MovementHistory::new(),
            persistence: Persistence::new(store),
            caches: Vec::new(),
            phase: SessionPhase::Uninitialized,
        }
    }

    /// Load any saved game, then build the starting neighborhood.
    ///
    /// Unreadable saves start a fresh game.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable store itself fails.
    pub fn start(&mut self) -> SessionResult<StartKind, S> {
        let saved = self.persistence.read().map_err(PersistError::Store)?;
        let kind = match saved {
            Some(state) => self.apply_snapshot(state),
            None => {
                self.player = Player::new(self.config.start_location);
                self.history.clear();
                self.world.reset();
                StartKind::Fresh
            }
        };
        self.regenerate();
        self.phase = SessionPhase::Ready;
        log::debug!("session started ({kind:?}) at {}", self.player.position);
        Ok(kind)
    }

    fn apply_snapshot(&mut self, state: PersistedGameState) -> StartKind {
        self.player = state.player();
        self.history = state.movement_history;
        self.world.mementos_mut().load_entries(state.cache_states);
        let orphaned = self.world.orphaned_mementos();
        if !orphaned.is_empty() {
            log::warn!(
                "{} saved caches no longer spawn and will be ignored",
                orphaned.len()
            );
        }
        StartKind::Resumed {
            orphaned_mementos: orphaned.len(),
        }
    }

    /// Move the player to `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn move_to(&mut self, position: LatLng) -> SessionResult<Outcome<Rc<GridCell>>, S> {
        if self.phase != SessionPhase::Ready {
            return Ok(Outcome::Refused(Refusal::NotReady));
        }
        if !position.is_finite() {
            return Ok(Outcome::Refused(Refusal::InvalidPosition));
        }
        self.transition(SessionPhase::Moving, |session| {
            if session.history.is_empty() {
                session.history.record(session.player.position);
            }
            session.player.position = position;
            session.history.record(position);
            session.regenerate();
            session.persist()?;
            Ok(Outcome::Done(session.player_cell()))
        })
    }

    /// Move one tile in `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn step(&mut self, direction: Direction) -> SessionResult<Outcome<Rc<GridCell>>, S> {
        let (d_lat, d_lng) = direction.unit();
        let tile = self.config.tile_size;
        let target = self.player.position.offset(d_lat * tile, d_lng * tile);
        self.move_to(target)
    }

    /// Take one coin from the cache in `cell`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn collect(&mut self, cell: &GridCell) -> SessionResult<Outcome<Coin>, S> {
        let count = match self.reachable_cache(cell) {
            Ok(count) => count,
            Err(refusal) => return Ok(Outcome::Refused(refusal)),
        };
        let Some(coin) = top_coin(cell, count) else {
            return Ok(Outcome::Refused(Refusal::CacheEmpty));
        };
        self.transition(SessionPhase::Collecting, |session| {
            session.world.set_value(cell, coin.serial);
            session.player.receive(Some(coin));
            session.refresh_cache(cell);
            session.persist()?;
            Ok(Outcome::Done(coin))
        })
    }

    /// Put one of the player's coins into the cache in `cell`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn deposit(&mut self, cell: &GridCell) -> SessionResult<Outcome<Coin>, S> {
        let count = match self.reachable_cache(cell) {
            Ok(count) => count,
            Err(refusal) => return Ok(Outcome::Refused(refusal)),
        };
        if self.player.coins_collected == 0 {
            return Ok(Outcome::Refused(Refusal::PurseEmpty));
        }
        let Some(next) = count.checked_add(1) else {
            return Ok(Outcome::Refused(Refusal::CacheFull));
        };
        self.transition(SessionPhase::Depositing, |session| {
            session.player.spend();
            let minted = Coin::new(cell, count);
            session.world.set_value(cell, next);
            session.refresh_cache(cell);
            session.persist()?;
            Ok(Outcome::Done(minted))
        })
    }

    /// Wipe all progress: mementos, saved game, trail, and position.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved game cannot be removed.
    pub fn reset(&mut self) -> SessionResult<(), S> {
        if self.phase == SessionPhase::Uninitialized {
            self.phase = SessionPhase::Ready;
        }
        self.transition(SessionPhase::Resetting, |session| {
            session.world.reset();
            session.history.clear();
            session.player = Player::new(session.config.start_location);
            session.regenerate();
            session
                .persistence
                .clear_all()
                .map_err(PersistError::Store)?;
            log::debug!("game reset to {}", session.player.position);
            Ok(())
        })
    }

    /// Write the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or stored.
    pub fn persist(&self) -> SessionResult<(), S> {
        self.persistence.write(&self.snapshot())
    }

    #[must_use]
    pub fn snapshot(&self) -> PersistedGameState {
        PersistedGameState::serialize(&self.player, self.world.mementos(), &self.history)
    }

    #[must_use]
    pub fn current_value(&self, cell: &GridCell) -> Option<u32> {
        self.world.current_value(cell)
    }

    /// Visible cache in `cell`, if any.
    #[must_use]
    pub fn cache_at(&self, cell: &GridCell) -> Option<&Cache> {
        self.caches.iter().find(|cache| *cache.cell == *cell)
    }

    #[must_use]
    pub fn caches(&self) -> &[Cache] {
        &self.caches
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub const fn history(&self) -> &MovementHistory {
        &self.history
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn world(&self) -> &World<L> {
        &self.world
    }

    pub fn player_cell(&mut self) -> Rc<GridCell> {
        self.world.board_mut().cell_for_point(self.player.position)
    }

    fn transition<T>(
        &mut self,
        phase: SessionPhase,
        op: impl FnOnce(&mut Self) -> SessionResult<T, S>,
    ) -> SessionResult<T, S> {
        self.phase = phase;
        let result = op(self);
        self.phase = SessionPhase::Ready;
        result
    }

    fn reachable_cache(&mut self, cell: &GridCell) -> Result<u32, Refusal> {
        if self.phase != SessionPhase::Ready {
            return Err(Refusal::NotReady);
        }
        let here = self.player_cell();
        if here.distance(cell) > self.config.neighborhood_range {
            return Err(Refusal::OutOfRange);
        }
        self.world.current_value(cell).ok_or(Refusal::NoCache)
    }

    fn regenerate(&mut self) {
        self.caches = self.world.caches_near(self.player.position);
        log::debug!("{} caches in view", self.caches.len());
    }

    fn refresh_cache(&mut self, cell: &GridCell) {
        let Some(count) = self.world.current_value(cell) else {
            return;
        };
        if let Some(cache) = self.caches.iter_mut().find(|cache| *cache.cell == *cell) {
            cache.coin_count = count;
        }
    }
}
