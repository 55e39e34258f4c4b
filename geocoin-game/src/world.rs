//! The cache world: grid, generator, and mementos behind one accessor.
use std::rc::Rc;

use crate::coin::{Coin, coins_in_cache};
use crate::config::GameConfig;
use crate::generator::CacheGenerator;
use crate::geo::LatLng;
use crate::grid::{Board, CellBounds, GridCell};
use crate::luck::Luck;
use crate::memento::MementoStore;

/// A spawned cache as the UI layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    pub cell: Rc<GridCell>,
    pub bounds: CellBounds,
    pub coin_count: u32,
}

impl Cache {
    #[must_use]
    pub fn key(&self) -> String {
        self.cell.key()
    }

    #[must_use]
    pub fn coins(&self) -> Vec<Coin> {
        coins_in_cache(&self.cell, self.coin_count)
    }
}

#[derive(Debug, Clone)]
pub struct World<L> {
    board: Board,
    generator: CacheGenerator<L>,
    mementos: MementoStore,
}

impl<L: Luck> World<L> {
    #[must_use]
    pub fn new(config: &GameConfig, luck: L) -> Self {
        Self {
            board: Board::from_config(config),
            generator: CacheGenerator::new(luck, config.cache_probability),
            mementos: MementoStore::new(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub const fn generator(&self) -> &CacheGenerator<L> {
        &self.generator
    }

    #[must_use]
    pub const fn mementos(&self) -> &MementoStore {
        &self.mementos
    }

    pub const fn mementos_mut(&mut self) -> &mut MementoStore {
        &mut self.mementos
    }

    /// Current coins in `cell`: the memento if present, else the generated
    /// default. `None` when no cache spawns there, even if a stale memento
    /// exists for the key.
    #[must_use]
    pub fn current_value(&self, cell: &GridCell) -> Option<u32> {
        if !self.generator.should_spawn(cell) {
            return None;
        }
        Some(
            self.mementos
                .restore(cell)
                .unwrap_or_else(|| self.generator.initial_value(cell)),
        )
    }

    /// Record an authoritative count for `cell`.
    pub fn set_value(&mut self, cell: &GridCell, coin_count: u32) {
        self.mementos.save(cell, coin_count);
    }

    /// Spawned caches in the neighborhood of `point`.
    pub fn caches_near(&mut self, point: LatLng) -> Vec<Cache> {
        let cells = self.board.cells_near_point(point);
        cells
            .into_iter()
            .filter_map(|cell| {
                let coin_count = self.current_value(&cell)?;
                let bounds = self.board.cell_bounds(&cell);
                Some(Cache {
                    cell,
                    bounds,
                    coin_count,
                })
            })
            .collect()
    }

    /// Stored keys that no longer name a spawning cell.
    #[must_use]
    pub fn orphaned_mementos(&self) -> Vec<String> {
        self.mementos
            .iter()
            .filter(|(key, _)| {
                !key.parse::<GridCell>()
                    .is_ok_and(|cell| self.generator.should_spawn(&cell))
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drop all mutations; the world reverts to its generated defaults.
    pub fn reset(&mut self) {
        self.mementos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(key: &str) -> f64 {
        match key {
            "3,5" | "0,0" => 0.05,
            "3,5,value" => 0.42,
            "0,0,value" => 0.0,
            _ => 0.9,
        }
    }

    fn world() -> World<fn(&str) -> f64> {
        let config = GameConfig::default()
            .with_cache_probability(0.1)
            .with_neighborhood_range(1);
        World::new(&config, scripted as fn(&str) -> f64)
    }

    #[test]
    fn untouched_cache_uses_generated_value() {
        let world = world();
        assert_eq!(world.current_value(&GridCell::new(3, 5)), Some(42));
        assert_eq!(world.current_value(&GridCell::new(9, 9)), None);
    }

    #[test]
    fn emptied_cache_stays_empty() {
        let mut world = world();
        let cell = GridCell::new(3, 5);
        world.set_value(&cell, 0);
        assert_eq!(world.current_value(&cell), Some(0));
    }

    #[test]
    fn memento_for_non_spawning_cell_is_orphaned() {
        let mut world = world();
        world.set_value(&GridCell::new(9, 9), 4);
        world.set_value(&GridCell::new(3, 5), 40);
        assert_eq!(world.current_value(&GridCell::new(9, 9)), None);
        assert_eq!(world.orphaned_mementos(), ["9,9"]);
        assert_eq!(world.mementos().len(), 2);
    }

    #[test]
    fn caches_near_lists_only_spawned_cells() {
        let mut world = world();
        let tile = world.board().tile_size();
        let near_origin = LatLng::new(tile / 2.0, tile / 2.0);
        let caches = world.caches_near(near_origin);
        assert_eq!(caches.len(), 1);
        assert_eq!(caches[0].key(), "0,0");
        assert_eq!(caches[0].coin_count, 0);
        assert!(caches[0].bounds.contains(near_origin));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut world = world();
        let cell = GridCell::new(3, 5);
        world.set_value(&cell, 1);
        world.reset();
        assert_eq!(world.current_value(&cell), Some(42));
    }
}
