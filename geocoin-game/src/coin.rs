//! Coin identities shown to the player.
//!
//! Gameplay only ever moves counts around; a [`Coin`] is the display handle
//! for one unit, tagged with the cache it currently lives in.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::GridCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub i: i32,
    pub j: i32,
    pub serial: u32,
}

impl Coin {
    #[must_use]
    pub const fn new(cell: &GridCell, serial: u32) -> Self {
        Self {
            i: cell.i,
            j: cell.j,
            serial,
        }
    }

    #[must_use]
    pub const fn home(&self) -> GridCell {
        GridCell::new(self.i, self.j)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.i, self.j, self.serial)
    }
}

/// Coins held by a cache with `count` coins, lowest serial first.
#[must_use]
pub fn coins_in_cache(cell: &GridCell, count: u32) -> Vec<Coin> {
    (0..count).map(|serial| Coin::new(cell, serial)).collect()
}

/// The coin a collect would hand over: the highest serial present.
#[must_use]
pub fn top_coin(cell: &GridCell, count: u32) -> Option<Coin> {
    count.checked_sub(1).map(|serial| Coin::new(cell, serial))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_render_with_home_and_serial() {
        let coin = Coin::new(&GridCell::new(369_894, -1_220_628), 7);
        assert_eq!(coin.to_string(), "369894:-1220628#7");
        assert_eq!(coin.home(), GridCell::new(369_894, -1_220_628));
    }

    #[test]
    fn cache_listing_matches_count() {
        let cell = GridCell::new(3, 5);
        let coins = coins_in_cache(&cell, 3);
        let labels: Vec<String> = coins.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["3:5#0", "3:5#1", "3:5#2"]);
        assert_eq!(top_coin(&cell, 3), Some(Coin::new(&cell, 2)));
        assert_eq!(top_coin(&cell, 0), None);
        assert!(coins_in_cache(&cell, 0).is_empty());
    }
}
