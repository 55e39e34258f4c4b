//! Player position, purse, and the trail of visited positions.
use serde::{Deserialize, Serialize};

use crate::coin::Coin;
use crate::geo::LatLng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub position: LatLng,
    pub coins_collected: u32,
    /// Collected coin identities, most recent last. Display only.
    #[serde(default)]
    pub inventory: Vec<Coin>,
}

impl Player {
    #[must_use]
    pub const fn new(position: LatLng) -> Self {
        Self {
            position,
            coins_collected: 0,
            inventory: Vec::new(),
        }
    }

    pub(crate) fn receive(&mut self, coin: Option<Coin>) {
        self.coins_collected = self.coins_collected.saturating_add(1);
        if let Some(coin) = coin {
            self.inventory.push(coin);
        }
    }

    /// Give up the most recently collected coin. `false` when the purse is empty.
    pub(crate) fn spend(&mut self) -> bool {
        let Some(remaining) = self.coins_collected.checked_sub(1) else {
            return false;
        };
        self.coins_collected = remaining;
        self.inventory.pop();
        true
    }
}

/// Positions the player has occupied, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementHistory {
    points: Vec<LatLng>,
}

impl MovementHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append `point` unless it repeats the last recorded position.
    pub fn record(&mut self, point: LatLng) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    #[must_use]
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCell;

    #[test]
    fn spending_an_empty_purse_is_refused() {
        let mut player = Player::new(LatLng::default());
        assert!(!player.spend());
        assert_eq!(player.coins_collected, 0);
    }

    #[test]
    fn receive_then_spend_empties_the_inventory() {
        let mut player = Player::new(LatLng::default());
        let coin = Coin::new(&GridCell::new(3, 5), 41);
        player.receive(Some(coin));
        assert_eq!(player.coins_collected, 1);
        assert_eq!(player.inventory, [coin]);
        assert!(player.spend());
        assert_eq!(player.coins_collected, 0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn history_skips_repeats() {
        let mut history = MovementHistory::new();
        let here = LatLng::new(1.0, 2.0);
        history.record(here);
        history.record(here);
        history.record(here.offset(0.1, 0.0));
        assert_eq!(history.len(), 2);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn inventory_defaults_when_missing_from_json() {
        let player: Player =
            serde_json::from_str(r#"{"position":{"lat":1.0,"lng":2.0},"coinsCollected":3}"#)
                .unwrap();
        assert_eq!(player.coins_collected, 3);
        assert!(player.inventory.is_empty());
    }
}
