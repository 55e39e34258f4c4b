//! Display rows and messages derived from session state.
use std::cell::RefCell;
use std::fmt;

use geocoin_game::coin::top_coin;
use geocoin_game::{
    AutoMove, Cache, DurableStore, GameSession, GridCell, Luck, MovementHistory, Outcome, Player,
    Refusal,
};

/// One visible cache as the panel shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRow {
    pub cell: GridCell,
    pub label: String,
    pub coin_count: u32,
    pub top_coin: Option<String>,
    pub can_collect: bool,
    pub can_deposit: bool,
}

impl CacheRow {
    #[must_use]
    pub fn from_cache(cache: &Cache, holding_coins: bool) -> Self {
        Self {
            cell: *cache.cell,
            label: format!("Cache {}", cache.cell),
            coin_count: cache.coin_count,
            top_coin: top_coin(&cache.cell, cache.coin_count).map(|coin| coin.to_string()),
            can_collect: cache.coin_count > 0,
            can_deposit: holding_coins,
        }
    }
}

/// Rows for every visible cache, ordered by cell.
#[must_use]
pub fn cache_rows<L: Luck, S: DurableStore>(session: &GameSession<L, S>) -> Vec<CacheRow> {
    let holding = session.player().coins_collected > 0;
    let mut rows: Vec<CacheRow> = session
        .caches()
        .iter()
        .map(|cache| CacheRow::from_cache(cache, holding))
        .collect();
    rows.sort_by_key(|row| row.cell);
    rows
}

#[must_use]
pub fn status_line(player: &Player) -> String {
    let coins = match player.coins_collected {
        1 => "1 coin".to_owned(),
        n => format!("{n} coins"),
    };
    match player.inventory.last() {
        Some(latest) => format!("At {} holding {coins}, latest {latest}", player.position),
        None => format!("At {} holding {coins}", player.position),
    }
}

#[must_use]
pub const fn refusal_message(refusal: Refusal) -> &'static str {
    match refusal {
        Refusal::NotReady => "The game is still loading",
        Refusal::InvalidPosition => "That location is not on the map",
        Refusal::NoCache => "There is no cache there",
        Refusal::OutOfRange => "That cache is too far away",
        Refusal::CacheEmpty => "That cache is empty",
        Refusal::PurseEmpty => "You have no coins to deposit",
        Refusal::CacheFull => "That cache cannot hold any more coins",
    }
}

/// Message for the result of one player action. Store failures are logged.
pub fn outcome_message<T, E: fmt::Display>(
    result: Result<Outcome<T>, E>,
    done: impl FnOnce(T) -> String,
) -> String {
    match result {
        Ok(Outcome::Done(value)) => done(value),
        Ok(Outcome::Refused(refusal)) => refusal_message(refusal).to_owned(),
        Err(err) => {
            log::error!("failed to save game: {err}");
            format!("Progress was not saved: {err}")
        }
    }
}

/// Where the player has walked, or `None` before the first move.
#[must_use]
pub fn trail_line(history: &MovementHistory) -> Option<String> {
    let points = history.points();
    let (first, last) = (points.first()?, points.last()?);
    let legs = points.len() - 1;
    let plural = if legs == 1 { "" } else { "s" };
    Some(format!("Walked {legs} step{plural} from {first} to {last}"))
}

/// One auto-move timer tick. `moved` runs after the session borrow is released.
pub fn auto_tick<L: Luck, S: DurableStore>(
    task: &mut AutoMove,
    session: &RefCell<GameSession<L, S>>,
    moved: impl FnOnce(),
) {
    let result = task.fire(&mut *session.borrow_mut());
    match result {
        Ok(Some(_)) => moved(),
        Ok(None) => {}
        Err(err) => log::error!("auto-move could not save: {err}"),
    }
}
