//! Seeded random walks over a full game session.
//!
//! Each walk drives a session with random steps, auto-move bursts, collects
//! and deposits, then checks that coins were conserved, the save reloads to
//! the same game, the walk replays identically, and reset wipes the save.
use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use colored::Colorize;
use geocoin_game::{
    AutoMove, Direction, GAME_STATE_KEY, GameConfig, GameSession, GridCell, HashLuck,
    MemoryStore, Outcome, PersistedGameState, StartKind,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("coins not conserved: {started} generated, {in_caches} in caches, {held} held")]
    Conservation {
        started: u64,
        in_caches: u64,
        held: u64,
    },
    #[error("inventory lists {inventory} coins but the purse holds {purse}")]
    Inventory { inventory: usize, purse: u32 },
    #[error("cache {cell} disappeared after being visited")]
    MissingCache { cell: GridCell },
    #[error("saved game could not be read back: {0}")]
    Unreadable(String),
    #[error("reloaded game differs from the running one")]
    Reload,
    #[error("replaying the seed produced a different game")]
    Nondeterministic,
    #[error("reset left {0} behind")]
    Reset(&'static str),
    #[error("session failed: {0}")]
    Session(String),
}

fn session_failed(err: impl Display) -> InvariantViolation {
    InvariantViolation::Session(err.to_string())
}

/// Event counts for one or more walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub moves: u32,
    pub auto_moves: u32,
    pub collects: u32,
    pub deposits: u32,
    pub refusals: u32,
}

impl WalkStats {
    pub(crate) fn absorb(&mut self, other: Self) {
        self.moves += other.moves;
        self.auto_moves += other.auto_moves;
        self.collects += other.collects;
        self.deposits += other.deposits;
        self.refusals += other.refusals;
    }

    fn tally<T>(counter: &mut u32, refusals: &mut u32, outcome: &Outcome<T>) {
        if outcome.is_done() {
            *counter += 1;
        } else {
            *refusals += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub seed: u64,
    pub passed: bool,
    pub walks_run: usize,
    pub successful_walks: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_millis")]
    pub average_duration: Duration,
    pub stats: WalkStats,
}

struct Walk {
    session: GameSession<HashLuck, MemoryStore>,
    store: MemoryStore,
    initial: BTreeMap<GridCell, u32>,
    stats: WalkStats,
}

pub struct Simulation {
    config: GameConfig,
    steps: usize,
    verbose: bool,
}

impl Simulation {
    #[must_use]
    pub const fn new(config: GameConfig, steps: usize, verbose: bool) -> Self {
        Self {
            config,
            steps,
            verbose,
        }
    }

    /// Run `walks` independent walks derived from `seed`.
    #[must_use]
    pub fn run_seed(&self, seed: u64, walks: usize) -> SeedReport {
        let mut seeds = ChaCha20Rng::seed_from_u64(seed);
        let mut failures = Vec::new();
        let mut stats = WalkStats::default();
        let mut successful_walks = 0;
        let mut total = Duration::ZERO;

        for walk in 0..walks {
            let walk_seed: u64 = seeds.r#gen();
            let started = Instant::now();
            match self.check_walk(walk_seed) {
                Ok(walk_stats) => {
                    successful_walks += 1;
                    stats.absorb(walk_stats);
                    if self.verbose {
                        println!("  {} walk {walk} ({walk_seed:#x})", "✓".green());
                    }
                }
                Err(violation) => {
                    log::warn!("seed {seed} walk {walk} failed: {violation}");
                    failures.push(format!("walk {walk} ({walk_seed:#x}): {violation}"));
                }
            }
            total += started.elapsed();
        }

        let average_duration = u32::try_from(walks)
            .ok()
            .and_then(|count| total.checked_div(count))
            .unwrap_or_default();
        SeedReport {
            seed,
            passed: failures.is_empty(),
            walks_run: walks,
            successful_walks,
            failures,
            average_duration,
            stats,
        }
    }

    /// Play one walk and check every invariant against it.
    ///
    /// # Errors
    ///
    /// Returns the first invariant the walk breaks.
    pub fn check_walk(&self, seed: u64) -> Result<WalkStats, InvariantViolation> {
        let walk = self.walk(seed)?;
        check_conservation(&walk)?;
        self.check_reload(&walk)?;
        let replay = self.walk(seed)?;
        if replay.session.snapshot() != walk.session.snapshot() {
            return Err(InvariantViolation::Nondeterministic);
        }
        let stats = walk.stats;
        check_reset(walk)?;
        Ok(stats)
    }

    fn walk(&self, seed: u64) -> Result<Walk, InvariantViolation> {
        let store = MemoryStore::new();
        let mut session = GameSession::with_default_luck(self.config.clone(), store.clone());
        session.start().map_err(session_failed)?;
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut initial = BTreeMap::new();
        let mut stats = WalkStats::default();

        for _ in 0..self.steps {
            match rng.gen_range(0..20) {
                0..=6 => {
                    let outcome = session
                        .step(random_direction(&mut rng))
                        .map_err(session_failed)?;
                    WalkStats::tally(&mut stats.moves, &mut stats.refusals, &outcome);
                }
                7 => {
                    let (mut task, handle) = AutoMove::new(random_direction(&mut rng));
                    let ticks = rng.gen_range(1..=3);
                    for tick in 0..=ticks {
                        if tick == ticks {
                            handle.stop();
                        }
                        if let Some(outcome) = task.fire(&mut session).map_err(session_failed)? {
                            WalkStats::tally(&mut stats.auto_moves, &mut stats.refusals, &outcome);
                        }
                    }
                }
                roll => {
                    let caches = session.caches();
                    if caches.is_empty() {
                        continue;
                    }
                    let cell = *caches[rng.gen_range(0..caches.len())].cell;
                    initial
                        .entry(cell)
                        .or_insert_with(|| session.world().generator().initial_value(&cell));
                    if roll < 15 {
                        let outcome = session.collect(&cell).map_err(session_failed)?;
                        WalkStats::tally(&mut stats.collects, &mut stats.refusals, &outcome);
                    } else {
                        let outcome = session.deposit(&cell).map_err(session_failed)?;
                        WalkStats::tally(&mut stats.deposits, &mut stats.refusals, &outcome);
                    }
                }
            }
        }

        Ok(Walk {
            session,
            store,
            initial,
            stats,
        })
    }

    fn check_reload(&self, walk: &Walk) -> Result<(), InvariantViolation> {
        let Some(raw) = walk.store.raw(GAME_STATE_KEY) else {
            return Ok(());
        };
        let saved = PersistedGameState::deserialize(&raw)
            .map_err(|err| InvariantViolation::Unreadable(err.to_string()))?;
        let mut reloaded =
            GameSession::with_default_luck(self.config.clone(), walk.store.clone());
        let kind = reloaded.start().map_err(session_failed)?;
        if !matches!(kind, StartKind::Resumed { .. })
            || saved != walk.session.snapshot()
            || reloaded.snapshot() != saved
        {
            return Err(InvariantViolation::Reload);
        }
        Ok(())
    }
}

fn random_direction(rng: &mut ChaCha20Rng) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

fn check_conservation(walk: &Walk) -> Result<(), InvariantViolation> {
    let player = walk.session.player();
    let purse = player.coins_collected;
    if player.inventory.len() != purse as usize {
        return Err(InvariantViolation::Inventory {
            inventory: player.inventory.len(),
            purse,
        });
    }
    let started: u64 = walk.initial.values().map(|v| u64::from(*v)).sum();
    let mut in_caches = 0_u64;
    for cell in walk.initial.keys() {
        let value = walk
            .session
            .current_value(cell)
            .ok_or(InvariantViolation::MissingCache { cell: *cell })?;
        in_caches += u64::from(value);
    }
    let held = u64::from(purse);
    if started != in_caches + held {
        return Err(InvariantViolation::Conservation {
            started,
            in_caches,
            held,
        });
    }
    Ok(())
}

fn check_reset(mut walk: Walk) -> Result<(), InvariantViolation> {
    walk.session.reset().map_err(session_failed)?;
    if walk.store.raw(GAME_STATE_KEY).is_some() {
        return Err(InvariantViolation::Reset("a saved game"));
    }
    if !walk.session.world().mementos().is_empty() {
        return Err(InvariantViolation::Reset("cache mementos"));
    }
    if !walk.session.history().is_empty() || walk.session.player().coins_collected != 0 {
        return Err(InvariantViolation::Reset("player progress"));
    }
    Ok(())
}

mod duration_millis {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_config() -> GameConfig {
        GameConfig::default()
            .with_cache_probability(0.4)
            .with_neighborhood_range(2)
    }

    #[test]
    fn walks_hold_every_invariant() {
        let simulation = Simulation::new(busy_config(), 150, false);
        let report = simulation.run_seed(1337, 4);
        assert!(report.passed, "{:?}", report.failures);
        assert_eq!(report.successful_walks, 4);
        assert!(report.stats.collects > 0);
        assert!(report.stats.moves > 0);
    }

    #[test]
    fn reports_are_reproducible() {
        let simulation = Simulation::new(busy_config(), 80, false);
        let a = simulation.run_seed(9, 2);
        let b = simulation.run_seed(9, 2);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn zero_walks_is_an_empty_pass() {
        let report = Simulation::new(busy_config(), 10, false).run_seed(1, 0);
        assert!(report.passed);
        assert_eq!(report.average_duration, Duration::ZERO);
    }

    #[test]
    fn violations_read_cleanly() {
        let err = InvariantViolation::MissingCache {
            cell: GridCell::new(3, 5),
        };
        assert_eq!(err.to_string(), "cache 3,5 disappeared after being visited");
    }
}
