//! Centralized tuning constants for Geocoin game logic.
//!
//! These values define the deterministic world layout. The bundled JSON
//! config may override the gameplay knobs; everything that affects the save
//! format or seed derivation lives only here.

// Storage -----------------------------------------------------------------
pub const GAME_STATE_KEY: &str = "gameState";

// Seed derivation ---------------------------------------------------------
pub(crate) const CELL_KEY_DELIMITER: char = ',';
pub(crate) const VALUE_SEED_SUFFIX: &str = "value";
pub(crate) const MAX_INITIAL_COINS: u32 = 100;
pub(crate) const LUCK_HASH_SEED: u64 = 0;

// World defaults ----------------------------------------------------------
pub(crate) const DEFAULT_TILE_DEGREES: f64 = 1e-4;
pub(crate) const DEFAULT_NEIGHBORHOOD_RANGE: u32 = 8;
/// Largest scan radius a config may ask for; each regenerate visits (2r+1)^2 cells.
pub const MAX_NEIGHBORHOOD_RANGE: u32 = 64;
pub(crate) const DEFAULT_CACHE_PROBABILITY: f64 = 0.1;
pub(crate) const DEFAULT_START_LAT: f64 = 36.989_493_795_784_01;
pub(crate) const DEFAULT_START_LNG: f64 = -122.062_771_285_485_04;
pub(crate) const DEFAULT_ORIGIN_LAT: f64 = 0.0;
pub(crate) const DEFAULT_ORIGIN_LNG: f64 = 0.0;

// Auto-move ---------------------------------------------------------------
pub const AUTO_MOVE_INTERVAL_MS: u32 = 1_000;
