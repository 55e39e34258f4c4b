//! World configuration: grid geometry, spawn odds, and start location.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_CACHE_PROBABILITY, DEFAULT_NEIGHBORHOOD_RANGE, DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG,
    DEFAULT_START_LAT, DEFAULT_START_LNG, DEFAULT_TILE_DEGREES, MAX_NEIGHBORHOOD_RANGE,
};
use crate::geo::LatLng;

const DEFAULT_CONFIG_DATA: &str =
    include_str!("../../geocoin-web/static/assets/data/config.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tile size must be a positive finite number of degrees, got {0}")]
    TileSize(f64),
    #[error("cache probability must be within [0, 1], got {0}")]
    Probability(f64),
    #[error("neighborhood range must be at most {MAX_NEIGHBORHOOD_RANGE} cells, got {0}")]
    Range(u32),
    #[error("{field} must have finite coordinates")]
    NonFinite { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Degrees of latitude/longitude covered by one grid cell.
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
    /// Chebyshev radius, in cells, scanned around the player.
    #[serde(default = "default_neighborhood_range")]
    pub neighborhood_range: u32,
    #[serde(default = "default_cache_probability")]
    pub cache_probability: f64,
    #[serde(default = "default_start_location")]
    pub start_location: LatLng,
    /// Geographic anchor of cell (0, 0).
    #[serde(default = "default_origin")]
    pub origin: LatLng,
}

const fn default_tile_size() -> f64 {
    DEFAULT_TILE_DEGREES
}

const fn default_neighborhood_range() -> u32 {
    DEFAULT_NEIGHBORHOOD_RANGE
}

const fn default_cache_probability() -> f64 {
    DEFAULT_CACHE_PROBABILITY
}

const fn default_start_location() -> LatLng {
    LatLng::new(DEFAULT_START_LAT, DEFAULT_START_LNG)
}

const fn default_origin() -> LatLng {
    LatLng::new(DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            neighborhood_range: default_neighborhood_range(),
            cache_probability: default_cache_probability(),
            start_location: default_start_location(),
            origin: default_origin(),
        }
    }
}

impl GameConfig {
    /// Load the bundled config asset, falling back to compiled defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CONFIG_DATA).unwrap_or_else(|err| {
            log::warn!("bundled config rejected, using defaults: {err}");
            Self::default()
        })
    }

    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the config describes a usable world.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if !(0.0..=1.0).contains(&self.cache_probability) {
            return Err(ConfigError::Probability(self.cache_probability));
        }
        if self.neighborhood_range > MAX_NEIGHBORHOOD_RANGE {
            return Err(ConfigError::Range(self.neighborhood_range));
        }
        if !self.start_location.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "startLocation",
            });
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::NonFinite { field: "origin" });
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_cache_probability(mut self, probability: f64) -> Self {
        self.cache_probability = probability;
        self
    }

    #[must_use]
    pub const fn with_neighborhood_range(mut self, range: u32) -> Self {
        self.neighborhood_range = range;
        self
    }
}
