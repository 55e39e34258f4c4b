//! Grid canonicalization: geographic points to shared cell instances.
//!
//! The [`Board`] is a flyweight factory. Every lookup that floors to the same
//! `(i, j)` returns the same `Rc<GridCell>`, so rectangles, cache views, and
//! memento lookups keyed by a cell can never drift apart through float jitter.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

use crate::config::GameConfig;
use crate::constants::CELL_KEY_DELIMITER;
use crate::geo::LatLng;
use crate::numbers::floor_f64_to_i32;

/// A tile identified by integer offsets from the grid origin. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
}

impl GridCell {
    #[must_use]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Delimited `"i,j"` key. Injective: `(1, 23)` and `(12, 3)` differ.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Chebyshev distance in cells.
    #[must_use]
    pub const fn distance(&self, other: &Self) -> u32 {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        if di > dj { di } else { dj }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CELL_KEY_DELIMITER}{}", self.i, self.j)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell key {0:?}")]
pub struct CellKeyError(pub String);

impl FromStr for GridCell {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CellKeyError(s.to_string());
        let (i, j) = s.split_once(CELL_KEY_DELIMITER).ok_or_else(invalid)?;
        let i = i.parse().map_err(|_| invalid())?;
        let j = j.parse().map_err(|_| invalid())?;
        Ok(Self { i, j })
    }
}

/// South-west and north-east corners of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl CellBounds {
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south_west.lat..self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..self.north_east.lng).contains(&point.lng)
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            f64::midpoint(self.south_west.lat, self.north_east.lat),
            f64::midpoint(self.south_west.lng, self.north_east.lng),
        )
    }
}

/// Flyweight factory and geometry for the cell grid.
#[derive(Debug, Clone)]
pub struct Board {
    tile_size: f64,
    origin: LatLng,
    visibility_radius: u32,
    known_cells: HashMap<(i32, i32), Rc<GridCell>>,
}

impl Board {
    #[must_use]
    pub fn new(tile_size: f64, origin: LatLng, visibility_radius: u32) -> Self {
        Self {
            tile_size,
            origin,
            visibility_radius,
            known_cells: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tile_size, config.origin, config.neighborhood_range)
    }

    #[must_use]
    pub const fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// The shared instance for `(i, j)`, created on first request.
    pub fn cell(&mut self, i: i32, j: i32) -> Rc<GridCell> {
        Rc::clone(
            self.known_cells
                .entry((i, j))
                .or_insert_with(|| Rc::new(GridCell::new(i, j))),
        )
    }

    /// Canonical cell containing `(lat, lng)`.
    pub fn canonicalize(&mut self, lat: f64, lng: f64) -> Rc<GridCell> {
        let i = floor_f64_to_i32((lat - self.origin.lat) / self.tile_size);
        let j = floor_f64_to_i32((lng - self.origin.lng) / self.tile_size);
        self.cell(i, j)
    }

    pub fn cell_for_point(&mut self, point: LatLng) -> Rc<GridCell> {
        self.canonicalize(point.lat, point.lng)
    }

    #[must_use]
    pub fn cell_bounds(&self, cell: &GridCell) -> CellBounds {
        let south_west = LatLng::new(
            self.origin.lat + f64::from(cell.i) * self.tile_size,
            self.origin.lng + f64::from(cell.j) * self.tile_size,
        );
        CellBounds {
            south_west,
            north_east: south_west.offset(self.tile_size, self.tile_size),
        }
    }

    /// Cells within the visibility radius of `point`, row-major from the south-west.
    pub fn cells_near_point(&mut self, point: LatLng) -> Vec<Rc<GridCell>> {
        let center = self.cell_for_point(point);
        let radius = i32::try_from(self.visibility_radius).unwrap_or(i32::MAX);
        let mut cells = Vec::new();
        for di in -radius..=radius {
            for dj in -radius..=radius {
                let i = center.i.saturating_add(di);
                let j = center.j.saturating_add(dj);
                cells.push(self.cell(i, j));
            }
        }
        cells
    }

    /// Number of distinct cells handed out so far.
    #[must_use]
    pub fn known_len(&self) -> usize {
        self.known_cells.len()
    }

    /// Forget every canonical instance. Previously returned `Rc`s stay valid
    /// but are no longer identity-equal to future lookups.
    pub fn clear(&mut self) {
        self.known_cells.clear();
    }
}
