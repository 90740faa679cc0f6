use serde::{Deserialize, Serialize};

use crate::core::constants::TILE_ID_SEPARATOR;

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    /// Rounds both axes to the nearest whole pixel
    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Width and height of a pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half of the size, as a point from the top-left corner to the center
    pub fn half(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Identifies one tile image in the (possibly wrapping) tile grid.
///
/// Rows are never wrapped, columns are normalized into the world only when
/// the layer repeats the world horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub row: i64,
    pub column: i64,
    pub zoom: u32,
}

impl TileIndex {
    pub fn new(row: i64, column: i64, zoom: u32) -> Self {
        Self { row, column, zoom }
    }

    /// Stable id for the tile, unique per zoom level: `row__column__zoom`.
    pub fn id(&self) -> String {
        [
            self.row.to_string(),
            self.column.to_string(),
            self.zoom.to_string(),
        ]
        .join(TILE_ID_SEPARATOR)
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}
