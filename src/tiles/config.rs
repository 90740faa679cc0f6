//! Tile geometry: mapping projected coordinates onto the tile index grid.
//!
//! All index arithmetic happens in screen-oriented pixel space measured from
//! the tile system origin (x grows right, y grows down). A position is
//! assigned to a screen slot by flooring, so a coordinate lying exactly on a
//! tile boundary belongs to the tile to its right (or below it) and has a zero
//! offset inside that tile. Slots are then numbered as rows and columns
//! according to the tile system's axis signs.

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        bounds::Bounds,
        constants::{RESOLUTION_TOLERANCE, TILE_SIZE},
        geo::{Point, TileIndex},
    },
    tiles::system::TileSystem,
    MapError, Result,
};

/// Tile image size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.width as f64, self.height as f64)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::square(TILE_SIZE)
    }
}

/// The tile containing a projected coordinate, plus where inside that tile
/// (in pixels from its top-left corner) the coordinate falls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterTile {
    pub index: TileIndex,
    pub offset: Point,
}

/// Immutable tile grid geometry for one map extent, tile size and tile system.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometryConfig {
    system: TileSystem,
    full_extent: Bounds,
    tile_size: TileSize,
    wraps_world: bool,
}

impl TileGeometryConfig {
    /// `wraps_world` should be set only for projections spanning all longitudes.
    pub fn new(
        system: TileSystem,
        full_extent: Bounds,
        tile_size: TileSize,
        wraps_world: bool,
    ) -> Result<Self> {
        if tile_size.width == 0 || tile_size.height == 0 {
            return Err(MapError::Configuration(format!(
                "tile size must be positive, got {}x{}",
                tile_size.width, tile_size.height
            )));
        }
        if !full_extent.is_valid() || !full_extent.min.is_finite() || !full_extent.max.is_finite()
        {
            return Err(MapError::Configuration(format!(
                "invalid map extent {:?}",
                full_extent
            )));
        }

        Ok(Self {
            system,
            full_extent,
            tile_size,
            wraps_world,
        })
    }

    pub fn system(&self) -> &TileSystem {
        &self.system
    }

    pub fn full_extent(&self) -> &Bounds {
        &self.full_extent
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn wraps_world(&self) -> bool {
        self.wraps_world
    }

    /// Finds the tile containing `center` at `resolution`.
    ///
    /// On full-world projections the column is normalized into the world, so
    /// the result is always a canonical index.
    pub fn center_tile_index(&self, center: Point, resolution: f64, zoom: u32) -> Result<CenterTile> {
        check_resolution(resolution)?;
        if !center.is_finite() {
            return Err(MapError::Configuration(format!(
                "center must be finite, got ({}, {})",
                center.x, center.y
            )));
        }

        let origin = self.system.origin();
        let width = self.tile_size.width as f64;
        let height = self.tile_size.height as f64;

        let pixel_x = (center.x - origin.x) / resolution;
        let pixel_y = (origin.y - center.y) / resolution;
        let slot_x = (pixel_x / width).floor();
        let slot_y = (pixel_y / height).floor();
        let offset = Point::new(pixel_x - slot_x * width, pixel_y - slot_y * height);

        let column = slot_to_index(slot_x, self.system.scale_x() < 0)?;
        let row = slot_to_index(slot_y, self.system.scale_y() > 0)?;

        let index = self.neighbor_tile_index(
            TileIndex::new(row, column, zoom),
            0,
            0,
            resolution,
            true,
        )?;

        Ok(CenterTile { index, offset })
    }

    /// Returns the tile `row_delta` rows and `column_delta` columns away from
    /// `base` on screen. With `wrap` on a full-world projection the column is
    /// wrapped into `[0, columns)`; rows never wrap.
    pub fn neighbor_tile_index(
        &self,
        base: TileIndex,
        row_delta: i64,
        column_delta: i64,
        resolution: f64,
        wrap: bool,
    ) -> Result<TileIndex> {
        check_resolution(resolution)?;

        let mut column = (self.system.scale_x() as i64)
            .checked_mul(column_delta)
            .and_then(|step| base.column.checked_add(step))
            .ok_or_else(|| index_out_of_range(base, row_delta, column_delta))?;
        let row = (self.system.scale_y() as i64)
            .checked_mul(row_delta)
            .and_then(|step| base.row.checked_sub(step))
            .ok_or_else(|| index_out_of_range(base, row_delta, column_delta))?;

        if wrap && self.wraps_world {
            column = column.rem_euclid(self.columns_at(resolution));
        }

        Ok(TileIndex::new(row, column, base.zoom))
    }

    /// Number of tile columns spanning the full extent at `resolution`
    pub fn columns_at(&self, resolution: f64) -> i64 {
        let span = self.full_extent.width() / (resolution * self.tile_size.width as f64);
        ((span - RESOLUTION_TOLERANCE).ceil() as i64).max(1)
    }
}

/// Largest slot magnitude whose index and in-tile offset are still exact in `f64`
const MAX_SLOT: f64 = 9_007_199_254_740_992.0;

/// Numbers a screen slot as a row or column; flipped axes count from the
/// other side of the origin.
fn slot_to_index(slot: f64, flipped: bool) -> Result<i64> {
    if !(slot.abs() < MAX_SLOT) {
        return Err(MapError::Configuration(format!(
            "center is {} tiles from the tile system origin, too far to index",
            slot
        )));
    }
    let slot = slot as i64;
    Ok(if flipped { -slot - 1 } else { slot })
}

fn index_out_of_range(base: TileIndex, row_delta: i64, column_delta: i64) -> MapError {
    MapError::Configuration(format!(
        "tile {} moved by ({}, {}) leaves the index range",
        base, row_delta, column_delta
    ))
}

fn check_resolution(resolution: f64) -> Result<()> {
    if resolution.is_finite() && resolution > 0.0 {
        Ok(())
    } else {
        Err(MapError::Configuration(format!(
            "resolution must be positive and finite, got {}",
            resolution
        )))
    }
}
