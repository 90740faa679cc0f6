//! Visible tile grid computation
//!
//! Works out every tile needed to cover the render surface around the
//! current view center, where each tile goes on screen and what URL it is
//! fetched from.

use serde::Serialize;

use super::order::order_tiles;
use crate::{
    core::{
        bounds::Bounds,
        geo::{Point, Size, TileIndex},
        platform::LoadOrder,
        viewport::ViewportState,
    },
    tiles::{TileGeometryConfig, UrlResolver},
    MapError, Result,
};

#[cfg(feature = "debug")]
use log;

/// One tile to fetch and draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileDescriptor {
    pub index: TileIndex,
    /// Top-left corner of the tile on the render surface, in whole pixels
    pub position: Point,
    /// `row__column__zoom`, stable across recomputations
    pub id: String,
    pub url: String,
}

/// Tiles covering the view, in load/draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleGrid {
    pub tiles: Vec<TileDescriptor>,
    /// Union of every tile's screen rectangle
    pub coverage_extent: Bounds,
    /// Screen position of the center tile's top-left corner
    pub center_position: Point,
}

impl VisibleGrid {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TileDescriptor> {
        self.tiles.iter().find(|tile| tile.id == id)
    }
}

/// Inputs of one grid computation
#[derive(Debug, Clone, Copy)]
pub struct GridRequest<'a> {
    pub viewport: &'a ViewportState,
    pub config: &'a TileGeometryConfig,
    /// Surface to cover when it differs from the viewport, e.g. for pre-rendering
    pub canvas_size: Option<Size>,
    pub resolver: UrlResolver<'a>,
    pub repeat_world: bool,
    pub load_order: LoadOrder,
}

/// Computes the ordered set of tiles covering the canvas.
///
/// Tile positions are relative to the canvas, whose center lines up with the
/// view center, and are shifted back by the viewport's pixel offset. Columns
/// run over `[-left, right)` and rows over `[-top, bottom]`, so the bottom
/// edge always gets one spare row.
pub fn compute_visible_tiles(request: &GridRequest<'_>) -> Result<VisibleGrid> {
    let viewport = request.viewport;
    let config = request.config;
    let canvas = request.canvas_size.unwrap_or(viewport.size);
    check_surface(canvas)?;
    check_surface(viewport.size)?;

    let tile_size = config.tile_size();
    let tile_width = tile_size.width as f64;
    let tile_height = tile_size.height as f64;
    let tile_extent = Size::new(tile_width, tile_height);

    let center = config.center_tile_index(viewport.center, viewport.resolution, viewport.zoom)?;
    let center_position = canvas.half().subtract(&center.offset).round();

    // The center tile is rarely centered, so cover the larger surface plus
    // however far the tile corner drifted from the true center.
    let drift = center_position.subtract(&canvas.half());
    let reach_x = canvas.width.max(viewport.size.width) / 2.0 + drift.x.abs();
    let reach_y = canvas.height.max(viewport.size.height) / 2.0 + drift.y.abs();
    let left = tile_count(reach_x, tile_width)?;
    let right = left;
    let top = tile_count(reach_y, tile_height)?;
    let bottom = top;

    let capacity = ((left + right) * (top + bottom + 1)).max(0) as usize;
    let mut tiles = Vec::with_capacity(capacity);
    let mut coverage_extent = Bounds::empty();

    for column_offset in -left..right {
        for row_offset in -top..=bottom {
            let index = config.neighbor_tile_index(
                center.index,
                row_offset,
                column_offset,
                viewport.resolution,
                request.repeat_world,
            )?;
            let position = Point::new(
                center_position.x + tile_width * column_offset as f64 - viewport.pixel_offset.x,
                center_position.y + tile_height * row_offset as f64 - viewport.pixel_offset.y,
            );
            let url = request.resolver.resolve(&index)?;

            coverage_extent =
                coverage_extent.extend_with(&Bounds::from_origin_and_size(position, tile_extent));
            tiles.push(TileDescriptor {
                id: index.id(),
                index,
                position,
                url,
            });
        }
    }

    order_tiles(&mut tiles, center_position, request.load_order);

    #[cfg(feature = "debug")]
    log::debug!(
        "Computed {} tiles around {} (left {}, right {}, top {}, bottom {})",
        tiles.len(),
        center.index,
        left,
        right,
        top,
        bottom
    );

    Ok(VisibleGrid {
        tiles,
        coverage_extent,
        center_position,
    })
}

/// Upper bound on tiles enumerated in each direction from the center
const MAX_TILES_PER_SIDE: f64 = 1024.0;

fn tile_count(reach: f64, tile: f64) -> Result<i64> {
    let count = (reach / tile).ceil();
    if count <= MAX_TILES_PER_SIDE {
        Ok(count as i64)
    } else {
        Err(MapError::Configuration(format!(
            "surface needs {} tiles per side, more than {}",
            count, MAX_TILES_PER_SIDE
        )))
    }
}

fn check_surface(size: Size) -> Result<()> {
    if size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
    {
        Ok(())
    } else {
        Err(MapError::Configuration(format!(
            "surface size must be finite and non-negative, got {}x{}",
            size.width, size.height
        )))
    }
}
