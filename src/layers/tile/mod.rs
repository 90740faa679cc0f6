//! Tile layers
//!
//! A tile layer covers the render surface with fixed-size raster tiles laid
//! out on its tile grid. This module computes which tiles a view needs, where
//! they are drawn and the order they are loaded in.

pub mod grid;
pub mod layer;
pub mod order;
pub mod types;

pub use grid::{compute_visible_tiles, GridRequest, TileDescriptor, VisibleGrid};
pub use layer::TileLayer;
pub use order::order_tiles;
pub use types::TileLayerOptions;

pub use crate::tiles::TileSize;
