//! # tilegrid
//!
//! Visible tile grid computation for raster-tile map layers.
//!
//! Given the current viewport of a pannable, zoomable map, this library works
//! out which fixed-size image tiles have to be fetched, where each one is drawn
//! on screen, which URL it is fetched from and in what order the fetches and
//! draws should happen. Fetching, decoding and compositing are left to the
//! caller.

pub mod core;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    geo::{Point, Size, TileIndex},
    map::Map,
    platform::{EngineFamily, LoadOrder},
    projection::Projection,
    viewport::ViewportState,
};

pub use layers::{
    base::{Layer, LayerKind, LayerTrait},
    manager::LayerManager,
    tile::{TileDescriptor, TileLayer, TileLayerOptions, TileSize, VisibleGrid},
};

pub use tiles::{
    cache::GeometryCache,
    config::{CenterTile, TileGeometryConfig},
    source::{ShardPolicy, UrlResolver, UrlSource},
    system::TileSystem,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tile size or resolution that no grid can be built from.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A URL template placeholder with no binding. Carries the placeholder as written.
    #[error("Template error: no value provided for variable `{0}`")]
    Template(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Computed URL sources cannot be serialized")]
    UnserializableSource,
}

/// Error type alias for convenience
pub type Error = MapError;
