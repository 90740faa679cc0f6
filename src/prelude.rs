//! Prelude module for common tilegrid types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tilegrid::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    geo::{Point, Size, TileIndex},
    map::Map,
    platform::{EngineFamily, LoadOrder},
    projection::Projection,
    viewport::ViewportState,
};

pub use crate::layers::{
    base::{Layer, LayerKind, LayerProperties, LayerTrait, LayerType},
    manager::LayerManager,
    tile::{
        grid::{compute_visible_tiles, GridRequest, TileDescriptor, VisibleGrid},
        order::order_tiles,
        TileLayer, TileLayerOptions, TileSize,
    },
};

pub use crate::tiles::{
    cache::{GeometryCache, GeometryKey},
    config::{CenterTile, TileGeometryConfig},
    source::{ShardPolicy, UrlResolver, UrlSource},
    system::TileSystem,
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
