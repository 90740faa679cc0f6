use crate::{
    core::{geo::Size, map::Map},
    layers::tile::{grid::VisibleGrid, TileLayer},
    Result,
};

#[cfg(feature = "debug")]
use log;

/// Common accessors shared by every layer
pub trait LayerTrait {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn layer_type(&self) -> LayerType;

    fn z_index(&self) -> i32;

    fn set_z_index(&mut self, z_index: i32);

    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32);

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Overlay,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Overlay => write!(f, "overlay"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// What a layer draws
#[derive(Debug, Clone)]
pub enum LayerKind {
    /// Raster tiles laid out on a tile grid
    Tile(TileLayer),
    /// Content drawn by another renderer, with no tile grid
    Overlay,
}

impl LayerKind {
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerKind::Tile(_) => LayerType::Tile,
            LayerKind::Overlay => LayerType::Overlay,
        }
    }
}

/// A map layer: shared properties plus the strategy for what it draws
#[derive(Debug, Clone)]
pub struct Layer {
    properties: LayerProperties,
    kind: LayerKind,
}

impl Layer {
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        let id = id.into();
        let properties = LayerProperties::new(id.clone(), id, kind.layer_type());
        Self { properties, kind }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    pub fn properties(&self) -> &LayerProperties {
        &self.properties
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn as_tile(&self) -> Option<&TileLayer> {
        match &self.kind {
            LayerKind::Tile(tiles) => Some(tiles),
            LayerKind::Overlay => None,
        }
    }

    pub fn as_tile_mut(&mut self) -> Option<&mut TileLayer> {
        match &mut self.kind {
            LayerKind::Tile(tiles) => Some(tiles),
            LayerKind::Overlay => None,
        }
    }

    /// Tiles this layer needs for the map's current view.
    ///
    /// `Ok(None)` means there is nothing to draw: the layer is hidden, has no
    /// tile grid, or the map has no viewport yet.
    pub fn tiles(&self, map: &Map, canvas_size: Option<Size>) -> Result<Option<VisibleGrid>> {
        if !self.is_visible() {
            #[cfg(feature = "debug")]
            log::debug!("Skipping hidden layer {}", self.id());
            return Ok(None);
        }
        match &self.kind {
            LayerKind::Tile(tiles) => tiles.get_tiles(map, self.id(), canvas_size),
            LayerKind::Overlay => Ok(None),
        }
    }

    /// Layer profile JSON, for layers that have one
    pub fn to_json(&self) -> Result<Option<serde_json::Value>> {
        match &self.kind {
            LayerKind::Tile(tiles) => tiles.to_json(self.id()).map(Some),
            LayerKind::Overlay => Ok(None),
        }
    }
}

impl LayerTrait for Layer {
    crate::impl_layer_trait!(Layer, properties);
}
