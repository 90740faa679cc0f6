//! Core TileLayer implementation

use std::sync::Arc;

use serde_json::json;

use super::{
    grid::{compute_visible_tiles, GridRequest, VisibleGrid},
    TileLayerOptions,
};
use crate::{
    core::{
        geo::{Size, TileIndex},
        map::Map,
    },
    layers::base::{Layer, LayerKind, LayerTrait},
    tiles::{GeometryCache, TileGeometryConfig, TileSize, UrlResolver},
    MapError, Result,
};

#[cfg(feature = "debug")]
use log;

/// Type tag of tile layers in layer profiles
pub const TILE_LAYER_PROFILE_TYPE: &str = "TileLayer";

/// Tile grid strategy of a layer: options plus its memoized tile geometry
#[derive(Debug, Clone, Default)]
pub struct TileLayer {
    pub(crate) options: TileLayerOptions,
    geometry: GeometryCache,
}

impl TileLayer {
    pub fn new(options: TileLayerOptions) -> Self {
        Self {
            options,
            geometry: GeometryCache::new(),
        }
    }

    pub fn options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Replaces the options. The geometry is rebuilt on next use.
    pub fn set_options(&mut self, options: TileLayerOptions) {
        self.options = options;
        self.geometry.invalidate();
    }

    pub fn tile_size(&self) -> TileSize {
        self.options.tile_size
    }

    /// URL resolver for this layer's source, for re-resolving single tiles
    pub fn url_resolver(&self) -> UrlResolver<'_> {
        UrlResolver::new(
            self.options.url_template.as_ref(),
            &self.options.subdomains,
            &self.options.error_tile_url,
        )
        .with_shard_policy(self.options.shard_policy)
    }

    pub fn tile_url(&self, index: &TileIndex) -> Result<String> {
        self.url_resolver().resolve(index)
    }

    /// Geometry from this layer's own settings: its tile system override, or
    /// the projection's default tile system.
    pub(crate) fn own_geometry_config(&self, map: &Map) -> Result<Arc<TileGeometryConfig>> {
        let projection = map.projection();
        let system = self
            .options
            .tile_system
            .unwrap_or_else(|| projection.default_tile_system());

        self.geometry.get_or_build(
            &projection.full_extent(),
            self.options.tile_size,
            &system,
            projection.is_full_world(),
        )
    }

    /// Geometry used to compute this layer's grid.
    ///
    /// A layer without a tile system override inherits the geometry of the
    /// map's base layer when that is another tile layer.
    pub fn geometry_config(&self, map: &Map, layer_id: &str) -> Result<Arc<TileGeometryConfig>> {
        if self.options.tile_system.is_none() {
            if let Some(base) = map.base_layer().filter(|base| base.id() != layer_id) {
                if let Some(base_tiles) = base.as_tile() {
                    return base_tiles.own_geometry_config(map);
                }
            }
        }
        self.own_geometry_config(map)
    }

    /// Tiles covering the map's current view, or `None` when the map has no viewport yet.
    pub fn get_tiles(
        &self,
        map: &Map,
        layer_id: &str,
        canvas_size: Option<Size>,
    ) -> Result<Option<VisibleGrid>> {
        let Some(viewport) = map.viewport() else {
            #[cfg(feature = "debug")]
            log::debug!("Layer {} has no viewport to cover", layer_id);
            return Ok(None);
        };

        let config = self.geometry_config(map, layer_id)?;
        let request = GridRequest {
            viewport,
            config: &config,
            canvas_size,
            resolver: self.url_resolver(),
            repeat_world: self.options.repeat_world,
            load_order: map.load_order(),
        };

        compute_visible_tiles(&request).map(Some)
    }

    /// Layer profile: `{"type": "TileLayer", "id": ..., "options": {...}}`
    pub fn to_json(&self, layer_id: &str) -> Result<serde_json::Value> {
        Ok(json!({
            "type": TILE_LAYER_PROFILE_TYPE,
            "id": layer_id,
            "options": serde_json::to_value(&self.options)?,
        }))
    }

    /// Rebuilds a tile layer from its profile. Profiles of other layer types
    /// yield `Ok(None)`.
    pub fn from_json(profile: &serde_json::Value) -> Result<Option<Layer>> {
        if profile.get("type").and_then(|t| t.as_str()) != Some(TILE_LAYER_PROFILE_TYPE) {
            return Ok(None);
        }

        let id = profile
            .get("id")
            .and_then(|id| match id {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .ok_or_else(|| MapError::Profile("tile layer profile has no id".to_string()))?;

        let options = match profile.get("options") {
            Some(options) if !options.is_null() => {
                serde_json::from_value::<TileLayerOptions>(options.clone())?
            }
            _ => TileLayerOptions::default(),
        };

        Ok(Some(Layer::new(id, LayerKind::Tile(TileLayer::new(options)))))
    }
}
