//! Core data types for tile layer functionality

use std::time::Duration;

use crate::{
    core::constants::DEFAULT_ERROR_TILE_URL,
    tiles::{ShardPolicy, TileSize, TileSystem, UrlSource},
};

/// Options of a tile layer, as stored in its profile.
///
/// Most of these are passed through untouched to the loader and renderer;
/// the grid computation only reads the URL, sub-domain, tile size, tile
/// system and world-repeat settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileLayerOptions {
    /// Drawn for tiles when there is no URL template
    pub error_tile_url: String,
    pub url_template: Option<UrlSource>,
    pub subdomains: Vec<String>,
    pub shard_policy: ShardPolicy,
    /// Hint to the renderer to draw tiles as they arrive
    pub gradual_loading: bool,
    /// Wrap columns around the antimeridian on full-world projections
    pub repeat_world: bool,
    pub render_when_panning: bool,
    /// Refresh interval in milliseconds while panning: 0 is realtime, -1 never refreshes
    pub render_span_when_panning: i64,
    pub cross_origin: Option<String>,
    pub tile_size: TileSize,
    /// Overrides the tile system inherited from the base layer or projection
    pub tile_system: Option<TileSystem>,
    pub renderer: String,
    pub debug: bool,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            error_tile_url: DEFAULT_ERROR_TILE_URL.to_string(),
            url_template: Some(UrlSource::literal(DEFAULT_ERROR_TILE_URL)),
            subdomains: Vec::new(),
            shard_policy: ShardPolicy::default(),
            gradual_loading: true,
            repeat_world: true,
            render_when_panning: false,
            render_span_when_panning: 0,
            cross_origin: None,
            tile_size: TileSize::default(),
            tile_system: None,
            renderer: "canvas".to_string(),
            debug: false,
        }
    }
}

impl TileLayerOptions {
    /// Options for a templated tile source
    pub fn with_template(template: impl Into<UrlSource>) -> Self {
        Self {
            url_template: Some(template.into()),
            ..Self::default()
        }
    }

    pub fn subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    /// How often tiles should be recomputed during a pan, or `None` when they
    /// should wait until the pan ends
    pub fn pan_refresh_interval(&self) -> Option<Duration> {
        if !self.render_when_panning || self.render_span_when_panning < 0 {
            return None;
        }
        Some(Duration::from_millis(self.render_span_when_panning as u64))
    }
}
