use serde::{Deserialize, Serialize};

use crate::{
    core::{
        bounds::Bounds,
        constants::{BAIDU_HALF_EXTENT, TILE_SIZE, WEB_MERCATOR_HALF_WORLD},
    },
    tiles::system::TileSystem,
};

/// Map projections the engine knows how to tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    #[serde(rename = "EPSG:3857")]
    WebMercator,
    #[serde(rename = "EPSG:4326")]
    Geodetic,
    #[serde(rename = "BAIDU")]
    Baidu,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Projection::WebMercator => "EPSG:3857",
            Projection::Geodetic => "EPSG:4326",
            Projection::Baidu => "BAIDU",
        }
    }

    /// Projected extent of the whole world
    pub fn full_extent(&self) -> Bounds {
        match self {
            Projection::WebMercator => Bounds::from_coords(
                -WEB_MERCATOR_HALF_WORLD,
                -WEB_MERCATOR_HALF_WORLD,
                WEB_MERCATOR_HALF_WORLD,
                WEB_MERCATOR_HALF_WORLD,
            ),
            Projection::Geodetic => Bounds::from_coords(-180.0, -90.0, 180.0, 90.0),
            Projection::Baidu => {
                let (hx, hy) = BAIDU_HALF_EXTENT;
                Bounds::from_coords(-hx, -hy, hx, hy)
            }
        }
    }

    /// Whether the projection covers the full 360 degrees of longitude, so
    /// that columns can wrap around the antimeridian
    pub fn is_full_world(&self) -> bool {
        matches!(self, Projection::WebMercator | Projection::Geodetic)
    }

    /// Tile system used by layers that neither override nor inherit one
    pub fn default_tile_system(&self) -> TileSystem {
        match self {
            Projection::WebMercator => TileSystem::web_mercator(),
            Projection::Geodetic => TileSystem::global_geodetic(),
            Projection::Baidu => TileSystem::baidu(),
        }
    }

    /// Projected units per pixel at an integer zoom level
    pub fn resolution(&self, zoom: u32) -> f64 {
        match self {
            Projection::Baidu => 2_f64.powi(18 - zoom as i32),
            _ => self.full_extent().width() / TILE_SIZE as f64 / 2_f64.powi(zoom as i32),
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_mercator_resolution() {
        let res = Projection::WebMercator.resolution(0);
        assert!((res - 156_543.033_928).abs() < 1e-3);
        assert!((Projection::WebMercator.resolution(1) - res / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_world() {
        assert!(Projection::WebMercator.is_full_world());
        assert!(Projection::Geodetic.is_full_world());
        assert!(!Projection::Baidu.is_full_world());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&Projection::Geodetic).unwrap();
        assert_eq!(json, "\"EPSG:4326\"");
        let parsed: Projection = serde_json::from_str("\"BAIDU\"").unwrap();
        assert_eq!(parsed, Projection::Baidu);
    }
}
