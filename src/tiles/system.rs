//! Tile systems: how tile rows and columns are numbered relative to the
//! projected plane.

use serde::{Deserialize, Serialize};

use crate::{
    core::{constants::WEB_MERCATOR_HALF_WORLD, geo::Point},
    MapError, Result,
};

/// Axis orientation and origin of a tile grid.
///
/// `scale_x` is `1` when column numbers grow to the east and `-1` when they
/// grow to the west. `scale_y` is `-1` when row numbers grow to the south
/// (the usual XYZ layout) and `1` when they grow to the north (TMS layout).
/// `origin` is the projected corner of tile `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TileSystemRepr", into = "TileSystemRepr")]
pub struct TileSystem {
    scale_x: i8,
    scale_y: i8,
    origin: Point,
}

impl TileSystem {
    pub fn new(scale_x: i8, scale_y: i8, origin: Point) -> Result<Self> {
        if scale_x.abs() != 1 || scale_y.abs() != 1 {
            return Err(MapError::Configuration(format!(
                "tile system scales must be 1 or -1, got ({}, {})",
                scale_x, scale_y
            )));
        }
        if !origin.is_finite() {
            return Err(MapError::Configuration(
                "tile system origin must be finite".to_string(),
            ));
        }
        Ok(Self {
            scale_x,
            scale_y,
            origin,
        })
    }

    /// XYZ tiles on Web Mercator: origin at the north-west corner, rows grow south
    pub fn web_mercator() -> Self {
        Self {
            scale_x: 1,
            scale_y: -1,
            origin: Point::new(-WEB_MERCATOR_HALF_WORLD, WEB_MERCATOR_HALF_WORLD),
        }
    }

    /// TMS tiles on Web Mercator: origin at the south-west corner, rows grow north
    pub fn tms_global_mercator() -> Self {
        Self {
            scale_x: 1,
            scale_y: 1,
            origin: Point::new(-WEB_MERCATOR_HALF_WORLD, -WEB_MERCATOR_HALF_WORLD),
        }
    }

    /// Plate carrée tiles in degrees, origin at (-180, 90)
    pub fn global_geodetic() -> Self {
        Self {
            scale_x: 1,
            scale_y: -1,
            origin: Point::new(-180.0, 90.0),
        }
    }

    /// Baidu tiles, numbered outward from the projection origin
    pub fn baidu() -> Self {
        Self {
            scale_x: 1,
            scale_y: 1,
            origin: Point::new(0.0, 0.0),
        }
    }

    /// Looks up a named preset
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "web-mercator" => Some(Self::web_mercator()),
            "tms-global-mercator" => Some(Self::tms_global_mercator()),
            "global-geodetic" => Some(Self::global_geodetic()),
            "baidu" => Some(Self::baidu()),
            _ => None,
        }
    }

    /// Name of the preset this system equals, if any
    pub fn preset_name(&self) -> Option<&'static str> {
        ["web-mercator", "tms-global-mercator", "global-geodetic", "baidu"]
            .into_iter()
            .find(|name| Self::from_name(name).as_ref() == Some(self))
    }

    pub fn scale_x(&self) -> i8 {
        self.scale_x
    }

    pub fn scale_y(&self) -> i8 {
        self.scale_y
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Bit-exact identity used as part of geometry cache keys
    pub(crate) fn key(&self) -> (i8, i8, u64, u64) {
        (
            self.scale_x,
            self.scale_y,
            self.origin.x.to_bits(),
            self.origin.y.to_bits(),
        )
    }
}

/// Wire form of a tile system: a preset name or `[sx, sy, ox, oy]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TileSystemRepr {
    Named(String),
    Array([f64; 4]),
}

impl TryFrom<TileSystemRepr> for TileSystem {
    type Error = MapError;

    fn try_from(repr: TileSystemRepr) -> Result<Self> {
        match repr {
            TileSystemRepr::Named(name) => Self::from_name(&name).ok_or_else(|| {
                MapError::Configuration(format!("unknown tile system `{}`", name))
            }),
            TileSystemRepr::Array([sx, sy, ox, oy]) => {
                Self::new(sx as i8, sy as i8, Point::new(ox, oy))
            }
        }
    }
}

impl From<TileSystem> for TileSystemRepr {
    fn from(system: TileSystem) -> Self {
        match system.preset_name() {
            Some(name) => TileSystemRepr::Named(name.to_string()),
            None => TileSystemRepr::Array([
                system.scale_x as f64,
                system.scale_y as f64,
                system.origin.x,
                system.origin.y,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_scale() {
        let result = TileSystem::new(2, -1, Point::new(0.0, 0.0));
        assert!(matches!(result, Err(MapError::Configuration(_))));
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(TileSystem::from_name("baidu"), Some(TileSystem::baidu()));
        assert_eq!(TileSystem::from_name("mars"), None);
        assert_eq!(TileSystem::web_mercator().preset_name(), Some("web-mercator"));
    }

    #[test]
    fn test_serde_named_and_array() {
        let named: TileSystem = serde_json::from_str("\"tms-global-mercator\"").unwrap();
        assert_eq!(named, TileSystem::tms_global_mercator());
        assert_eq!(serde_json::to_string(&named).unwrap(), "\"tms-global-mercator\"");

        let custom: TileSystem = serde_json::from_str("[-1, 1, 100.0, 200.0]").unwrap();
        assert_eq!(custom.scale_x(), -1);
        assert_eq!(custom.origin(), Point::new(100.0, 200.0));
        assert_eq!(
            serde_json::to_string(&custom).unwrap(),
            "[-1.0,1.0,100.0,200.0]"
        );
    }

    #[test]
    fn test_serde_unknown_name() {
        let result: std::result::Result<TileSystem, _> = serde_json::from_str("\"mars\"");
        assert!(result.is_err());
    }
}
