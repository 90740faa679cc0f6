//! Core constants derived from common web-map conventions.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Placeholder image drawn for tiles that have no configured source.
pub const DEFAULT_ERROR_TILE_URL: &str = "images/system/transparent.png";

/// Half the width of the Web Mercator world in meters.
pub const WEB_MERCATOR_HALF_WORLD: f64 = 20_037_508.342_789_244;

/// Half extents of the Baidu Mercator plane in meters.
pub const BAIDU_HALF_EXTENT: (f64, f64) = (20_037_726.37, 12_474_104.17);

/// Slack applied before rounding a fractional column count up, so that
/// floating point noise does not add a phantom column to the world.
pub const RESOLUTION_TOLERANCE: f64 = 1e-6;

/// Separator between the row, column and zoom parts of a tile id.
pub const TILE_ID_SEPARATOR: &str = "__";
