use crate::core::{
    geo::{Point, Size},
    projection::Projection,
};
use serde::{Deserialize, Serialize};

/// Snapshot of the map view that tile grids are computed against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// The center of the map view in projected coordinates
    pub center: Point,
    /// The current integer zoom level
    pub zoom: u32,
    /// Projected units per pixel at `zoom`
    pub resolution: f64,
    /// The size of the render surface in pixels
    pub size: Size,
    /// Translation of the render surface inside its container, e.g. while a
    /// pan is in progress
    #[serde(default)]
    pub pixel_offset: Point,
}

impl ViewportState {
    /// Creates a new viewport
    pub fn new(center: Point, zoom: u32, resolution: f64, size: Size) -> Self {
        Self {
            center,
            zoom,
            resolution,
            size,
            pixel_offset: Point::default(),
        }
    }

    /// Creates a viewport whose resolution is the projection's resolution at `zoom`
    pub fn for_zoom(projection: Projection, center: Point, zoom: u32, size: Size) -> Self {
        Self::new(center, zoom, projection.resolution(zoom), size)
    }

    pub fn with_pixel_offset(mut self, offset: Point) -> Self {
        self.pixel_offset = offset;
        self
    }

    /// Moves the view by a pixel delta: the center shifts in projected space
    /// and the render surface follows, as during a drag before it is reset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center = Point::new(
            self.center.x - dx * self.resolution,
            self.center.y + dy * self.resolution,
        );
        self.pixel_offset = self.pixel_offset.add(&Point::new(dx, dy));
    }
}
