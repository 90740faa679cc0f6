use crate::{
    core::{
        bounds::Bounds,
        geo::{Point, Size},
        platform::{EngineFamily, LoadOrder},
        projection::Projection,
        viewport::ViewportState,
    },
    layers::{
        base::{Layer, LayerTrait},
        manager::LayerManager,
        tile::grid::VisibleGrid,
    },
    MapError, Result,
};

#[cfg(feature = "debug")]
use log;

/// Map state the tile layers read from: projection, view and layer stack
#[derive(Debug, Clone)]
pub struct Map {
    viewport: Option<ViewportState>,
    projection: Projection,
    layer_manager: LayerManager,
    engine: EngineFamily,
}

impl Map {
    /// A map with no view yet. Tile layers produce nothing until a viewport is set.
    pub fn new(projection: Projection) -> Self {
        Self {
            viewport: None,
            projection,
            layer_manager: LayerManager::new(),
            engine: EngineFamily::default(),
        }
    }

    pub fn with_viewport(mut self, viewport: ViewportState) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_engine_family(mut self, engine: EngineFamily) -> Self {
        self.engine = engine;
        self
    }

    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.as_ref()
    }

    pub fn set_viewport(&mut self, viewport: ViewportState) {
        self.viewport = Some(viewport);
    }

    /// Moves to `center` at `zoom`, keeping the current view size.
    pub fn set_view(&mut self, center: Point, zoom: u32) -> Result<()> {
        let size = self
            .viewport
            .as_ref()
            .map(|v| v.size)
            .ok_or_else(|| MapError::Configuration("map has no viewport to move".to_string()))?;

        #[cfg(feature = "debug")]
        log::debug!("Setting view to ({}, {}) at zoom {}", center.x, center.y, zoom);

        self.viewport = Some(ViewportState::for_zoom(self.projection, center, zoom, size));
        Ok(())
    }

    /// Pans by a screen distance in pixels. No-op without a viewport.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.pan_by(dx, dy);
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Changes the projection. Tile geometries are rebuilt on next use.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn full_extent(&self) -> Bounds {
        self.projection.full_extent()
    }

    pub fn engine_family(&self) -> EngineFamily {
        self.engine
    }

    pub fn set_engine_family(&mut self, engine: EngineFamily) {
        self.engine = engine;
    }

    pub fn load_order(&self) -> LoadOrder {
        self.engine.load_order()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layer_manager
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layer_manager
    }

    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        self.layer_manager.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Layer> {
        self.layer_manager.remove_layer(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layer_manager.get_layer(layer_id)
    }

    /// Bottom-most layer in draw order
    pub fn base_layer(&self) -> Option<&Layer> {
        self.layer_manager.base_layer()
    }

    /// Tiles needed by one layer. `canvas_size` defaults to the viewport size.
    pub fn tiles(&self, layer_id: &str, canvas_size: Option<Size>) -> Result<Option<VisibleGrid>> {
        let layer = self
            .get_layer(layer_id)
            .ok_or_else(|| MapError::Layer(format!("no layer with id `{}`", layer_id)))?;
        layer.tiles(self, canvas_size)
    }

    /// Tiles for every visible tile layer, in draw order
    pub fn visible_tiles(&self, canvas_size: Option<Size>) -> Result<Vec<(String, VisibleGrid)>> {
        let mut grids = Vec::new();
        for layer in self.layer_manager.layers() {
            if let Some(grid) = layer.tiles(self, canvas_size)? {
                grids.push((layer.id().to_string(), grid));
            }
        }
        Ok(grids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{base::LayerKind, tile::TileLayer};

    fn viewport() -> ViewportState {
        ViewportState::for_zoom(
            Projection::WebMercator,
            Point::new(0.0, 0.0),
            2,
            Size::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_map_creation() {
        let map = Map::new(Projection::Geodetic);
        assert!(map.viewport().is_none());
        assert_eq!(map.projection(), Projection::Geodetic);
        assert_eq!(map.load_order(), LoadOrder::FarthestFirst);
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_set_view_requires_viewport() {
        let mut map = Map::new(Projection::WebMercator);
        assert!(matches!(
            map.set_view(Point::new(0.0, 0.0), 3),
            Err(MapError::Configuration(_))
        ));

        let mut map = map.with_viewport(viewport());
        map.set_view(Point::new(100.0, 100.0), 5).unwrap();
        let view = map.viewport().unwrap();
        assert_eq!(view.zoom, 5);
        assert_eq!(view.size, Size::new(800.0, 600.0));
        assert_eq!(view.resolution, Projection::WebMercator.resolution(5));
    }

    #[test]
    fn test_layer_management() {
        let mut map = Map::new(Projection::WebMercator).with_viewport(viewport());
        map.add_layer(Layer::new("osm", LayerKind::Tile(TileLayer::default())))
            .unwrap();
        map.add_layer(Layer::new("labels", LayerKind::Overlay)).unwrap();

        assert_eq!(map.base_layer().map(|l| l.id()), Some("osm"));
        assert!(map.tiles("osm", None).unwrap().is_some());
        assert!(map.tiles("labels", None).unwrap().is_none());
        assert!(matches!(map.tiles("missing", None), Err(MapError::Layer(_))));

        let grids = map.visible_tiles(None).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].0, "osm");

        assert!(map.remove_layer("osm").is_some());
        assert!(map.get_layer("osm").is_none());
    }

    #[test]
    fn test_engine_family_flips_load_order() {
        let map = Map::new(Projection::WebMercator).with_engine_family(EngineFamily::Trident);
        assert_eq!(map.load_order(), LoadOrder::NearestFirst);
    }
}
