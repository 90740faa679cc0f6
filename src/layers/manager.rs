use crate::{
    layers::base::{Layer, LayerTrait},
    prelude::HashMap,
    MapError, Result,
};

#[cfg(feature = "debug")]
use log;

/// Owns the map's layers and keeps them in draw order
#[derive(Debug, Clone)]
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Layer>,
    /// Ordered list of layer IDs for rendering (sorted by z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer. Ids are unique within a map.
    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id `{}`", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert after every layer with the same or lower z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        #[cfg(feature = "debug")]
        log::debug!("Adding layer {} at draw position {}", layer_id, insert_pos);

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Layer> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.get(layer_id)
    }

    /// Mutable access to a layer. Call [`Self::update_render_order`] after
    /// changing its z-index.
    pub fn get_layer_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        self.layers.get_mut(layer_id)
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.render_order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Bottom-most layer, the one other tile layers take their geometry from
    pub fn base_layer(&self) -> Option<&Layer> {
        self.render_order.first().and_then(|id| self.layers.get(id))
    }

    /// Re-sorts after z-index changes; layers with equal z-index keep their order
    pub fn update_render_order(&mut self) {
        let layers = &self.layers;
        self.render_order.sort_by_key(|id| layers.get(id).map(|l| l.z_index()).unwrap_or(0));
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
