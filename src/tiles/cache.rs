use std::sync::{Arc, Mutex};

use crate::{
    core::bounds::Bounds,
    tiles::{
        config::{TileGeometryConfig, TileSize},
        system::TileSystem,
    },
    Result,
};

#[cfg(feature = "debug")]
use log;

/// Everything a [`TileGeometryConfig`] is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    extent: [u64; 4],
    tile_size: TileSize,
    system: (i8, i8, u64, u64),
    wraps_world: bool,
}

impl GeometryKey {
    pub fn new(
        full_extent: &Bounds,
        tile_size: TileSize,
        system: &TileSystem,
        wraps_world: bool,
    ) -> Self {
        Self {
            extent: full_extent.to_bits(),
            tile_size,
            system: system.key(),
            wraps_world,
        }
    }
}

/// Single-slot memo for the geometry config of one layer.
///
/// The config is built on first use and handed out until a lookup arrives
/// with a different key, at which point it is rebuilt.
#[derive(Debug, Default)]
pub struct GeometryCache {
    slot: Mutex<Option<(GeometryKey, Arc<TileGeometryConfig>)>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached config for these inputs, building it if the inputs changed
    pub fn get_or_build(
        &self,
        full_extent: &Bounds,
        tile_size: TileSize,
        system: &TileSystem,
        wraps_world: bool,
    ) -> Result<Arc<TileGeometryConfig>> {
        let key = GeometryKey::new(full_extent, tile_size, system, wraps_world);

        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some((cached_key, config)) = slot.as_ref() {
            if *cached_key == key {
                return Ok(Arc::clone(config));
            }
            #[cfg(feature = "debug")]
            log::debug!("Tile geometry inputs changed, rebuilding config");
        }

        let config = Arc::new(TileGeometryConfig::new(
            *system,
            full_extent.clone(),
            tile_size,
            wraps_world,
        )?);

        #[cfg(feature = "debug")]
        log::debug!(
            "Built tile geometry config: tile size {}x{}, origin ({}, {})",
            tile_size.width,
            tile_size.height,
            system.origin().x,
            system.origin().y
        );

        *slot = Some((key, Arc::clone(&config)));
        Ok(config)
    }

    /// Drops the cached config so the next lookup rebuilds it
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }

    pub fn is_cached(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl Clone for GeometryCache {
    fn clone(&self) -> Self {
        let slot = self.slot.lock().map(|slot| slot.clone()).unwrap_or(None);
        Self {
            slot: Mutex::new(slot),
        }
    }
}
