use std::{fs, path::PathBuf};

use clap::Parser;
use serde::Deserialize;
use tilegrid::{
    EngineFamily, LayerTrait, Map, Point, Projection, Size, TileLayer, ViewportState,
};

/// Prints the tiles each layer of a map scene needs, in load order
#[derive(Debug, Parser)]
#[command(name = "tilegrid-app")]
#[command(version)]
struct Args {
    /// JSON scene file: projection, engine, viewport and layer profiles
    scene: PathBuf,
}

/// A map scene read from disk
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scene {
    #[serde(default)]
    projection: Projection,
    #[serde(default)]
    engine: EngineFamily,
    viewport: SceneViewport,
    /// Surface to cover when it is larger than the viewport
    canvas_size: Option<Size>,
    /// Layer profiles, bottom-most first
    layers: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneViewport {
    center: Point,
    zoom: u32,
    size: Size,
    /// Defaults to the projection's resolution at `zoom`
    resolution: Option<f64>,
    #[serde(default)]
    pixel_offset: Point,
}

impl SceneViewport {
    fn into_state(self, projection: Projection) -> ViewportState {
        let state = match self.resolution {
            Some(resolution) => ViewportState::new(self.center, self.zoom, resolution, self.size),
            None => ViewportState::for_zoom(projection, self.center, self.zoom, self.size),
        };
        state.with_pixel_offset(self.pixel_offset)
    }
}

fn load_map(scene: Scene) -> Result<Map, Box<dyn std::error::Error>> {
    let viewport = scene.viewport.into_state(scene.projection);
    let mut map = Map::new(scene.projection)
        .with_viewport(viewport)
        .with_engine_family(scene.engine);

    for (z_index, profile) in scene.layers.iter().enumerate() {
        match TileLayer::from_json(profile)? {
            Some(mut layer) => {
                layer.set_z_index(z_index as i32);
                map.add_layer(layer)?;
            }
            None => log::warn!("Skipping layer profile that is not a tile layer: {}", profile),
        }
    }

    Ok(map)
}

fn run(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(&path)?;
    let scene: Scene = serde_json::from_str(&contents)?;
    let canvas_size = scene.canvas_size;
    let map = load_map(scene)?;

    log::info!(
        "Loaded {} layers from {} ({}, {:?} order)",
        map.layers().len(),
        path.display(),
        map.projection(),
        map.load_order()
    );

    for (layer_id, grid) in map.visible_tiles(canvas_size)? {
        println!(
            "# {} ({} tiles, coverage {:.0},{:.0} to {:.0},{:.0})",
            layer_id,
            grid.len(),
            grid.coverage_extent.min.x,
            grid.coverage_extent.min.y,
            grid.coverage_extent.max.x,
            grid.coverage_extent.max.y
        );
        for tile in &grid.tiles {
            println!(
                "{}\t{:.0}\t{:.0}\t{}",
                tile.id, tile.position.x, tile.position.y, tile.url
            );
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    run(args.scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_scene_path_argument() {
        let args = Args::try_parse_from(["tilegrid-app", "scenes/osm.json"]).unwrap();
        assert_eq!(args.scene, PathBuf::from("scenes/osm.json"));
    }

    #[test]
    fn test_help_is_not_a_scene() {
        let err = Args::try_parse_from(["tilegrid-app", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["tilegrid-app"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_sample_scene_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes/osm.json");
        let scene: Scene = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        let map = load_map(scene).unwrap();
        assert_eq!(map.layers().len(), 2);
        assert_eq!(map.base_layer().map(|l| l.id()), Some("osm"));
        assert_eq!(map.visible_tiles(None).unwrap().len(), 2);
    }
}
