//! Property tests for grid coverage, tile index arithmetic and URL resolution

use proptest::prelude::*;
use regex::Regex;
use tilegrid::prelude::{
    compute_visible_tiles, Bounds, GridRequest, LoadOrder, Point, Projection, ShardPolicy, Size,
    TileGeometryConfig, TileIndex, TileSize, TileSystem, UrlResolver, UrlSource, ViewportState,
    VisibleGrid,
};

fn web_mercator_config() -> TileGeometryConfig {
    let projection = Projection::WebMercator;
    TileGeometryConfig::new(
        projection.default_tile_system(),
        projection.full_extent(),
        TileSize::default(),
        projection.is_full_world(),
    )
    .unwrap()
}

/// Unbounded grid with 256px tiles at resolution 1 and the origin at (0, 0)
fn flat_config() -> TileGeometryConfig {
    TileGeometryConfig::new(
        TileSystem::new(1, -1, Point::new(0.0, 0.0)).unwrap(),
        Bounds::from_coords(-1.0e9, -1.0e9, 1.0e9, 1.0e9),
        TileSize::default(),
        false,
    )
    .unwrap()
}

fn grid_for(viewport: &ViewportState, config: &TileGeometryConfig) -> VisibleGrid {
    grid_on_canvas(viewport, config, None)
}

fn grid_on_canvas(
    viewport: &ViewportState,
    config: &TileGeometryConfig,
    canvas_size: Option<Size>,
) -> VisibleGrid {
    let source = UrlSource::literal("{z}/{x}/{y}");
    let request = GridRequest {
        viewport,
        config,
        canvas_size,
        resolver: UrlResolver::new(Some(&source), &[], "error.png"),
        repeat_world: true,
        load_order: LoadOrder::FarthestFirst,
    };
    compute_visible_tiles(&request).unwrap()
}

const HALF_WORLD: f64 = 20_037_508.0;

/// Slack for positions that were shifted by a fractional pixel offset and back
const EPSILON: f64 = 1e-6;

proptest! {
    #[test]
    fn grid_covers_canvas(
        x in -HALF_WORLD..HALF_WORLD,
        y in -HALF_WORLD..HALF_WORLD,
        zoom in 0u32..12,
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
    ) {
        let config = web_mercator_config();
        let viewport = ViewportState::for_zoom(
            Projection::WebMercator,
            Point::new(x, y),
            zoom,
            Size::new(width, height),
        );
        let grid = grid_for(&viewport, &config);

        let extent = &grid.coverage_extent;
        prop_assert!(extent.min.x <= 0.0);
        prop_assert!(extent.min.y <= 0.0);
        prop_assert!(extent.max.x >= width);
        prop_assert!(extent.max.y >= height);

        // tiles form a full lattice, so the extent has no holes
        let columns = (extent.width() / 256.0).round() as usize;
        let rows = (extent.height() / 256.0).round() as usize;
        prop_assert_eq!(grid.len(), columns * rows);
    }

    #[test]
    fn grid_covers_requested_canvas(
        x in -HALF_WORLD..HALF_WORLD,
        y in -HALF_WORLD..HALF_WORLD,
        zoom in 0u32..12,
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        canvas_w in 0.0f64..4000.0,
        canvas_h in 0.0f64..4000.0,
        offset_x in -500.0f64..500.0,
        offset_y in -500.0f64..500.0,
    ) {
        let config = web_mercator_config();
        let viewport = ViewportState::for_zoom(
            Projection::WebMercator,
            Point::new(x, y),
            zoom,
            Size::new(width, height),
        )
        .with_pixel_offset(Point::new(offset_x, offset_y));
        let grid = grid_on_canvas(&viewport, &config, Some(Size::new(canvas_w, canvas_h)));

        // undo the surface translation to get canvas-relative coverage
        let extent = &grid.coverage_extent;
        prop_assert!(extent.min.x + offset_x <= EPSILON);
        prop_assert!(extent.min.y + offset_y <= EPSILON);
        prop_assert!(extent.max.x + offset_x >= canvas_w - EPSILON);
        prop_assert!(extent.max.y + offset_y >= canvas_h - EPSILON);

        // the larger of canvas and viewport sets the reach
        prop_assert!(extent.width() >= canvas_w.max(width) - EPSILON);
        prop_assert!(extent.height() >= canvas_h.max(height) - EPSILON);

        let columns = (extent.width() / 256.0).round() as usize;
        let rows = (extent.height() / 256.0).round() as usize;
        prop_assert_eq!(grid.len(), columns * rows);
    }

    #[test]
    fn center_tile_is_its_own_neighbor(
        x in -HALF_WORLD..HALF_WORLD,
        y in -HALF_WORLD..HALF_WORLD,
        zoom in 0u32..18,
        wrap in any::<bool>(),
    ) {
        let config = web_mercator_config();
        let resolution = Projection::WebMercator.resolution(zoom);
        let center = config.center_tile_index(Point::new(x, y), resolution, zoom).unwrap();
        let same = config.neighbor_tile_index(center.index, 0, 0, resolution, wrap).unwrap();
        prop_assert_eq!(same, center.index);
    }

    #[test]
    fn neighbor_matches_shifted_center(
        slot_x in -1000i64..1000,
        slot_y in -1000i64..1000,
        offset_x in 1i64..255,
        offset_y in 1i64..255,
        dc in -20i64..20,
        dr in -20i64..20,
    ) {
        let config = flat_config();
        let x = (slot_x * 256 + offset_x) as f64;
        let y = -((slot_y * 256 + offset_y) as f64);
        let base = config.center_tile_index(Point::new(x, y), 1.0, 5).unwrap();
        prop_assert_eq!(base.offset, Point::new(offset_x as f64, offset_y as f64));

        let shifted = Point::new(x + (dc * 256) as f64, y - (dr * 256) as f64);
        let expected = config.center_tile_index(shifted, 1.0, 5).unwrap().index;
        let neighbor = config.neighbor_tile_index(base.index, dr, dc, 1.0, true).unwrap();
        prop_assert_eq!(neighbor, expected);
    }

    #[test]
    fn url_round_trip(
        row in -100_000i64..100_000,
        column in -100_000i64..100_000,
        zoom in 0u32..25,
    ) {
        let subdomains = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let source = UrlSource::literal("https://{s}.tiles.example/{ z }/{x}/{y}.png");
        let resolver = UrlResolver::new(Some(&source), &subdomains, "error.png");

        let url = resolver.resolve(&TileIndex::new(row, column, zoom)).unwrap();
        let pattern = Regex::new(r"^https://([abc])\.tiles\.example/(\d+)/(-?\d+)/(-?\d+)\.png$").unwrap();
        let captures = pattern.captures(&url).unwrap();

        let parsed = TileIndex::new(
            captures[4].parse().unwrap(),
            captures[3].parse().unwrap(),
            captures[2].parse().unwrap(),
        );
        prop_assert_eq!(parsed, TileIndex::new(row, column, zoom));
    }

    #[test]
    fn shard_depends_only_on_column_plus_row(
        column in 0i64..1_000_000,
        row in 0i64..1_000_000,
        shift in -1000i64..1000,
        len in 1usize..8,
    ) {
        let expected = ((column + row) % len as i64) as usize;
        prop_assert_eq!(ShardPolicy::Clamp.shard(column, row, len), expected);
        prop_assert_eq!(ShardPolicy::Wrap.shard(column, row, len), expected);

        // moving along an anti-diagonal keeps the shard
        let moved = ShardPolicy::Wrap.shard(column + shift, row - shift, len);
        prop_assert_eq!(moved, expected);
    }

    #[test]
    fn shard_is_always_in_range(
        column in -1_000_000i64..1_000_000,
        row in -1_000_000i64..1_000_000,
        len in 1usize..8,
    ) {
        prop_assert!(ShardPolicy::Clamp.shard(column, row, len) < len);
        prop_assert!(ShardPolicy::Wrap.shard(column, row, len) < len);
    }
}

#[test]
fn test_shard_of_two_one() {
    assert_eq!(ShardPolicy::Clamp.shard(2, 1, 3), 0);
}

#[test]
fn test_grid_is_idempotent() {
    let config = web_mercator_config();
    let viewport = ViewportState::for_zoom(
        Projection::WebMercator,
        Point::new(1_234_567.0, -7_654_321.0),
        9,
        Size::new(900.0, 700.0),
    )
    .with_pixel_offset(Point::new(13.0, -4.0));

    let first = grid_for(&viewport, &config);
    let second = grid_for(&viewport, &config);
    assert_eq!(first, second);
}
