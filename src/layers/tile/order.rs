//! Load and draw ordering of a computed tile set.
//!
//! The order doubles as network priority and canvas draw order. Tiles far
//! from the center come first so the center tile is requested last and ends
//! up drawn on top of its neighbours. Engines that process submissions in
//! reverse get the opposite order, which has the same visible effect there.

use crate::core::{geo::Point, platform::LoadOrder};

use super::grid::TileDescriptor;

/// Sorts tiles by pixel distance between their screen position and `center`.
///
/// The sort is stable, so tiles at equal distance keep their enumeration order.
pub fn order_tiles(tiles: &mut [TileDescriptor], center: Point, order: LoadOrder) {
    tiles.sort_by(|a, b| {
        let distance_a = a.position.distance_to(&center);
        let distance_b = b.position.distance_to(&center);
        match order {
            LoadOrder::FarthestFirst => distance_b.total_cmp(&distance_a),
            LoadOrder::NearestFirst => distance_a.total_cmp(&distance_b),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileIndex;

    fn tile_at(x: f64, column: i64) -> TileDescriptor {
        let index = TileIndex::new(0, column, 1);
        TileDescriptor {
            id: index.id(),
            index,
            position: Point::new(x, 0.0),
            url: String::new(),
        }
    }

    fn distances(tiles: &[TileDescriptor]) -> Vec<f64> {
        tiles.iter().map(|t| t.position.x).collect()
    }

    #[test]
    fn test_farthest_first() {
        let mut tiles = vec![tile_at(50.0, 0), tile_at(10.0, 1), tile_at(80.0, 2)];
        order_tiles(&mut tiles, Point::new(0.0, 0.0), LoadOrder::FarthestFirst);
        assert_eq!(distances(&tiles), vec![80.0, 50.0, 10.0]);
    }

    #[test]
    fn test_nearest_first_when_flipped() {
        let mut tiles = vec![tile_at(50.0, 0), tile_at(10.0, 1), tile_at(80.0, 2)];
        order_tiles(&mut tiles, Point::new(0.0, 0.0), LoadOrder::from_platform_flip(true));
        assert_eq!(distances(&tiles), vec![10.0, 50.0, 80.0]);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let mut tiles = vec![tile_at(-20.0, 0), tile_at(20.0, 1), tile_at(5.0, 2)];
        order_tiles(&mut tiles, Point::new(0.0, 0.0), LoadOrder::FarthestFirst);
        let columns: Vec<i64> = tiles.iter().map(|t| t.index.column).collect();
        assert_eq!(columns, vec![0, 1, 2]);
    }
}
