use crate::cells::Cartesian2DCoordinate;
use crate::grid::{IndexType, RectGrid};

use fnv::FnvHashMap;

/// Breadth-first flood fill of a grid's carved passages from one start cell.
///
/// Every passage costs one step, so the first time the frontier reaches a
/// cell it has found the shortest route there and the cell never needs
/// revisiting; the distances map doubles as the visited set.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None when the start coordinate is not on the grid.
    pub fn new<GridIndexType>(grid: &RectGrid<GridIndexType>,
                              start_coordinate: Cartesian2DCoordinate)
                              -> Option<Distances>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut distances =
            FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start_coordinate, 0);
        let mut max = 0;

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for &cell in &frontier {

                let distance_to_cell = match distances.get(&cell) {
                    Some(&d) => d,
                    None => continue,
                };

                if let Ok(open) = grid.open_directions(cell) {
                    for &dir in open.iter() {
                        if let Some(link) = grid.neighbour_at_direction(cell, dir) {
                            if !distances.contains_key(&link) {
                                let distance_to_link = distance_to_cell + 1;
                                if distance_to_link > max {
                                    max = distance_to_link;
                                }
                                distances.insert(link, distance_to_link);
                                new_frontier.push(link);
                            }
                        }
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    /// The largest shortest-path distance to any reachable cell.
    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None when the coordinate is unreachable from the start (or invalid).
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }
}
