use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CompassPrimary, DirectionSmallVec,
                   COMPASS_PRIMARIES};
use crate::errors::*;
use crate::units::{Height, Width};

use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use std::fmt;

/// A rectangular maze grid. Every cell exists from construction; the carved
/// passages between adjacent cells are the edges of an undirected graph, so
/// passage symmetry (a passage out of a cell is a passage into its
/// neighbour) holds structurally and cannot be broken by any mutation.
#[derive(Debug)]
pub struct RectGrid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    width: usize,
    height: usize,
}

pub type SmallRectGrid = RectGrid<u8>;
pub type MediumRectGrid = RectGrid<u16>;
pub type LargeRectGrid = RectGrid<u32>;

impl<GridIndexType: IndexType> RectGrid<GridIndexType> {
    /// Creates a grid with every cell present and no passages carved.
    pub fn new(width: Width, height: Height) -> Result<RectGrid<GridIndexType>> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }

        let cells_count = w * h;
        let index_capacity = <GridIndexType as IndexType>::max().index();
        if cells_count > index_capacity {
            return Err(ErrorKind::GridTooLarge(cells_count, index_capacity).into());
        }

        // A spanning tree carve uses cells_count - 1 edges; leave headroom
        // for wall editing opening extra passages.
        let edges_count_hint = 2 * cells_count;
        let mut grid = RectGrid {
            graph: Graph::with_capacity(cells_count, edges_count_hint),
            width: w,
            height: h,
        };
        for _ in 0..cells_count {
            let _ = grid.graph.add_node(());
        }

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// The cell the player starts a game from.
    pub fn start(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The goal cell of a game, the corner diagonally opposite the start.
    pub fn exit(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new((self.width - 1) as u32, (self.height - 1) as u32)
    }

    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// The adjacent cell in the given direction, or None at the grid edge.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction).filter(|c| self.is_valid_coordinate(*c))
    }

    /// The directions with a carved passage out of this cell. Empty for an
    /// in-bounds cell that nothing has been carved from yet.
    pub fn open_directions(&self, coord: Cartesian2DCoordinate) -> Result<DirectionSmallVec> {
        self.require_in_bounds(coord)?;
        Ok(COMPASS_PRIMARIES.iter()
                            .cloned()
                            .filter(|&dir| self.is_linked(coord, dir))
                            .collect())
    }

    /// Is there a carved passage from this cell in the given direction?
    /// False for out-of-bounds cells and for directions off the grid edge.
    pub fn is_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        if !self.is_valid_coordinate(coord) {
            return false;
        }
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| {
                let a = self.graph_index(coord);
                let b = self.graph_index(neighbour);
                self.graph.find_edge(a, b).is_some()
            })
    }

    /// Does this cell have any carved passage at all? The generator treats
    /// this as its visited marker.
    pub fn has_open_passages(&self, coord: Cartesian2DCoordinate) -> bool {
        self.is_valid_coordinate(coord) &&
        COMPASS_PRIMARIES.iter().any(|&dir| self.is_linked(coord, dir))
    }

    /// Carves a passage from the cell in the given direction. One undirected
    /// edge covers both sides, so the neighbour's mirrored direction opens in
    /// the same step. No-op when already connected.
    pub fn connect(&mut self,
                   coord: Cartesian2DCoordinate,
                   direction: CompassPrimary)
                   -> Result<()> {
        self.require_in_bounds(coord)?;
        let neighbour = self.require_neighbour(coord, direction)?;
        let a = self.graph_index(coord);
        let b = self.graph_index(neighbour);
        let _ = self.graph.update_edge(a, b, ());
        Ok(())
    }

    /// Symmetric inverse of `connect`. No-op when no passage exists.
    pub fn disconnect(&mut self,
                      coord: Cartesian2DCoordinate,
                      direction: CompassPrimary)
                      -> Result<()> {
        self.require_in_bounds(coord)?;
        let neighbour = self.require_neighbour(coord, direction)?;
        let a = self.graph_index(coord);
        let b = self.graph_index(neighbour);
        if let Some(edge_index) = self.graph.find_edge(a, b) {
            // This invalidates the last edge index in the graph, which is
            // fine as we never store edge indices.
            self.graph.remove_edge(edge_index);
        }
        Ok(())
    }

    /// Connect if no passage exists, disconnect if one does. Used by the
    /// wall-editing mode.
    pub fn toggle(&mut self,
                  coord: Cartesian2DCoordinate,
                  direction: CompassPrimary)
                  -> Result<()> {
        if self.is_linked(coord, direction) {
            self.disconnect(coord, direction)
        } else {
            self.connect(coord, direction)
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            width: self.width,
            cells_count: self.size(),
        }
    }

    fn require_in_bounds(&self, coord: Cartesian2DCoordinate) -> Result<()> {
        if self.is_valid_coordinate(coord) {
            Ok(())
        } else {
            Err(ErrorKind::OutOfBounds(i64::from(coord.x), i64::from(coord.y)).into())
        }
    }

    fn require_neighbour(&self,
                         coord: Cartesian2DCoordinate,
                         direction: CompassPrimary)
                         -> Result<Cartesian2DCoordinate> {
        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour) => Ok(neighbour),
            None => {
                let (dx, dy) = direction.offsets();
                Err(ErrorKind::OutOfBounds(i64::from(coord.x) + dx, i64::from(coord.y) + dy)
                    .into())
            }
        }
    }

    fn graph_index(&self, coord: Cartesian2DCoordinate) -> graph::NodeIndex<GridIndexType> {
        let raw = (coord.y as usize * self.width) + coord.x as usize;
        graph::NodeIndex::<GridIndexType>::new(raw)
    }
}

impl<GridIndexType: IndexType> fmt::Display for RectGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        // Each cell reuses the southern wall of the cell above as its own
        // northern wall, so only the top boundary is special cased.
        let mut output = String::from("+");
        for _ in 0..self.width {
            output.push_str("---+");
        }
        output.push('\n');

        for y in 0..self.height {
            let mut body_line = String::from("|");
            let mut south_line = String::from("+");

            for x in 0..self.width {
                let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                body_line.push_str("   ");
                body_line.push(if self.is_linked(coord, CompassPrimary::East) {
                    ' '
                } else {
                    '|'
                });
                south_line.push_str(if self.is_linked(coord, CompassPrimary::South) {
                    "   +"
                } else {
                    "---+"
                });
            }

            output.push_str(&body_line);
            output.push('\n');
            output.push_str(&south_line);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    width: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.width;
            let x = self.current_cell_number - (y * self.width);
            self.current_cell_number += 1;
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CompassPrimary::{East, North, South, West};

    type SmallGrid = SmallRectGrid;

    fn small_grid(w: usize, h: usize) -> SmallGrid {
        SmallGrid::new(Width(w), Height(h)).expect("valid test dimensions")
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(w, h) in &[(0, 0), (0, 5), (5, 0)] {
            match SmallGrid::new(Width(w), Height(h)) {
                Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => {
                    assert_eq!((ew, eh), (w, h));
                }
                other => panic!("expected InvalidDimensions, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn grid_larger_than_index_type_is_rejected() {
        // 16 * 16 = 256 cells > u8::MAX addressable nodes
        match SmallGrid::new(Width(16), Height(16)) {
            Err(Error(ErrorKind::GridTooLarge(cells, _), _)) => assert_eq!(cells, 256),
            other => panic!("expected GridTooLarge, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn new_grid_has_every_cell_and_no_passages() {
        let g = small_grid(4, 3);
        assert_eq!(g.size(), 12);
        let mut seen = 0;
        for coord in g.iter() {
            assert!(g.is_valid_coordinate(coord));
            assert!(g.open_directions(coord).expect("in bounds").is_empty());
            seen += 1;
        }
        assert_eq!(seen, 12);
    }

    #[test]
    fn out_of_bounds_queries_fail() {
        let g = small_grid(3, 3);
        assert!(g.open_directions(gc(3, 0)).is_err());
        assert!(g.open_directions(gc(0, 3)).is_err());
        assert!(g.open_directions(gc(2, 2)).is_ok());
    }

    #[test]
    fn connect_off_the_grid_edge_fails() {
        let mut g = small_grid(3, 3);
        assert!(g.connect(gc(0, 0), North).is_err());
        assert!(g.connect(gc(0, 0), West).is_err());
        assert!(g.connect(gc(2, 2), South).is_err());
        assert!(g.connect(gc(2, 2), East).is_err());
        assert!(g.connect(gc(4, 4), South).is_err());
    }

    #[test]
    fn connecting_cells_is_symmetric() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 1);
        let b = gc(0, 2);
        let c = gc(0, 3);

        let open = |grid: &SmallGrid, coord| -> Vec<CompassPrimary> {
            grid.open_directions(coord).expect("in bounds").iter().cloned().collect()
        };

        // a, b and c start with no links
        assert_eq!(open(&g, a), vec![]);
        assert_eq!(open(&g, b), vec![]);
        assert_eq!(open(&g, c), vec![]);

        g.connect(a, South).expect("Connect failed");
        assert_eq!(open(&g, a), vec![South]);
        assert_eq!(open(&g, b), vec![North]);
        assert_eq!(open(&g, c), vec![]);
        assert!(g.is_linked(a, South));
        assert!(g.is_linked(b, North));

        // connecting from the other side of an existing passage is a no-op
        g.connect(b, North).expect("Connect failed");
        assert_eq!(open(&g, a), vec![South]);
        assert_eq!(open(&g, b), vec![North]);

        g.connect(b, South).expect("Connect failed");
        assert_eq!(open(&g, b), vec![North, South]);
        assert_eq!(open(&g, c), vec![North]);

        // disconnect is symmetric too
        g.disconnect(b, North).expect("Disconnect failed");
        assert_eq!(open(&g, a), vec![]);
        assert_eq!(open(&g, b), vec![South]);
        assert_eq!(open(&g, c), vec![North]);

        // disconnecting an absent passage is a no-op
        g.disconnect(b, North).expect("Disconnect failed");
        assert_eq!(open(&g, b), vec![South]);

        g.disconnect(c, North).expect("Disconnect failed");
        assert_eq!(open(&g, a), vec![]);
        assert_eq!(open(&g, b), vec![]);
        assert_eq!(open(&g, c), vec![]);
    }

    #[test]
    fn toggle_twice_restores_the_original_passages() {
        let mut g = small_grid(3, 3);
        g.connect(gc(1, 1), East).expect("Connect failed");

        let snapshot = |grid: &SmallGrid| -> Vec<Vec<CompassPrimary>> {
            grid.iter()
                .map(|c| grid.open_directions(c).expect("in bounds").iter().cloned().collect())
                .collect()
        };
        let before = snapshot(&g);

        // toggling an open passage shut and a shut passage open
        for &(coord, dir) in &[(gc(1, 1), East), (gc(1, 1), South)] {
            g.toggle(coord, dir).expect("Toggle failed");
            g.toggle(coord, dir).expect("Toggle failed");
            assert_eq!(snapshot(&g), before);
        }
    }

    #[test]
    fn toggle_with_an_out_of_bounds_neighbour_fails() {
        let mut g = small_grid(2, 2);
        assert!(g.toggle(gc(0, 0), West).is_err());
        assert!(g.toggle(gc(1, 1), East).is_err());
    }

    #[test]
    fn start_and_exit_corners() {
        let g = small_grid(5, 4);
        assert_eq!(g.start(), gc(0, 0));
        assert_eq!(g.exit(), gc(4, 3));

        let unit = small_grid(1, 1);
        assert_eq!(unit.start(), unit.exit());
    }

    #[test]
    fn cell_iter_is_row_major() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn display_renders_walls_and_passages() {
        let mut g = small_grid(2, 1);
        g.connect(gc(0, 0), East).expect("Connect failed");
        assert_eq!(format!("{}", g),
                   "+---+---+\n\
                    |       |\n\
                    +---+---+\n");

        let mut tall = small_grid(1, 2);
        tall.connect(gc(0, 0), South).expect("Connect failed");
        assert_eq!(format!("{}", tall),
                   "+---+\n\
                    |   |\n\
                    +   +\n\
                    |   |\n\
                    +---+\n");
    }
}
