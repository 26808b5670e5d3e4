use crate::cells::{Cartesian2DCoordinate, CompassPrimary, DirectionSmallVec, COMPASS_PRIMARIES};
use crate::errors::*;
use crate::grid::{IndexType, RectGrid};

use rand::{Rng, SeedableRng, XorShiftRng};

/// Expands a caller supplied seed into the RNG threaded through maze
/// generation. The same seed always reproduces the same maze, which the
/// determinism tests rely on. Callers without a seed can pass
/// `rand::weak_rng()` to the generator instead.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let lo = (seed & 0xffff_ffff) as u32;
    let hi = (seed >> 32) as u32;
    // The third word is forced odd so the xorshift state is never all zero.
    XorShiftRng::from_seed([lo ^ 0x9e37_79b9,
                            hi ^ 0x7f4a_7c15,
                            lo.wrapping_mul(0x9e37_79b1) | 1,
                            hi ^ 0x85eb_ca6b])
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A randomized depth-first spanning-tree carve: from the current cell try
/// the four directions in shuffled order, carve into the first unvisited
/// in-bounds neighbour and descend into it before trying the current cell's
/// remaining directions, backtracking when none are left. Depth-first
/// descent is what gives the long winding corridors.
///
/// The recursion is rewritten as an explicit work-stack of
/// (cell, remaining shuffled directions) so large grids cannot overflow the
/// call stack; the traversal order is identical to the recursive form.
///
/// A cell counts as visited once it has at least one carved passage. The
/// start cell (0, 0) is visited by being the initial stack frame, before it
/// has any passage.
pub fn recursive_backtracker<GridIndexType>(grid: &mut RectGrid<GridIndexType>,
                                            rng: &mut XorShiftRng)
                                            -> Result<()>
    where GridIndexType: IndexType
{
    let mut stack: Vec<(Cartesian2DCoordinate, DirectionSmallVec)> =
        Vec::with_capacity(grid.size());
    stack.push((grid.start(), shuffled_directions(rng)));

    loop {
        let carve = match stack.last_mut() {
            None => break,
            Some(&mut (cell, ref mut remaining)) => {
                let mut found = None;
                while let Some(dir) = remaining.pop() {
                    if let Some(neighbour) = grid.neighbour_at_direction(cell, dir) {
                        if !grid.has_open_passages(neighbour) {
                            found = Some((cell, dir, neighbour));
                            break;
                        }
                    }
                }
                found
            }
        };

        match carve {
            Some((cell, dir, neighbour)) => {
                grid.connect(cell, dir)?;
                stack.push((neighbour, shuffled_directions(rng)));
            }
            None => {
                // No unvisited in-bounds neighbour left: backtrack.
                let _ = stack.pop();
            }
        }
    }

    repair_exit(grid)
}

fn shuffled_directions(rng: &mut XorShiftRng) -> DirectionSmallVec {
    let mut dirs = COMPASS_PRIMARIES;
    rng.shuffle(&mut dirs);
    dirs.iter().cloned().collect()
}

/// Safety net, not a connectivity proof: the depth-first carve reaches every
/// cell of the grid, but should the exit corner ever end up with no open
/// passage, force-open its link toward the rest of the maze so the goal is
/// always enterable.
fn repair_exit<GridIndexType>(grid: &mut RectGrid<GridIndexType>) -> Result<()>
    where GridIndexType: IndexType
{
    let exit = grid.exit();
    if exit == grid.start() {
        // 1x1 grid, nothing to reach.
        return Ok(());
    }
    if !grid.has_open_passages(exit) {
        let link = if grid.width() > 1 {
            CompassPrimary::West
        } else {
            // Single column grid, the western neighbour does not exist.
            CompassPrimary::North
        };
        grid.connect(exit, link)?;
    }
    Ok(())
}
