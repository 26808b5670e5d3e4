//! One game of maze: the player position, the edit/play state machine, move
//! validation against the grid's carved passages and the session telemetry
//! (move counter, elapsed play time) the UI layer displays.

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::generators::{recursive_backtracker, seeded_rng};
use crate::grid::{IndexType, RectGrid};
use crate::units::{CellPixels, Height, Width};

use rand;
use std::time::Instant;

/// `Editing` allows wall toggles and no movement; `Playing` allows movement
/// and win checks and no wall toggles. A session moves from `Editing` to
/// `Playing` exactly once and never back.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SessionMode {
    Editing,
    Playing,
}

pub struct GameSession<GridIndexType: IndexType> {
    grid: RectGrid<GridIndexType>,
    player: Cartesian2DCoordinate,
    mode: SessionMode,
    move_count: u32,
    play_started: Option<Instant>,
}

impl<GridIndexType: IndexType> GameSession<GridIndexType> {
    /// Classic game: carve a maze and start playing immediately.
    pub fn generate(width: Width,
                    height: Height,
                    seed: Option<u64>)
                    -> Result<GameSession<GridIndexType>> {
        let mut session = Self::generate_editable(width, height, seed)?;
        session.confirm_layout();
        Ok(session)
    }

    /// Editable variant: carve a maze but hold in `Editing` so walls can be
    /// reshaped before `confirm_layout` starts the game.
    pub fn generate_editable(width: Width,
                             height: Height,
                             seed: Option<u64>)
                             -> Result<GameSession<GridIndexType>> {
        let mut grid = RectGrid::new(width, height)?;
        match seed {
            Some(s) => recursive_backtracker(&mut grid, &mut seeded_rng(s))?,
            None => recursive_backtracker(&mut grid, &mut rand::weak_rng())?,
        }
        Ok(Self::with_grid(grid))
    }

    /// Wraps an existing grid in an `Editing` session. Useful for hand-built
    /// layouts; call `confirm_layout` to start playing.
    pub fn with_grid(grid: RectGrid<GridIndexType>) -> GameSession<GridIndexType> {
        let start = grid.start();
        GameSession {
            grid: grid,
            player: start,
            mode: SessionMode::Editing,
            move_count: 0,
            play_started: None,
        }
    }

    /// Confirms the maze layout and starts play (and the play clock).
    /// No-op once playing; `Playing` is terminal for the session.
    pub fn confirm_layout(&mut self) {
        if self.mode == SessionMode::Editing {
            self.mode = SessionMode::Playing;
            self.play_started = Some(Instant::now());
        }
    }

    /// Tries to move the player one cell in the given direction and returns
    /// the resulting position. The move happens only while `Playing` and
    /// only through a carved passage; anything else leaves the player where
    /// they are. Illegal moves are not errors, invalid input simply has no
    /// effect.
    pub fn attempt_move(&mut self, direction: CompassPrimary) -> Cartesian2DCoordinate {
        if self.mode != SessionMode::Playing {
            return self.player;
        }
        if self.grid.is_linked(self.player, direction) {
            // A carved passage only ever leads to an in-bounds neighbour.
            if let Some(next) = self.grid.neighbour_at_direction(self.player, direction) {
                self.player = next;
                self.move_count += 1;
            }
        }
        self.player
    }

    /// Has the player reached the exit corner?
    pub fn is_won(&self) -> bool {
        self.player == self.grid.exit()
    }

    /// Maps a pointer position onto a cell edge and toggles that wall.
    /// Returns whether a toggle happened. No-ops: sessions already
    /// `Playing`, pointers outside the grid, pointers in no edge band, and
    /// edges whose neighbouring cell would be off the grid.
    pub fn toggle_wall_at(&mut self,
                          pixel_x: u32,
                          pixel_y: u32,
                          cell_pixels: CellPixels)
                          -> bool {
        if self.mode != SessionMode::Editing {
            return false;
        }
        let CellPixels(cell_size) = cell_pixels;
        if cell_size == 0 {
            return false;
        }

        let cell = Cartesian2DCoordinate::new(pixel_x / cell_size, pixel_y / cell_size);
        if !self.grid.is_valid_coordinate(cell) {
            return false;
        }
        let edge = match nearest_edge(pixel_x % cell_size, pixel_y % cell_size, cell_size) {
            Some(direction) => direction,
            None => return false,
        };
        if self.grid.neighbour_at_direction(cell, edge).is_none() {
            return false;
        }

        self.grid.toggle(cell, edge).is_ok()
    }

    /// Successful moves made since play began.
    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whole seconds since `Playing` began; 0 while still editing. Read by
    /// the UI's periodic tick.
    pub fn elapsed_seconds(&self) -> u64 {
        self.play_started.map_or(0, |started| started.elapsed().as_secs())
    }

    #[inline]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[inline]
    pub fn player(&self) -> Cartesian2DCoordinate {
        self.player
    }

    #[inline]
    pub fn grid(&self) -> &RectGrid<GridIndexType> {
        &self.grid
    }
}

/// The edge of the cell nearest to a pointer offset within it, provided the
/// pointer sits inside the proximity band along that edge. Offsets in the
/// middle of the cell select nothing.
fn nearest_edge(offset_x: u32, offset_y: u32, cell_size: u32) -> Option<CompassPrimary> {
    let band = cell_size / 4;
    let edge_distances = [(offset_y, CompassPrimary::North),
                          (cell_size - 1 - offset_y, CompassPrimary::South),
                          (cell_size - 1 - offset_x, CompassPrimary::East),
                          (offset_x, CompassPrimary::West)];

    edge_distances.iter()
                  .cloned()
                  .min_by_key(|&(distance, _)| distance)
                  .and_then(|(distance, direction)| {
                      if distance < band {
                          Some(direction)
                      } else {
                          None
                      }
                  })
}
