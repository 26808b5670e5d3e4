//! Error types for the crate, all `error_chain!` generated.
//!
//! Illegal player moves and illegal wall-toggle targets are deliberately not
//! errors: they are defined no-ops in response to unconstrained user input.

use error_chain::*;

error_chain! {
    errors {
        // Construction with a zero width or height. Fatal to construction,
        // surfaced to whoever builds the session.
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}, both must be at least 1", width, height)
        }
        // The chosen graph index type cannot address this many cells.
        GridTooLarge(cells: usize, capacity: usize) {
            description("grid exceeds the index type capacity")
            display("grid of {} cells exceeds the index type capacity {}", cells, capacity)
        }
        // A cell access outside the grid. A contract violation from any
        // well-formed generator or validator, never a runtime condition to
        // recover from.
        OutOfBounds(x: i64, y: i64) {
            description("coordinate outside the grid")
            display("coordinate ({}, {}) lies outside the grid", x, y)
        }
    }
}
