//! **mazegame** is the model, generation and traversal core of a small grid
//! maze game: carve a random maze, walk a player token through its passages
//! and win at the far corner. Rendering and input handling live elsewhere
//! and talk to this crate through plain queries and intents.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod session;
pub mod units;
