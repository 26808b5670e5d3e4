use docopt::Docopt;
use mazegame::{
    generators,
    grid::MediumRectGrid,
    pathing::Distances,
    units::{Height, Width},
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Mazegame

Usage:
    mazegame_driver -h | --help
    mazegame_driver [--grid-width=<w> --grid-height=<h>] [--seed=<n>] [--text-out=<path>]

Options:
    -h --help            Show this screen.
    --grid-width=<w>     The grid width in a w*h maze [default: 20].
    --grid-height=<h>    The grid height in a w*h maze [default: 15].
    --seed=<n>           Seed for deterministic maze generation. A random maze is carved when omitted.
    --text-out=<path>    Write the textual rendering of the maze to a file instead of stdout.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
}

// The `errors` module and `use errors::*` give the whole binary access to
// everything `error_chain!` creates: Error, ErrorKind, Result and the `?`
// conversions from the linked and foreign error types.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazegame::errors::Error, ::mazegame::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut grid =
        MediumRectGrid::new(Width(args.flag_grid_width), Height(args.flag_grid_height))?;
    match args.flag_seed {
        Some(seed) => {
            generators::recursive_backtracker(&mut grid, &mut generators::seeded_rng(seed))?
        }
        None => generators::recursive_backtracker(&mut grid, &mut rand::weak_rng())?,
    }

    let rendering = format!("{}", grid);
    if args.flag_text_out.is_empty() {
        print!("{}", rendering);
    } else {
        let mut file = File::create(Path::new(&args.flag_text_out))?;
        file.write_all(rendering.as_bytes())?;
    }

    let solution_length = Distances::new(&grid, grid.start())
        .and_then(|distances| distances.distance_from_start_to(grid.exit()));
    match solution_length {
        Some(steps) => println!("Exit reachable in {} steps from the start corner.", steps),
        None => println!("Exit is not reachable from the start corner."),
    }

    Ok(())
}
