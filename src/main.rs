use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod error;
mod generators;
#[allow(dead_code)]
mod grids;

use cli::Args;
use generators::backtracker::Backtracker;
use generators::{Generator, RngDirections};
use grids::block_grid::BlockGrid;

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "generating {}x{} maze with seed {}",
        config.width, config.height, seed
    );

    let mut grid = BlockGrid::with_dims(config.width, config.height)?;
    let directions = RngDirections(StdRng::seed_from_u64(seed));
    let mut generator = Backtracker::new(&mut grid, directions);
    generator.generate_maze();
    let stats = generator.stats();
    info!(
        "carved {} passages with {} backtracks",
        stats.forward_steps, stats.backtracks
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write!(out, "{}", grid)?;
    out.flush()?;

    Ok(())
}

fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // usage problems exit 1, --help and --version still exit 0
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if let Err(err) = run(&args) {
        let program = std::env::args().next().unwrap_or_else(|| "maze".into());
        eprintln!("{}: {}", program, err);
        process::exit(1);
    }
}
