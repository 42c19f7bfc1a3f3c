//! Headless trainer: runs generations back to back without a window.

use std::path::PathBuf;

use clap::Parser;
use drive_evo::simulation::error::Result;
use drive_evo::simulation::params::Params;
use drive_evo::simulation::persistence::{BrainStore, JsonFileStore, MemoryStore};
use drive_evo::simulation::population::Population;

/// Train vehicle networks without rendering.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON parameter file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the best network. Kept in memory when omitted.
    #[arg(long)]
    brain: Option<PathBuf>,

    /// Number of generations to run.
    #[arg(long, default_value_t = 10)]
    generations: u32,

    /// Ticks simulated per generation.
    #[arg(long, default_value_t = 2000)]
    ticks: u64,
}

fn run(args: &Args) -> Result<()> {
    let params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };

    let mut store: Box<dyn BrainStore> = match &args.brain {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let mut population = Population::resume(params, store.as_ref())?;

    for _ in 0..args.generations {
        for _ in 0..args.ticks {
            population.tick();
        }
        population.advance_generation(store.as_mut())?;
    }

    if let Some(best) = population.history().best_distance() {
        tracing::info!(
            generations = args.generations,
            best_distance = best,
            "training finished"
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("training failed: {e}");
        std::process::exit(1);
    }
}
