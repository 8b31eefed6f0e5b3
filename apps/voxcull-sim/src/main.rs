//! Headless voxcull simulation.
//!
//! Builds a small walled arena, spawns a ring of creatures, orbits the
//! camera around it and runs the entity culler every frame.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxcull-sim -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--frames <N>`: Frames to simulate (default: 600)
//! - `--entities <N>`: Creatures to spawn (default: 300)
//! - `--config <PATH>`: TOML settings file with `[culling]` and `[visibility]` tables
//! - `--hide <KIND>`: Never draw this creature kind (repeatable)
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod sim;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::sim::{SimParams, SimSettings, Simulation};

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = SimParams::from_args()?;
    let settings = match &params.config {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };
    info!(
        "Simulating {} creatures for {} frames (near radius {})",
        params.entities, params.frames, settings.culling.near_radius
    );

    let mut sim = Simulation::new(&params, settings);
    let totals = sim.run(params.frames);

    info!("Simulation finished:");
    info!("  Creatures left: {}", sim.population());
    info!("  Updates run: {}", totals.updated);
    info!("  Draws: {}", totals.rendered);
    info!("  Frozen: {}", totals.frozen);
    info!("  Occluded: {}", totals.occluded);
    info!("  Removed: {} ({} crashed)", totals.removed, totals.crashed);
    Ok(())
}

fn print_help() {
    eprintln!(
        "voxcull headless simulation

USAGE:
    voxcull-sim [OPTIONS]

OPTIONS:
    --frames <N>       Frames to simulate (default: 600)
    --entities <N>     Creatures to spawn (default: 300)
    --config <PATH>    TOML settings file with [culling] and [visibility] tables
    --hide <KIND>      Never draw this creature kind, e.g. pig (repeatable)
    -h, --help         Print this help message

ENVIRONMENT:
    RUST_LOG           Log level (e.g. info, debug, trace)"
    );
}
