use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use gol_console::{
    ConsoleSink, Generation, Simulation,
    args::{self, Args},
    logging,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log = logging::init(&args.log_level, args.log_file.as_deref())?;

    let seed = args::resolve_seed(&args);
    let mut rng = match args.rng_seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_entropy(),
    };
    let initial = Generation::populate(seed.size, seed.alive.as_ref(), &mut rng);
    info!(
        world = %seed.size,
        population = initial.population(),
        generations = args.generations,
        "starting simulation"
    );

    let mut simulation = Simulation::new();
    if let Some(ms) = args.time_budget_ms {
        simulation = simulation.with_time_budget(Duration::from_millis(ms));
    }

    let mut sink = ConsoleSink::spawn(
        args.glyphs(),
        Duration::from_millis(args.delay_ms),
        !args.no_clear,
    );
    let summary = simulation.run(args.generations, initial, &mut sink);
    sink.finish().context("failed to write simulation output")?;

    if let Some(path) = &args.export {
        args::export_seed(&summary.generation, path)
            .with_context(|| format!("failed to export final generation to {}", path.display()))?;
        info!(path = %path.display(), ticks = summary.ticks, "exported final generation");
    }

    Ok(())
}
