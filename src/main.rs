use anyhow::Context;
use clap::Parser;

use grid_search_viz::batch_simulation::BatchSimulation;
use grid_search_viz::config::Config;
use grid_search_viz::simulation::Simulation;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let (cols, rows) = config.dimensions();

    if !config.quiet && !config.json {
        println!("Starting grid search...");
        println!("Grid size: {}x{}", cols, rows);
        println!("Start: {}, Goal: {}", config.start(), config.goal());
        println!("Wall density: {}", config.wall_density);
        println!("Algorithm: {}", config.algorithm);
        if config.no_visualization || config.batch_mode {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
        }
        println!();
    }

    if config.batch_mode {
        let mut batch_sim = BatchSimulation::new(config.clone());
        batch_sim.run().context("Batch simulation failed")?;
        if !config.quiet {
            batch_sim.print_summary();
        }
    } else if config.runs_all() {
        Simulation::new(config).compare()?;
    } else {
        let json = config.json;
        let simulation = Simulation::new(config);
        let result = simulation.run()?;
        if !result.found_path() && !json {
            if result.nodes_expanded == 0 {
                println!("Start or goal is blocked - nothing was searched");
            } else {
                println!("No path exists - try lowering --wall-density");
            }
        }
    }

    Ok(())
}
