use crate::algorithms::Algorithm;
use crate::config::Config;
use crate::simulation::{run, SearchRequest, Simulation};
use crate::statistics::optimal_path_length;
use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub simulation_id: usize,
    pub seed: u64,
    pub algorithm: Algorithm,
    pub cols: usize,
    pub rows: usize,
    pub num_walls: usize,
    pub success: bool,
    pub nodes_expanded: usize,
    pub path_length: usize,
    pub optimal_path_length: Option<usize>,
    pub compute_us: u64,
}

#[derive(Debug, Clone, Default)]
struct AlgorithmTotals {
    runs: usize,
    successes: usize,
    nodes_expanded: usize,
    path_length: usize,
    extra_steps: usize,
    compute_us: u64,
}

impl AlgorithmTotals {
    fn add(&mut self, result: &BatchResult) {
        self.runs += 1;
        self.compute_us += result.compute_us;
        self.nodes_expanded += result.nodes_expanded;
        if result.success {
            self.successes += 1;
            self.path_length += result.path_length;
            self.extra_steps += result
                .path_length
                .saturating_sub(result.optimal_path_length.unwrap_or(0));
        }
    }
}

/// Runs many seeded random mazes through the selected algorithms and
/// streams one CSV row per (maze, algorithm) pair.
pub struct BatchSimulation {
    config: Config,
    results: Vec<BatchResult>,
    totals: FxHashMap<Algorithm, AlgorithmTotals>,
    start_time: Instant,
    batch_size: usize,
    total_results_written: usize,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        BatchSimulation {
            config,
            results: Vec::new(),
            totals: FxHashMap::default(),
            start_time: Instant::now(),
            batch_size: 100,
            total_results_written: 0,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn algorithms(&self) -> anyhow::Result<Vec<Algorithm>> {
        if self.config.runs_all() {
            Ok(Algorithm::ALL.to_vec())
        } else {
            Ok(vec![self.config.algorithm()?])
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let algorithms = self.algorithms()?;
        let base_seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let (cols, rows) = self.config.dimensions();

        self.initialize_csv_file()?;
        if !self.config.quiet {
            println!("=== BATCH SIMULATION STARTED ===");
            println!("Grid size: {}x{}", cols, rows);
            println!("Wall density: {}", self.config.wall_density);
            println!("Simulations: {}", self.config.num_simulations);
            println!("Algorithms: {:?}", algorithms);
            println!("Base seed: {} (for reproducibility)", base_seed);
            println!("Output file: {}", self.config.output_file);
            println!();
        }

        for simulation_id in 0..self.config.num_simulations {
            let seed = base_seed.wrapping_add(simulation_id as u64);
            let grid = Simulation::build_grid(&self.config, Some(seed));
            let optimal = optimal_path_length(&grid);
            debug!("Simulation {} (seed {}): optimal length {:?}", simulation_id, seed, optimal);

            for &algorithm in &algorithms {
                let request = SearchRequest::new(grid.clone(), algorithm, self.config.search_params());
                let result = run(&request);
                let batch_result = BatchResult {
                    simulation_id,
                    seed,
                    algorithm,
                    cols,
                    rows,
                    num_walls: grid.wall_count(),
                    success: result.found_path(),
                    nodes_expanded: result.nodes_expanded,
                    path_length: result.path_length,
                    optimal_path_length: optimal,
                    compute_us: (result.compute_ms * 1000.0) as u64,
                };
                self.totals.entry(algorithm).or_default().add(&batch_result);
                self.results.push(batch_result);
            }

            if self.results.len() >= self.batch_size {
                self.flush_results_to_csv()?;
            }
        }
        self.flush_results_to_csv()?;

        info!(
            "Batch finished: {} rows in {:.2?}",
            self.total_results_written,
            self.start_time.elapsed()
        );
        if self.config.quiet {
            println!(
                "Batch simulation completed: {} results in {:.1}s -> {}",
                self.total_results_written,
                self.start_time.elapsed().as_secs_f64(),
                self.config.output_file
            );
        } else {
            println!("\n=== BATCH SIMULATION COMPLETED ===");
            println!("Total results written: {}", self.total_results_written);
            println!("Results saved to: {}", self.config.output_file);
            println!("Total time: {:.2?}", self.start_time.elapsed());
        }
        Ok(())
    }

    fn flush_results_to_csv(&mut self) -> anyhow::Result<()> {
        if self.results.is_empty() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_file)
            .with_context(|| format!("Failed to open {} for appending", self.config.output_file))?;

        for result in &self.results {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{},{}",
                result.simulation_id,
                result.seed,
                result.algorithm,
                result.cols,
                result.rows,
                result.num_walls,
                result.success,
                result.nodes_expanded,
                result.path_length,
                result.optimal_path_length.map_or(-1, |len| len as i64),
                result.compute_us
            )
            .context("Failed to write data row")?;
        }

        self.total_results_written += self.results.len();
        debug!(
            "Flushed {} results to CSV (total: {})",
            self.results.len(),
            self.total_results_written
        );
        self.results.clear();
        Ok(())
    }

    fn initialize_csv_file(&self) -> anyhow::Result<()> {
        let mut file = std::fs::File::create(&self.config.output_file)
            .with_context(|| format!("Failed to create {}", self.config.output_file))?;
        writeln!(
            file,
            "simulation_id,seed,algorithm,cols,rows,num_walls,success,nodes_expanded,path_length,optimal_path_length,compute_us"
        )
        .context("Failed to write header")?;
        Ok(())
    }

    pub fn print_summary(&self) {
        if self.totals.is_empty() {
            println!("No results to summarize.");
            return;
        }

        println!("\n=== BATCH SIMULATION SUMMARY ===");
        for algorithm in Algorithm::ALL {
            let Some(totals) = self.totals.get(&algorithm) else {
                continue;
            };
            println!("\n{} Algorithm Results:", algorithm);
            let success_rate = (totals.successes as f64 / totals.runs as f64) * 100.0;
            println!(
                "  Success rate: {}/{} ({:.1}%)",
                totals.successes, totals.runs, success_rate
            );
            println!(
                "  Average nodes expanded: {:.1}",
                totals.nodes_expanded as f64 / totals.runs as f64
            );
            println!(
                "  Average compute time: {:.1}µs",
                totals.compute_us as f64 / totals.runs as f64
            );
            if totals.successes > 0 {
                println!(
                    "  Average path length: {:.1}",
                    totals.path_length as f64 / totals.successes as f64
                );
                println!(
                    "  Average extra steps: {:.2}",
                    totals.extra_steps as f64 / totals.successes as f64
                );
            }
        }
    }

    pub fn total_results_written(&self) -> usize {
        self.total_results_written
    }
}
