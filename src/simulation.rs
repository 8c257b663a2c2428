use crate::algorithms::common::{ScoreTable, VisualizationEvent};
use crate::algorithms::path::path_length;
use crate::algorithms::{Algorithm, SearchParams};
use crate::config::Config;
use crate::grid::{Grid, Position};
use crate::inspector::{inspect, render_score_overlay};
use crate::playback::Playback;
use crate::statistics::Statistics;
use anyhow::Context;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::thread;
use std::time::{Duration, Instant};

/// Everything one search needs. The grid carries the start and goal.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub grid: Grid,
    pub algorithm: Algorithm,
    pub params: SearchParams,
}

impl SearchRequest {
    pub fn new(grid: Grid, algorithm: Algorithm, params: SearchParams) -> Self {
        SearchRequest {
            grid,
            algorithm,
            params,
        }
    }
}

/// Packaged outcome of one search, ready for metrics and playback.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub algorithm: Algorithm,
    pub events: Vec<VisualizationEvent>,
    pub path: Vec<Position>,
    pub nodes_expanded: usize,
    /// Edges, not cells.
    pub path_length: usize,
    /// Wall-clock time of search plus path reconstruction.
    pub compute_ms: f64,
    pub scores: ScoreTable,
    pub heuristic_weight: f64,
}

impl RunResult {
    pub fn frames(&self) -> usize {
        self.events.len()
    }

    pub fn found_path(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Runs the requested algorithm to completion.
pub fn run(request: &SearchRequest) -> RunResult {
    let grid = &request.grid;
    let searcher = request.algorithm.searcher(request.params);

    let started = Instant::now();
    let outcome = searcher.search(grid, grid.start, grid.goal);
    let elapsed = started.elapsed();

    let result = RunResult {
        algorithm: request.algorithm,
        path_length: path_length(&outcome.path),
        events: outcome.events,
        path: outcome.path,
        nodes_expanded: outcome.nodes_expanded,
        compute_ms: elapsed.as_secs_f64() * 1000.0,
        scores: outcome.scores,
        heuristic_weight: request.params.weight,
    };

    info!(
        "{}: expanded {} nodes, path length {}, {} frames in {:.3}ms",
        result.algorithm,
        result.nodes_expanded,
        result.path_length,
        result.frames(),
        result.compute_ms
    );
    result
}

/// Runs every algorithm against the same grid.
pub fn run_all_algorithms(grid: &Grid, params: SearchParams) -> Vec<(RunResult, Statistics)> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let request = SearchRequest::new(grid.clone(), algorithm, params);
            let result = run(&request);
            let statistics = Statistics::from_run(&result, grid);
            (result, statistics)
        })
        .collect()
}

pub fn print_comparison_results(results: &[(RunResult, Statistics)]) {
    println!("\n=== ALGORITHM COMPARISON RESULTS ===");
    println!();

    println!(
        "{:<10} {:<8} {:<10} {:<8} {:<8} {:<8} {:<12} {:<12}",
        "Algorithm", "Success", "Expanded", "Length", "Optimal", "Frames", "Efficiency", "Compute"
    );
    println!("{}", "-".repeat(82));

    for (result, stats) in results {
        let success_str = if result.found_path() { "✓" } else { "✗" };
        let optimal_str = stats
            .optimal_path_length
            .map_or_else(|| "-".to_string(), |len| len.to_string());
        println!(
            "{:<10} {:<8} {:<10} {:<8} {:<8} {:<8} {:<12} {:<12}",
            result.algorithm.name(),
            success_str,
            result.nodes_expanded,
            result.path_length,
            optimal_str,
            result.frames(),
            format!("{:.3}", stats.route_efficiency),
            format!("{:.3}ms", result.compute_ms)
        );
    }
}

/// A configured grid plus the settings used to search and display it.
pub struct Simulation {
    pub grid: Grid,
    config: Config,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        let grid = Self::build_grid(&config, config.seed);
        Simulation { grid, config }
    }

    /// Builds the configured grid and fills it with random walls. A missing
    /// seed draws one from entropy.
    pub fn build_grid(config: &Config, seed: Option<u64>) -> Grid {
        let (cols, rows) = config.dimensions();
        let mut grid = Grid::new(cols, rows).with_endpoints(config.start(), config.goal());

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        grid.randomize_walls(&mut rng, config.wall_density);
        debug!(
            "Generated {}x{} grid with {} walls (density {}, seed {:?})",
            cols,
            rows,
            grid.wall_count(),
            config.wall_density,
            seed
        );
        grid
    }

    /// Searches once with the configured algorithm and reports the result.
    pub fn run(&self) -> anyhow::Result<RunResult> {
        let algorithm = self.config.algorithm()?;
        let request = SearchRequest::new(self.grid.clone(), algorithm, self.config.search_params());
        let result = run(&request);

        if self.config.json {
            let json = serde_json::to_string_pretty(&result)
                .context("Failed to serialize run result")?;
            println!("{}", json);
            return Ok(result);
        }

        self.play(&result);

        let statistics = Statistics::from_run(&result, &self.grid);
        println!("\n=== FINAL RESULTS ===");
        println!("{}", statistics);

        if self.config.show_scores && !result.scores.is_empty() {
            println!("=== SCORES ===");
            print!("{}", render_score_overlay(&result));
            println!("{}", inspect(&result, Some(self.grid.goal)));
        }
        Ok(result)
    }

    /// Runs every algorithm on the grid. With `--json` the results are printed
    /// as one array, otherwise as the comparison table.
    pub fn compare(&self) -> anyhow::Result<Vec<(RunResult, Statistics)>> {
        let results = run_all_algorithms(&self.grid, self.config.search_params());

        if self.config.json {
            let runs: Vec<&RunResult> = results.iter().map(|(result, _)| result).collect();
            let json = serde_json::to_string_pretty(&runs)
                .context("Failed to serialize comparison results")?;
            println!("{}", json);
            return Ok(results);
        }

        if !self.config.quiet {
            print!("{}", self.grid.render(|_| None));
        }
        print_comparison_results(&results);
        Ok(results)
    }

    /// Animates the event sequence in the terminal, or prints only the final
    /// frame when visualization is off.
    fn play(&self, result: &RunResult) {
        let mut playback = Playback::new(&result.events);
        if self.config.no_visualization || self.config.quiet {
            playback.finish();
            if !self.config.quiet {
                print!("{}", playback.render(&self.grid));
            }
            return;
        }

        let delay = Duration::from_millis(self.config.delay_ms);
        while playback.advance().is_some() {
            // Clear screen and move cursor home.
            print!("\x1B[2J\x1B[1;1H");
            println!(
                "Algorithm: {}  Frame {}/{}",
                result.algorithm,
                playback.frames_applied(),
                playback.total_frames()
            );
            print!("{}", playback.render(&self.grid));
            thread::sleep(delay);
        }
    }
}
