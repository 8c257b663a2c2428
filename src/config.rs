use crate::algorithms::{Algorithm, ParseAlgorithmError, SearchParams};
use crate::grid::Position;
use clap::Parser;

pub const MIN_COLS: usize = 5;
pub const MAX_COLS: usize = 80;
pub const MIN_ROWS: usize = 5;
pub const MAX_ROWS: usize = 60;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 40)]
    pub cols: usize,

    #[arg(long, default_value_t = 24)]
    pub rows: usize,

    #[arg(long, default_value_t = 2)]
    pub start_x: usize,

    #[arg(long, default_value_t = 2)]
    pub start_y: usize,

    #[arg(long, default_value_t = 30)]
    pub goal_x: usize,

    #[arg(long, default_value_t = 18)]
    pub goal_y: usize,

    /// bfs, dijkstra, astar, greedy, or all
    #[arg(long, default_value = "astar")]
    pub algorithm: String,

    #[arg(long, default_value_t = 1.0)]
    pub heuristic_weight: f64,

    #[arg(long, default_value_t = 0.0)]
    pub turn_penalty: f64,

    /// Probability that a cell becomes a wall
    #[arg(long, default_value_t = 0.25)]
    pub wall_density: f64,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 20)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Print the g/h/f table after an A* or greedy run
    #[arg(long, default_value_t = false)]
    pub show_scores: bool,

    /// Print the run result as JSON instead of animating it
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 100)]
    pub num_simulations: usize,

    #[arg(long, default_value = "batch_results.csv")]
    pub output_file: String,
}

impl Config {
    pub fn runs_all(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("all")
    }

    pub fn algorithm(&self) -> Result<Algorithm, ParseAlgorithmError> {
        self.algorithm.parse()
    }

    /// Negative knobs are treated as zero.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            weight: self.heuristic_weight.max(0.0),
            turn_penalty: self.turn_penalty.max(0.0),
        }
    }

    /// Grid size clamped to the supported range.
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.cols.clamp(MIN_COLS, MAX_COLS),
            self.rows.clamp(MIN_ROWS, MAX_ROWS),
        )
    }

    pub fn start(&self) -> Position {
        self.clamp_to_grid(self.start_x, self.start_y)
    }

    pub fn goal(&self) -> Position {
        self.clamp_to_grid(self.goal_x, self.goal_y)
    }

    fn clamp_to_grid(&self, x: usize, y: usize) -> Position {
        let (cols, rows) = self.dimensions();
        Position::new(x.min(cols - 1), y.min(rows - 1))
    }
}
