use crate::algorithms::Algorithm;
use crate::grid::Grid;
use crate::simulation::RunResult;
use pathfinding::prelude::bfs;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub algorithm: Algorithm,
    pub nodes_expanded: usize,
    pub path_length: usize,
    pub frames: usize,
    pub compute_ms: f64,
    pub num_walls: usize,
    /// Shortest possible path length, `None` when the goal is unreachable.
    pub optimal_path_length: Option<usize>,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn from_run(result: &RunResult, grid: &Grid) -> Self {
        let mut statistics = Statistics {
            algorithm: result.algorithm,
            nodes_expanded: result.nodes_expanded,
            path_length: result.path_length,
            frames: result.frames(),
            compute_ms: result.compute_ms,
            num_walls: grid.wall_count(),
            optimal_path_length: optimal_path_length(grid),
            route_efficiency: 0.0,
        };
        statistics.calculate_efficiency();
        statistics
    }

    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_path_length {
            Some(optimal) if optimal > 0 && self.path_length > 0 => {
                self.path_length as f64 / optimal as f64
            }
            _ => 0.0,
        };
    }
}

/// Shortest start-to-goal edge count, computed independently of the
/// visualized searches.
pub fn optimal_path_length(grid: &Grid) -> Option<usize> {
    if !grid.is_open(grid.start) || !grid.is_open(grid.goal) {
        return None;
    }
    let path = bfs(
        &grid.start,
        |p| grid.neighbors(*p).into_iter().map(|(next, _)| next),
        |p| *p == grid.goal,
    )?;
    Some(path.len().saturating_sub(1))
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Nodes Expanded: {}", self.nodes_expanded)?;
        writeln!(f, "Path Length: {}", self.path_length)?;
        match self.optimal_path_length {
            Some(optimal) => writeln!(f, "Optimal Path Length: {}", optimal)?,
            None => writeln!(f, "Optimal Path Length: unreachable")?,
        }
        writeln!(f, "Number of Walls: {}", self.num_walls)?;
        writeln!(f, "Frames: {}", self.frames)?;
        writeln!(f, "Compute Time: {:.3}ms", self.compute_ms)?;
        writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency)?;

        if self.route_efficiency > 1.0 {
            let extra = self.path_length.saturating_sub(self.optimal_path_length.unwrap_or(0));
            writeln!(f, "Note: {} extra steps over the shortest path", extra)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::SearchParams;
    use crate::simulation::{run, SearchRequest};

    #[test]
    fn oracle_matches_open_grid() {
        assert_eq!(optimal_path_length(&Grid::new(5, 5)), Some(8));
    }

    #[test]
    fn oracle_reports_unreachable() {
        let grid = Grid::from_ascii("S#G").unwrap();
        assert_eq!(optimal_path_length(&grid), None);
        let mut blocked = Grid::new(3, 3);
        blocked.set_wall(blocked.goal, true);
        assert_eq!(optimal_path_length(&blocked), None);
    }

    #[test]
    fn efficiency_of_detour() {
        let grid = Grid::new(5, 5);
        let result = run(&SearchRequest::new(grid.clone(), Algorithm::Bfs, SearchParams::default()));
        let mut stats = Statistics::from_run(&result, &grid);
        assert_eq!(stats.route_efficiency, 1.0);

        stats.path_length = 10;
        stats.calculate_efficiency();
        assert_eq!(stats.route_efficiency, 1.25);
        assert!(stats.to_string().contains("2 extra steps"));
    }

    #[test]
    fn no_path_means_zero_efficiency() {
        let grid = Grid::from_ascii("S#G").unwrap();
        let result = run(&SearchRequest::new(grid.clone(), Algorithm::Greedy, SearchParams::default()));
        let stats = Statistics::from_run(&result, &grid);
        assert_eq!(stats.route_efficiency, 0.0);
        assert!(stats.to_string().contains("unreachable"));
    }
}
