use crate::algorithms::common::{SearchAlgorithm, SearchTrace};
use crate::algorithms::frontier::MinQueue;
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Dijkstra's algorithm over uniform unit edges.
///
/// A cell is pushed again every time its distance improves; the closed set
/// drops the stale copies when they come out of the queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl SearchAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn explore(&self, grid: &Grid, goal: Position, trace: &mut SearchTrace) {
        let mut dist: FxHashMap<Position, u32> = FxHashMap::default();
        dist.insert(trace.start, 0);
        let mut queue = MinQueue::new();
        queue.push(trace.start);
        let mut closed = FxHashSet::default();

        loop {
            let Some(current) =
                queue.pop_min_by(|cell| dist.get(cell).map_or(f64::INFINITY, |&d| f64::from(d)))
            else {
                break;
            };
            if !closed.insert(current) {
                continue;
            }
            if trace.expand(current, goal) {
                break;
            }

            let Some(&current_dist) = dist.get(&current) else {
                continue;
            };
            let alt = current_dist + 1;
            for (next, _) in grid.neighbors(current) {
                if dist.get(&next).map_or(true, |&d| alt < d) {
                    dist.insert(next, alt);
                    trace.discover(next, current);
                    queue.push(next);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::BreadthFirst;
    use crate::algorithms::common::EventKind;

    #[test]
    fn matches_bfs_length_around_walls() {
        let grid = Grid::from_ascii(
            "
            S........
            .##.#.##.
            .#..#..#.
            .#.##.#..
            ...#....G
            ",
        )
        .unwrap();
        let dijkstra = Dijkstra.search(&grid, grid.start, grid.goal);
        let bfs = BreadthFirst.search(&grid, grid.start, grid.goal);
        assert!(!dijkstra.path.is_empty());
        assert_eq!(dijkstra.path.len(), bfs.path.len());
    }

    #[test]
    fn each_cell_visited_once() {
        let grid = Grid::new(7, 5);
        let outcome = Dijkstra.search(&grid, grid.start, grid.goal);
        let mut visited: Vec<Position> = outcome
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Visited)
            .map(|e| e.cell)
            .collect();
        let total = visited.len();
        visited.sort();
        visited.dedup();
        assert_eq!(visited.len(), total);
        assert_eq!(outcome.nodes_expanded, total + 1);
    }

    #[test]
    fn unreachable_goal_exhausts_frontier() {
        let grid = Grid::from_ascii(
            "
            S.#.
            ..#G
            ",
        )
        .unwrap();
        let outcome = Dijkstra.search(&grid, grid.start, grid.goal);
        assert_eq!(outcome.nodes_expanded, 4);
        assert!(outcome.path.is_empty());
        assert!(outcome.events.iter().all(|e| e.kind != EventKind::Path));
    }
}
