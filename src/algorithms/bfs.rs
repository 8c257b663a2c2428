use crate::algorithms::common::{SearchAlgorithm, SearchTrace};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Breadth-first search with a plain FIFO queue. Each cell is enqueued at
/// most once, on first discovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn explore(&self, grid: &Grid, goal: Position, trace: &mut SearchTrace) {
        let mut discovered = FxHashSet::default();
        discovered.insert(trace.start);
        let mut queue = VecDeque::from([trace.start]);

        while let Some(current) = queue.pop_front() {
            if trace.expand(current, goal) {
                break;
            }
            for (next, _) in grid.neighbors(current) {
                if discovered.insert(next) {
                    trace.discover(next, current);
                    queue.push_back(next);
                }
            }
        }
    }
}
