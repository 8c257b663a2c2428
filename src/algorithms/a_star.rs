use crate::algorithms::common::{SearchAlgorithm, SearchTrace, Scores};
use crate::algorithms::frontier::MinQueue;
use crate::grid::{Direction, Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// How a heuristic search ranks its frontier and prices its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Ranking {
    /// `f = g + weight * h`, edges cost `1 + turn_penalty` on a turn.
    Weighted { weight: f64, turn_penalty: f64 },
    /// `f = h`, every edge costs 1.
    Greedy,
}

impl Ranking {
    fn priority(&self, g: f64, h: f64) -> f64 {
        match *self {
            Ranking::Weighted { weight, .. } => g + weight * h,
            Ranking::Greedy => h,
        }
    }

    fn step_cost(&self, arrived: Option<Direction>, leaving: Direction) -> f64 {
        match *self {
            Ranking::Weighted { turn_penalty, .. } => match arrived {
                Some(direction) if direction != leaving => 1.0 + turn_penalty,
                _ => 1.0,
            },
            Ranking::Greedy => 1.0,
        }
    }
}

/// Weighted A* with a Manhattan heuristic and an optional turn penalty.
///
/// Only the best incoming direction is kept per cell, so the search space is
/// cells rather than (cell, direction) pairs. With a nonzero turn penalty a
/// path that arrives at a cell more expensively but straighter can be lost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AStar {
    pub weight: f64,
    pub turn_penalty: f64,
}

impl AStar {
    pub fn new(weight: f64, turn_penalty: f64) -> Self {
        AStar { weight, turn_penalty }
    }
}

impl Default for AStar {
    fn default() -> Self {
        AStar::new(1.0, 0.0)
    }
}

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn explore(&self, grid: &Grid, goal: Position, trace: &mut SearchTrace) {
        let ranking = Ranking::Weighted {
            weight: self.weight,
            turn_penalty: self.turn_penalty,
        };
        best_first(grid, goal, trace, ranking);
    }
}

/// Greedy best-first search: ranks by the heuristic alone and ignores the
/// cost already paid, so its paths are not guaranteed shortest.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyBestFirst;

impl GreedyBestFirst {
    pub fn new() -> Self {
        GreedyBestFirst
    }
}

impl SearchAlgorithm for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn explore(&self, grid: &Grid, goal: Position, trace: &mut SearchTrace) {
        best_first(grid, goal, trace, Ranking::Greedy);
    }
}

fn heuristic(pos: &Position, goal: &Position) -> f64 {
    pos.manhattan(goal) as f64
}

fn best_first(grid: &Grid, goal: Position, trace: &mut SearchTrace, ranking: Ranking) {
    let start = trace.start;
    let mut g_scores: FxHashMap<Position, f64> = FxHashMap::default();
    let mut arrival: FxHashMap<Position, Direction> = FxHashMap::default();
    g_scores.insert(start, 0.0);

    let h0 = heuristic(&start, &goal);
    trace.scores.record(
        start,
        Scores { g: 0.0, h: h0, f: ranking.priority(0.0, h0) },
    );

    let mut queue = MinQueue::new();
    queue.push(start);
    let mut closed = FxHashSet::default();

    loop {
        let Some(current) = queue.pop_min_by(|cell| {
            let g = g_scores.get(cell).copied().unwrap_or(f64::INFINITY);
            ranking.priority(g, heuristic(cell, &goal))
        }) else {
            break;
        };
        if !closed.insert(current) {
            continue;
        }
        if trace.expand(current, goal) {
            break;
        }

        let Some(&current_g) = g_scores.get(&current) else {
            continue;
        };
        let arrived = arrival.get(&current).copied();
        for (next, direction) in grid.neighbors(current) {
            let tentative_g = current_g + ranking.step_cost(arrived, direction);
            if tentative_g < g_scores.get(&next).copied().unwrap_or(f64::INFINITY) {
                g_scores.insert(next, tentative_g);
                arrival.insert(next, direction);

                let h = heuristic(&next, &goal);
                trace.scores.record(
                    next,
                    Scores { g: tentative_g, h, f: ranking.priority(tentative_g, h) },
                );
                trace.discover(next, current);
                queue.push(next);
            }
        }
    }
}
