use crate::grid::Position;
use rustc_hash::FxHashMap;

/// Maps each discovered cell to the cell it was reached from. The start maps
/// to `None`.
pub type Predecessors = FxHashMap<Position, Option<Position>>;

/// Walks the predecessor chain back from `goal` and returns the path in
/// start-to-goal order. An undiscovered goal yields an empty path.
pub fn reconstruct_path(predecessors: &Predecessors, goal: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(cell) = current {
        let Some(&previous) = predecessors.get(&cell) else {
            break;
        };
        path.push(cell);
        current = previous;
    }
    path.reverse();
    path
}

/// Number of edges in a path.
pub fn path_length(path: &[Position]) -> usize {
    path.len().saturating_sub(1)
}
