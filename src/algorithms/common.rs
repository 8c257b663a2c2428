use crate::algorithms::path::{reconstruct_path, Predecessors};
use crate::grid::{Grid, Position};
use log::warn;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[serde(rename = "visit")]
    Visited,
    Frontier,
    Path,
}

/// One animation frame: a cell changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualizationEvent {
    pub kind: EventKind,
    pub cell: Position,
}

/// Cost bookkeeping for a single cell, shown by score overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

/// Latest scores per cell, iterated in (x, y) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable(BTreeMap<Position, Scores>);

impl ScoreTable {
    pub fn record(&mut self, cell: Position, scores: Scores) {
        self.0.insert(cell, scores);
    }

    pub fn get(&self, cell: Position) -> Option<&Scores> {
        self.0.get(&cell)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &Scores)> {
        self.0.iter()
    }
}

// JSON maps need string keys, so the table goes out as a list of entries.
impl Serialize for ScoreTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Entry<'a>(&'a Position, &'a Scores);

        impl Serialize for Entry<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut entry = serializer.serialize_struct("ScoreEntry", 5)?;
                entry.serialize_field("x", &self.0.x)?;
                entry.serialize_field("y", &self.0.y)?;
                entry.serialize_field("g", &self.1.g)?;
                entry.serialize_field("h", &self.1.h)?;
                entry.serialize_field("f", &self.1.f)?;
                entry.end()
            }
        }

        serializer.collect_seq(self.0.iter().map(|(cell, scores)| Entry(cell, scores)))
    }
}

/// What a search produced before timing and packaging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    pub events: Vec<VisualizationEvent>,
    pub path: Vec<Position>,
    pub nodes_expanded: usize,
    pub scores: ScoreTable,
}

/// Mutable state shared by every search loop: the event log, the predecessor
/// map, the expansion counter and the score table.
#[derive(Debug)]
pub struct SearchTrace {
    pub start: Position,
    pub events: Vec<VisualizationEvent>,
    pub predecessors: Predecessors,
    pub nodes_expanded: usize,
    pub scores: ScoreTable,
}

impl SearchTrace {
    pub fn new(start: Position) -> Self {
        let mut predecessors = Predecessors::default();
        predecessors.insert(start, None);
        SearchTrace {
            start,
            events: Vec::new(),
            predecessors,
            nodes_expanded: 0,
            scores: ScoreTable::default(),
        }
    }

    /// Records the expansion of `cell`. The start cell is counted but not
    /// emitted. Returns `true` when `cell` is the goal.
    pub fn expand(&mut self, cell: Position, goal: Position) -> bool {
        if cell != self.start {
            self.push(EventKind::Visited, cell);
        }
        self.nodes_expanded += 1;
        cell == goal
    }

    /// Records that `cell` was (re)discovered through `from`.
    pub fn discover(&mut self, cell: Position, from: Position) {
        self.predecessors.insert(cell, Some(from));
        self.push(EventKind::Frontier, cell);
    }

    fn push(&mut self, kind: EventKind, cell: Position) {
        self.events.push(VisualizationEvent { kind, cell });
    }

    /// Reconstructs the path to `goal` and appends its `Path` events.
    pub fn finish(mut self, goal: Position) -> SearchOutcome {
        let path = reconstruct_path(&self.predecessors, goal);
        for &cell in &path {
            self.push(EventKind::Path, cell);
        }
        SearchOutcome {
            events: self.events,
            path,
            nodes_expanded: self.nodes_expanded,
            scores: self.scores,
        }
    }
}

pub trait SearchAlgorithm {
    fn name(&self) -> &'static str;

    /// Runs the algorithm's main loop, recording everything into `trace`.
    /// Only called with an open start and goal.
    fn explore(&self, grid: &Grid, goal: Position, trace: &mut SearchTrace);

    /// Searches from `start` to `goal`. A blocked (or out-of-bounds) start or
    /// goal gives an empty outcome without touching the frontier.
    fn search(&self, grid: &Grid, start: Position, goal: Position) -> SearchOutcome {
        if !grid.is_open(start) || !grid.is_open(goal) {
            warn!(
                "{}: start {} or goal {} is blocked, skipping search",
                self.name(),
                start,
                goal
            );
            return SearchOutcome::default();
        }
        let mut trace = SearchTrace::new(start);
        self.explore(grid, goal, &mut trace);
        trace.finish(goal)
    }
}
