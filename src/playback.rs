use crate::algorithms::common::{EventKind, VisualizationEvent};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;

/// Replays a recorded event sequence one frame at a time.
///
/// The canvas holds the latest event kind applied to each cell, which is
/// what a renderer paints. Path events come last in every run, so the final
/// frame shows the path over the explored area.
pub struct Playback<'a> {
    events: &'a [VisualizationEvent],
    position: usize,
    running: bool,
    canvas: FxHashMap<Position, EventKind>,
}

impl<'a> Playback<'a> {
    pub fn new(events: &'a [VisualizationEvent]) -> Self {
        Playback {
            events,
            position: 0,
            running: true,
            canvas: FxHashMap::default(),
        }
    }

    /// Applies the next frame regardless of the pause state.
    pub fn step(&mut self) -> Option<&'a VisualizationEvent> {
        let event = self.events.get(self.position)?;
        self.position += 1;
        self.canvas.insert(event.cell, event.kind);
        Some(event)
    }

    /// Applies the next frame only while running. Playback stops itself
    /// once the last frame is out.
    pub fn advance(&mut self) -> Option<&'a VisualizationEvent> {
        if !self.running {
            return None;
        }
        let event = self.step();
        if self.is_finished() {
            self.running = false;
        }
        event
    }

    /// Applies every remaining frame.
    pub fn finish(&mut self) {
        while self.step().is_some() {}
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = !self.is_finished();
    }

    /// Rewinds to the first frame and clears the canvas.
    pub fn reset(&mut self) {
        self.position = 0;
        self.canvas.clear();
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.events.len()
    }

    pub fn frames_applied(&self) -> usize {
        self.position
    }

    pub fn total_frames(&self) -> usize {
        self.events.len()
    }

    pub fn state_of(&self, cell: Position) -> Option<EventKind> {
        self.canvas.get(&cell).copied()
    }

    pub fn render(&self, grid: &Grid) -> String {
        grid.render(|cell| {
            self.state_of(cell).map(|kind| match kind {
                EventKind::Frontier => 'o',
                EventKind::Visited => '*',
                EventKind::Path => '@',
            })
        })
    }
}
