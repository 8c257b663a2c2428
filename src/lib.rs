pub mod algorithms;
pub mod batch_simulation;
pub mod config;
pub mod grid;
pub mod inspector;
pub mod playback;
pub mod simulation;
pub mod statistics;
