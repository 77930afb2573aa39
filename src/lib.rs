pub mod cli;
pub mod data;
pub mod persistence;
pub mod playback;
pub mod plot;
pub mod tui;
