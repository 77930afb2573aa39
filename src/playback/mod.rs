//! Playback coordination: the controller state machine, its clock and the
//! session event queue feeding it.

pub mod clock;
pub mod controller;
pub mod session;

pub use clock::Clock;
pub use controller::{closest_index, match_tolerance, PlayState, PlaybackController, PlaybackOptions, PlaybackState, Redraw};
pub use session::{Session, SessionEvent};
