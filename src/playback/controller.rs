use log::debug;

use crate::data::Trajectory;
use crate::plot::ramp::ColorRamp;
use crate::plot::render::render;
use crate::plot::types::{AxisRounding, ColorScale, Framing, RenderCommand};
use crate::plot::window::Window;

/// Default trail length in samples.
pub const DEFAULT_TRAIL_LENGTH: usize = 59;
/// Default scrub tolerance as a fraction of the time span.
pub const DEFAULT_SCRUB_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

impl PlayState {
    pub fn toggled(self) -> Self {
        match self {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        }
    }

    pub fn is_playing(self) -> bool {
        self == PlayState::Playing
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayState::Playing => "▶ Playing",
            PlayState::Paused => "⏸ Paused",
        }
    }
}

/// The machine's whole mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub frame_index: usize,
    pub play: PlayState,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            frame_index: 0,
            play: PlayState::Playing,
        }
    }
}

/// Settings fixed for the lifetime of a controller.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    pub trail_length: usize,
    /// Fraction of the time span within which a scrub value matches a sample.
    pub scrub_tolerance: f64,
    pub color_scale: ColorScale,
    pub axis_rounding: AxisRounding,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            trail_length: DEFAULT_TRAIL_LENGTH,
            scrub_tolerance: DEFAULT_SCRUB_TOLERANCE,
            color_scale: ColorScale::default(),
            axis_rounding: AxisRounding::default(),
        }
    }
}

/// What the host must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Redraw {
    pub command: RenderCommand,
    /// Value to push into the scrub control, tagged programmatic by the caller.
    pub scrub_sync: Option<f64>,
}

/// First index whose time lies within `tolerance` of `value`, or 0.
pub fn closest_index(times: &[f64], value: f64, tolerance: f64) -> usize {
    times
        .iter()
        .position(|&t| (t - value).abs() <= tolerance)
        .unwrap_or(0)
}

/// Scrub match tolerance: `fraction` of the time span, capped below half the
/// smallest sample spacing so an exact sample time always matches itself.
pub fn match_tolerance(times: &[f64], fraction: f64) -> f64 {
    let span = match (times.first(), times.last()) {
        (Some(first), Some(last)) => last - first,
        _ => return 0.0,
    };
    let tolerance = fraction.max(0.0) * span;
    let min_spacing = times
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    if min_spacing.is_finite() {
        tolerance.min(0.5 * min_spacing * (1.0 - f64::EPSILON))
    } else {
        tolerance
    }
}

/// Owns the trajectory and the playback state; the only writer of either.
pub struct PlaybackController {
    trajectory: Trajectory,
    ramp: ColorRamp,
    framing: Framing,
    trail_length: usize,
    tolerance: f64,
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new(trajectory: Trajectory, options: &PlaybackOptions) -> Self {
        let keys = trajectory.keys();
        let framing = Framing {
            limits: options.axis_rounding.limits(trajectory.bounds()),
            x_label: keys.a.clone(),
            y_label: keys.b.clone(),
            color_scale: options.color_scale,
            t_span: (trajectory.t_min(), trajectory.t_max()),
        };
        let tolerance = match_tolerance(trajectory.times(), options.scrub_tolerance);
        Self {
            trajectory,
            ramp: ColorRamp::build(),
            framing,
            trail_length: options.trail_length.max(1),
            tolerance,
            state: PlaybackState::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Back to the initial state: frame 0, playing.
    pub fn reset(&mut self) {
        self.state = PlaybackState::default();
    }

    pub fn framing(&self) -> &Framing {
        &self.framing
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    /// Time of the current frame.
    pub fn current_time(&self) -> f64 {
        self.trajectory.times()[self.state.frame_index]
    }

    /// Drawable for the current frame.
    pub fn current(&self) -> RenderCommand {
        let window = Window::extract(&self.trajectory, self.state.frame_index, self.trail_length);
        render(&window, &self.ramp, &self.framing)
    }

    /// Fixed-rate clock tick. No-op while paused or once the last frame is
    /// reached; the machine stays `Playing` at the end.
    pub fn on_tick(&mut self) -> Option<Redraw> {
        if !self.state.play.is_playing() {
            return None;
        }
        let next = (self.state.frame_index + 1).min(self.trajectory.last_index());
        if next == self.state.frame_index {
            return None;
        }
        self.state.frame_index = next;
        Some(Redraw {
            command: self.current(),
            scrub_sync: Some(self.current_time()),
        })
    }

    /// User seek to a continuous time. Play state is left as is; the scrub
    /// control is pulled back to the time of the frame actually shown.
    pub fn on_scrub(&mut self, value: f64) -> Redraw {
        let index = closest_index(self.trajectory.times(), value, self.tolerance);
        debug!("scrub to t={:.3} -> frame {}", value, index);
        self.state.frame_index = index;
        Redraw {
            command: self.current(),
            scrub_sync: Some(self.current_time()),
        }
    }

    /// Flip between playing and paused; returns the new state.
    pub fn on_toggle(&mut self) -> PlayState {
        self.state.play = self.state.play.toggled();
        debug!("toggle -> {:?} at frame {}", self.state.play, self.state.frame_index);
        self.state.play
    }
}
