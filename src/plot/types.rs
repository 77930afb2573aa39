//! Drawable frame description shared by the segment renderer and the display surfaces.

use serde::{Deserialize, Serialize};

use crate::data::store::{AxisLimits, Bounds};
use crate::plot::ramp::RampColor;

/// Raster image dimensions (pixels).
pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;
/// Trail line width in pixels.
pub const TRAIL_WIDTH: u32 = 3;
/// Point marker radius in pixels.
pub const MARKER_SIZE: u32 = 2;
/// Marker color (RGB).
pub const MARKER_COLOR: (u8, u8, u8) = (243, 70, 70);

/// Which time span the trail colors are normalised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    /// First to last time of the visible trail.
    #[default]
    Window,
    /// First to last time of the whole trajectory.
    Session,
}

/// How axis extents are derived from the load-time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisRounding {
    #[default]
    Ceil,
    Even,
}

impl AxisRounding {
    pub fn limits(self, bounds: &Bounds) -> AxisLimits {
        match self {
            AxisRounding::Ceil => bounds.ceil_limits(),
            AxisRounding::Even => bounds.even_limits(),
        }
    }
}

/// Per-session framing: fixed for the whole animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Framing {
    pub limits: AxisLimits,
    pub x_label: String,
    pub y_label: String,
    pub color_scale: ColorScale,
    /// Full time span of the trajectory, used by `ColorScale::Session`.
    pub t_span: (f64, f64),
}

/// One colored piece of the trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: RampColor,
}

/// Everything a display surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub frame_index: usize,
    /// Time of the current frame.
    pub time: f64,
    pub segments: Vec<Segment>,
    pub markers: Vec<(f64, f64)>,
    pub limits: AxisLimits,
    pub x_label: String,
    pub y_label: String,
}

/// A rasterized frame.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub frame_index: usize,
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
