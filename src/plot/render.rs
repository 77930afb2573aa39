//! Segment renderer: trailing window → colored line segments + point markers.

use crate::plot::ramp::ColorRamp;
use crate::plot::types::{ColorScale, Framing, RenderCommand, Segment};
use crate::plot::window::Window;

/// Build the drawable for one frame. Pure: the window, ramp and framing are
/// only read.
///
/// Each segment joins two consecutive trail points and takes the color of
/// its later endpoint's time. Every point also gets a marker.
pub fn render(window: &Window<'_>, ramp: &ColorRamp, framing: &Framing) -> RenderCommand {
    let times = window.times();
    let points: Vec<(f64, f64)> = window.points().collect();

    let (tmin, tmax) = match framing.color_scale {
        ColorScale::Window => match (times.first(), times.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => framing.t_span,
        },
        ColorScale::Session => framing.t_span,
    };

    let segments = points
        .windows(2)
        .zip(times.iter().skip(1))
        .map(|(pair, &t)| Segment {
            from: pair[0],
            to: pair[1],
            color: ramp.color_at(t, tmin, tmax),
        })
        .collect();

    let head = window.head();
    RenderCommand {
        frame_index: head,
        time: window.trajectory().times()[head],
        segments,
        markers: points,
        limits: framing.limits,
        x_label: framing.x_label.clone(),
        y_label: framing.y_label.clone(),
    }
}
