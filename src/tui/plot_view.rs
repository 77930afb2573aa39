//! Display surfaces for a `RenderCommand`: a terminal-graphics image when the
//! terminal supports one, a braille canvas otherwise.

use log::warn;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;

use crate::plot::cache::FrameCache;
use crate::plot::types::{RenderCommand, MARKER_COLOR};
use crate::tui::theme::Theme;

pub struct PlotView {
    picker: Option<Picker>,
    frames: FrameCache,
    /// Image protocol state for the frame currently on screen.
    image_state: Option<(usize, StatefulProtocol)>,
    /// Set after a raster failure; the canvas is used from then on.
    raster_failed: bool,
}

impl PlotView {
    pub fn new(picker: Option<Picker>, cache_capacity: usize) -> Self {
        Self {
            picker,
            frames: FrameCache::new(cache_capacity),
            image_state: None,
            raster_failed: false,
        }
    }

    pub fn uses_images(&self) -> bool {
        self.picker.is_some() && !self.raster_failed
    }

    /// Clear `area` and draw `cmd` into it.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, cmd: &RenderCommand) {
        let (x0, x1) = cmd.limits.x;
        let (y0, y1) = cmd.limits.y;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(
                format!(" {} vs {}  t={:.1} ", cmd.y_label, cmd.x_label, cmd.time),
                Theme::panel_title(),
            ))
            .title_bottom(Line::from(Span::styled(
                format!(" {}: {}..{}   {}: {}..{} ", cmd.x_label, x0, x1, cmd.y_label, y0, y1),
                Theme::axis_label(),
            )));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.uses_images() && self.render_image(frame, inner, cmd) {
            return;
        }
        render_canvas(frame, inner, cmd);
    }

    /// Returns false if the image path is unavailable for this frame.
    fn render_image(&mut self, frame: &mut Frame, area: Rect, cmd: &RenderCommand) -> bool {
        let picker = match &self.picker {
            Some(p) => p,
            None => return false,
        };

        let stale = self
            .image_state
            .as_ref()
            .map_or(true, |(index, _)| *index != cmd.frame_index);
        if stale {
            let rendered = match self.frames.get_or_render(cmd) {
                Ok(r) => r,
                Err(e) => {
                    warn!("raster failed, falling back to canvas: {}", e);
                    self.raster_failed = true;
                    return false;
                }
            };
            match image::load_from_memory(&rendered.png_bytes) {
                Ok(dyn_image) => {
                    let protocol = picker.new_resize_protocol(dyn_image);
                    self.image_state = Some((cmd.frame_index, protocol));
                }
                Err(e) => {
                    let text = format!("[plot decode error: {}]", e);
                    frame.render_widget(Paragraph::new(Span::styled(text, Theme::error())), area);
                    return true;
                }
            }
        }

        if let Some((_, protocol)) = self.image_state.as_mut() {
            let image_widget = StatefulImage::default();
            frame.render_stateful_widget(image_widget, area, protocol);
        }
        true
    }
}

/// Braille canvas rendition, colors taken straight from the ramp.
pub fn render_canvas(frame: &mut Frame, area: Rect, cmd: &RenderCommand) {
    let (r, g, b) = MARKER_COLOR;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([cmd.limits.x.0, cmd.limits.x.1])
        .y_bounds([cmd.limits.y.0, cmd.limits.y.1])
        .paint(|ctx| {
            for seg in &cmd.segments {
                ctx.draw(&CanvasLine {
                    x1: seg.from.0,
                    y1: seg.from.1,
                    x2: seg.to.0,
                    y2: seg.to.1,
                    color: seg.color.into(),
                });
            }
            ctx.draw(&Points {
                coords: &cmd.markers,
                color: Color::Rgb(r, g, b),
            });
        });
    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::AxisLimits;
    use crate::plot::ramp::ColorRamp;
    use crate::plot::types::Segment;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn command() -> RenderCommand {
        let ramp = ColorRamp::build();
        RenderCommand {
            frame_index: 3,
            time: 3.0,
            segments: vec![
                Segment { from: (0.5, 0.5), to: (1.5, 1.0), color: ramp.colors()[0] },
                Segment { from: (1.5, 1.0), to: (3.0, 3.5), color: ramp.colors()[511] },
            ],
            markers: vec![(0.5, 0.5), (1.5, 1.0), (3.0, 3.5)],
            limits: AxisLimits { x: (0.0, 4.0), y: (0.0, 4.0) },
            x_label: "wages".into(),
            y_label: "outputs".into(),
        }
    }

    #[test]
    fn test_canvas_fallback_draws_trail() {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let mut view = PlotView::new(None, 4);
        assert!(!view.uses_images());
        let cmd = command();
        terminal.draw(|f| view.render(f, f.area(), &cmd)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("outputs vs wages"));
        let red = buffer.content().iter().any(|c| c.fg == Color::Rgb(255, 0, 0));
        assert!(red, "newest segment should be drawn in red");
    }

    #[test]
    fn test_canvas_empty_frame() {
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let mut cmd = command();
        cmd.segments.clear();
        cmd.markers.clear();
        terminal.draw(|f| render_canvas(f, f.area(), &cmd)).unwrap();
    }
}
