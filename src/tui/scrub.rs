use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;

use crate::playback::session::SessionEvent;
use crate::tui::theme::Theme;

/// Who moved the scrub control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubOrigin {
    /// Keyboard or mouse seek; becomes a `Scrub` event.
    User,
    /// Sync from the animation clock; never becomes an event.
    Programmatic,
}

/// Continuous time slider over `[t_min, t_max]`, stepping on the sample grid.
#[derive(Debug, Clone)]
pub struct ScrubControl {
    value: f64,
    grid: Vec<f64>,
    last_origin: ScrubOrigin,
}

impl ScrubControl {
    /// `grid` is the trajectory's (non-empty, increasing) sample times.
    pub fn new(grid: &[f64]) -> Self {
        Self {
            value: grid.first().copied().unwrap_or(0.0),
            grid: grid.to_vec(),
            last_origin: ScrubOrigin::Programmatic,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.grid.first().copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.grid.last().copied().unwrap_or(0.0)
    }

    pub fn last_origin(&self) -> ScrubOrigin {
        self.last_origin
    }

    /// Move the control. Only user moves produce an event.
    pub fn set(&mut self, value: f64, origin: ScrubOrigin) -> Option<SessionEvent> {
        self.value = value.clamp(self.min(), self.max());
        self.last_origin = origin;
        match origin {
            ScrubOrigin::User => Some(SessionEvent::Scrub(self.value)),
            ScrubOrigin::Programmatic => None,
        }
    }

    /// User step by `delta` samples from the sample nearest the current value.
    pub fn step(&mut self, delta: isize) -> Option<SessionEvent> {
        if self.grid.is_empty() {
            return None;
        }
        let last = self.grid.len() - 1;
        let idx = self.nearest_index(self.value) as isize + delta;
        let idx = idx.clamp(0, last as isize) as usize;
        self.set(self.grid[idx], ScrubOrigin::User)
    }

    pub fn jump_start(&mut self) -> Option<SessionEvent> {
        self.set(self.min(), ScrubOrigin::User)
    }

    pub fn jump_end(&mut self) -> Option<SessionEvent> {
        self.set(self.max(), ScrubOrigin::User)
    }

    /// User click at `column` of a bar `width` cells wide; snaps to the grid.
    pub fn click(&mut self, column: u16, width: u16) -> Option<SessionEvent> {
        if width < 2 {
            return None;
        }
        let frac = (column.min(width - 1) as f64) / (width - 1) as f64;
        let raw = self.min() + frac * (self.max() - self.min());
        let snapped = self.snap(raw);
        self.set(snapped, ScrubOrigin::User)
    }

    /// Nearest sample time to `value`.
    pub fn snap(&self, value: f64) -> f64 {
        self.grid.get(self.nearest_index(value)).copied().unwrap_or(value)
    }

    fn nearest_index(&self, value: f64) -> usize {
        let i = self.grid.partition_point(|&t| t < value);
        if i == 0 {
            return 0;
        }
        if i >= self.grid.len() {
            return self.grid.len() - 1;
        }
        if (self.grid[i] - value) < (value - self.grid[i - 1]) {
            i
        } else {
            i - 1
        }
    }

    /// Position of the value along the bar, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let span = self.max() - self.min();
        if span > 0.0 {
            ((self.value - self.min()) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn label(&self) -> String {
        format!("t={:.1}", self.value)
    }
}

/// Draw the scrub bar; returns the inner area used for mouse hit-testing.
pub fn render_scrub_bar(frame: &mut Frame, area: Rect, scrub: &ScrubControl, focused: bool) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { Theme::border_focused() } else { Theme::border() })
        .title(Span::styled(" Time ", Theme::panel_title()));
    let inner = block.inner(area);

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Theme::scrub_bar())
        .ratio(scrub.fraction())
        .label(Span::styled(scrub.label(), Theme::scrub_label()));
    frame.render_widget(gauge, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> ScrubControl {
        ScrubControl::new(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
    }

    #[test]
    fn test_programmatic_set_is_silent() {
        let mut s = control();
        assert_eq!(s.set(3.0, ScrubOrigin::Programmatic), None);
        assert_eq!(s.value(), 3.0);
        assert_eq!(s.last_origin(), ScrubOrigin::Programmatic);
    }

    #[test]
    fn test_user_set_emits_scrub() {
        let mut s = control();
        assert_eq!(s.set(2.5, ScrubOrigin::User), Some(SessionEvent::Scrub(2.5)));
        assert_eq!(s.last_origin(), ScrubOrigin::User);
    }

    #[test]
    fn test_set_clamps() {
        let mut s = control();
        assert_eq!(s.set(99.0, ScrubOrigin::User), Some(SessionEvent::Scrub(5.0)));
        s.set(-1.0, ScrubOrigin::Programmatic);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn test_step_moves_on_grid() {
        let mut s = control();
        assert_eq!(s.step(1), Some(SessionEvent::Scrub(1.0)));
        assert_eq!(s.step(2), Some(SessionEvent::Scrub(3.0)));
        assert_eq!(s.step(-10), Some(SessionEvent::Scrub(0.0)));
        s.set(4.4, ScrubOrigin::Programmatic);
        assert_eq!(s.step(1), Some(SessionEvent::Scrub(5.0)));
    }

    #[test]
    fn test_jumps() {
        let mut s = control();
        assert_eq!(s.jump_end(), Some(SessionEvent::Scrub(5.0)));
        assert_eq!(s.jump_start(), Some(SessionEvent::Scrub(0.0)));
    }

    #[test]
    fn test_click_snaps_to_sample() {
        let mut s = control();
        // 11 columns: column 5 is the middle, t=2.5 snaps down to 2
        assert_eq!(s.click(5, 11), Some(SessionEvent::Scrub(2.0)));
        assert_eq!(s.click(10, 11), Some(SessionEvent::Scrub(5.0)));
        assert_eq!(s.click(40, 11), Some(SessionEvent::Scrub(5.0)));
        assert_eq!(s.click(3, 1), None);
    }

    #[test]
    fn test_label_and_fraction() {
        let mut s = control();
        s.set(1.34, ScrubOrigin::Programmatic);
        assert_eq!(s.label(), "t=1.3");
        assert!((s.fraction() - 0.268).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_grid() {
        let mut s = ScrubControl::new(&[7.0]);
        assert_eq!(s.fraction(), 0.0);
        assert_eq!(s.step(1), Some(SessionEvent::Scrub(7.0)));
    }
}
