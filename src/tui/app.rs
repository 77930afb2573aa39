use std::path::Path;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use log::debug;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;
use ratatui_image::picker::Picker;

use crate::data::Trajectory;
use crate::persistence::config::Config;
use crate::playback::{Clock, Session, SessionEvent};
use crate::tui::event::is_quit;
use crate::tui::plot_view::PlotView;
use crate::tui::scrub::render_scrub_bar;
use crate::tui::status::{render_key_hints, render_status_bar};
use crate::tui::theme::Theme;

/// Width of the parameters side panel.
const PARAMS_WIDTH: u16 = 28;

pub struct App {
    pub session: Session,
    pub config: Config,
    pub should_quit: bool,
    pub show_params: bool,
    source: String,
    view: PlotView,
    /// Inner area of the scrub bar at the last draw, for mouse hit-testing.
    scrub_area: Rect,
    dragging: bool,
}

impl App {
    pub fn new(trajectory: Trajectory, source: &Path, picker: Option<Picker>, config: Config, now: Instant) -> Self {
        let session = Session::start(
            trajectory,
            &config.playback_options(),
            Clock::new(config.tick_interval()),
            now,
        );
        let source = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());
        Self {
            session,
            view: PlotView::new(picker, config.frame_cache),
            config,
            should_quit: false,
            show_params: true,
            source,
            scrub_area: Rect::default(),
            dragging: false,
        }
    }

    /// Handle a key event. Returns true if the screen should be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if is_quit(&key) {
            self.should_quit = true;
            return true;
        }

        let event = match key.code {
            KeyCode::Char(' ') => Some(SessionEvent::Toggle),
            KeyCode::Left => self.session.scrub_mut().step(-1),
            KeyCode::Right => self.session.scrub_mut().step(1),
            KeyCode::PageUp => self.session.scrub_mut().step(-10),
            KeyCode::PageDown => self.session.scrub_mut().step(10),
            KeyCode::Home => self.session.scrub_mut().jump_start(),
            KeyCode::End => self.session.scrub_mut().jump_end(),
            KeyCode::Char('r') => {
                self.session.restart(now);
                return true;
            }
            KeyCode::Char('p') => {
                self.show_params = !self.show_params;
                return true;
            }
            _ => None,
        };

        match event {
            Some(event) => {
                self.session.push(event);
                self.session.drain(now);
                true
            }
            None => false,
        }
    }

    /// Mouse press or drag on the scrub bar seeks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let inside = self.scrub_area.contains(Position::new(mouse.column, mouse.row));
        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.dragging = true;
                self.scrub_at(mouse.column)
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => self.scrub_at(mouse.column),
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                None
            }
            _ => None,
        };
        match event {
            Some(event) => {
                self.session.push(event);
                self.session.drain(now);
                true
            }
            None => false,
        }
    }

    fn scrub_at(&mut self, column: u16) -> Option<SessionEvent> {
        let area = self.scrub_area;
        let offset = column.saturating_sub(area.x);
        self.session.scrub_mut().click(offset, area.width)
    }

    /// Let the clock fire if due and run queued events. Returns true if the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.poll_clock(now);
        self.session.drain(now)
    }

    pub fn on_resize(&mut self) {
        debug!("resize");
        self.session.refresh();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::vertical([
            Constraint::Min(6),    // Plot + params
            Constraint::Length(3), // Scrub bar
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

        let main = if self.show_params {
            Layout::horizontal([Constraint::Min(20), Constraint::Length(PARAMS_WIDTH)]).split(rows[0])
        } else {
            Layout::horizontal([Constraint::Min(20)]).split(rows[0])
        };

        self.view.render(frame, main[0], self.session.frame());
        if self.show_params {
            self.render_params(frame, main[1]);
        }

        self.scrub_area = render_scrub_bar(frame, rows[1], self.session.scrub(), self.dragging);
        render_status_bar(
            frame,
            rows[2],
            &self.source,
            self.session.state(),
            self.session.trajectory().len(),
        );
        render_key_hints(frame, rows[3]);
    }

    /// Simulation parameters from the input file, shown as-is.
    fn render_params(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Parameters ", Theme::panel_title()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let trajectory = self.session.trajectory();
        let mut items: Vec<ListItem> = trajectory
            .params()
            .iter()
            .take(inner.height.saturating_sub(3) as usize)
            .map(|(key, value)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<8}", key), Theme::param_key()),
                    Span::styled(value.to_string(), Theme::param_value()),
                ]))
            })
            .collect();

        items.push(ListItem::new(Line::raw("")));
        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{:<8}", "samples"), Theme::param_key()),
            Span::styled(trajectory.len().to_string(), Theme::param_value()),
        ])));
        items.push(ListItem::new(Line::from(vec![
            Span::styled(format!("{:<8}", "trail"), Theme::param_key()),
            Span::styled(self.session.controller().trail_length().to_string(), Theme::param_value()),
        ])));

        frame.render_widget(List::new(items), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{PlayState, PlaybackState};
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use std::time::Duration;

    fn app() -> (App, Instant) {
        let content = r#"{"params": {"r": 1.0, "c": 1.0},
            "data": {"times": [0, 1, 2, 3, 4, 5], "wages": [3.0, 3.2, 3.1, 2.8, 2.6, 2.9],
                     "outputs": [4.4, 4.0, 3.5, 3.6, 4.1, 4.6]}}"#;
        let trajectory = Trajectory::from_json(content, &Default::default()).unwrap();
        let now = Instant::now();
        let config = Config { trail_length: 3, ..Config::default() };
        (App::new(trajectory, &PathBuf::from("/tmp/run.json"), None, config, now), now)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_space_toggles() {
        let (mut app, now) = app();
        app.handle_key(key(KeyCode::Char(' ')), now);
        assert_eq!(app.session.state().play, PlayState::Paused);
        app.handle_key(key(KeyCode::Char(' ')), now);
        assert_eq!(app.session.state(), PlaybackState::default());
    }

    #[test]
    fn test_arrows_step_frames() {
        let (mut app, now) = app();
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Right), now);
        assert_eq!(app.session.state().frame_index, 2);
        app.handle_key(key(KeyCode::Left), now);
        assert_eq!(app.session.state().frame_index, 1);
        app.handle_key(key(KeyCode::End), now);
        assert_eq!(app.session.state().frame_index, 5);
        assert_eq!(app.session.state().play, PlayState::Playing);
    }

    #[test]
    fn test_clock_drives_frames() {
        let (mut app, now) = app();
        assert!(app.tick(now + Duration::from_millis(10)));
        assert_eq!(app.session.state().frame_index, 1);
        assert_eq!(app.session.scrub().value(), 1.0);
        assert!(!app.tick(now + Duration::from_millis(11)));
    }

    #[test]
    fn test_restart_key() {
        let (mut app, now) = app();
        app.handle_key(key(KeyCode::End), now);
        app.handle_key(key(KeyCode::Char(' ')), now);
        app.handle_key(key(KeyCode::Char('r')), now);
        assert_eq!(app.session.state(), PlaybackState::default());
    }

    #[test]
    fn test_quit() {
        let (mut app, now) = app();
        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_and_click_scrub_bar() {
        let (mut app, now) = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let area = app.scrub_area;
        assert!(area.width > 2);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + area.width - 1,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        };
        assert!(app.handle_mouse(click, now));
        assert_eq!(app.session.state().frame_index, 5);

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("run.json"));
        assert!(text.contains("Parameters"));
    }

    #[test]
    fn test_click_outside_scrub_bar_ignored() {
        let (mut app, now) = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        assert!(!app.handle_mouse(click, now));
        assert_eq!(app.session.state().frame_index, 0);
    }
}
