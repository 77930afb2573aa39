use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::playback::PlaybackState;
use crate::tui::theme::Theme;

pub const KEY_HINTS: &str = "space play/pause  ←/→ step  home/end  r restart  p params  q quit";

pub fn render_status_bar(frame: &mut Frame, area: Rect, source: &str, state: PlaybackState, frames: usize) {
    let version = env!("CARGO_PKG_VERSION");
    let left_text = format!(" trajscope v{} | {} ", version, source);
    let state_text = format!(" {} ", state.play.label());
    let right_text = format!(" frame {}/{} ", state.frame_index + 1, frames);

    let used = left_text.chars().count() + state_text.chars().count() + right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(left_text, Theme::status_bar()),
        Span::styled(state_text, Theme::play_state(state.play)),
        Span::styled(" ".repeat(padding), Theme::status_bar()),
        Span::styled(right_text, Theme::status_bar()),
    ]);

    frame.render_widget(line, area);
}

pub fn render_key_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(Line::from(Span::styled(format!(" {}", KEY_HINTS), Theme::hint())), area);
}
