use ratatui::style::{Color, Modifier, Style};

use crate::playback::PlayState;

pub struct Theme;

impl Theme {
    pub fn status_bar() -> Style {
        Style::default()
            .fg(Color::Reset)
            .bg(Color::DarkGray)
    }

    pub fn play_state(state: PlayState) -> Style {
        let fg = match state {
            PlayState::Playing => Color::Green,
            PlayState::Paused => Color::Yellow,
        };
        Self::status_bar().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn panel_title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn axis_label() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn param_key() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn param_value() -> Style {
        Style::default()
    }

    pub fn scrub_bar() -> Style {
        Style::default().fg(Color::Cyan).bg(Color::Black)
    }

    pub fn scrub_label() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
