//! Terminal User Interface
//!
//! Cluster dashboard and simulated shell, drawn with ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::Pod;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the simulator
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub info: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            info: Color::Blue,
            muted: Color::DarkGray,
            border: Color::DarkGray,
        }
    }
}

/// Green for ready pods, red for everything else
pub fn pod_color(pod: &Pod) -> Color {
    if pod.ready {
        Color::Green
    } else {
        Color::Red
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Key bindings shown in the header
pub const CONTROLS: &str = " [F1] Hint  [↑/↓] History  [Esc] Quit ";

/// Header, content, progress bar
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Dashboard + terminal
            Constraint::Length(4),   // Scenario progress
        ])
        .split(area)
        .to_vec()
}

/// Dashboard on the left, terminal on the right
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(67),
        ])
        .split(area)
        .to_vec()
}

/// Overview, pod list and (optionally) the hint
pub fn create_side_layout(area: Rect, show_hint: bool) -> Vec<Rect> {
    let hint_height = if show_hint { 6 } else { 0 };
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(hint_height),
        ])
        .split(area)
        .to_vec()
}
