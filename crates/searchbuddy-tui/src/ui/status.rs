//! Status bar
//!
//! Displays the search indicator, the current screen and key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use searchbuddy_app::{App, AppState, Indicator};
use searchbuddy_client::SessionState;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let indicator = match app.status().indicator() {
        Indicator::Idle => Span::styled("○ idle", Style::default().fg(Color::Gray)),
        Indicator::Pending => Span::styled(
            "● pending",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let (detail, hint) = match app.state() {
        AppState::Searching => (String::new(), "Enter: search  Esc: quit"),
        AppState::ChoosingRoom { chatrooms, .. } => {
            (format!("{} chatrooms", chatrooms.len()), "Enter: join  Esc: back")
        },
        AppState::InRoom { session, .. } => {
            let connection = match session.state() {
                SessionState::Connecting => "connecting",
                SessionState::Active { .. } if session.is_live() => "connected",
                SessionState::Active { .. } | SessionState::Disconnected { .. } => "disconnected",
            };
            (format!("{} {connection}", session.id()), "Enter: send  Esc: leave")
        },
        AppState::Failed { .. } => ("failed".to_owned(), "Esc: quit"),
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        indicator,
        Span::raw(" | "),
        Span::raw(detail),
        Span::styled(format!("  {hint}"), Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
