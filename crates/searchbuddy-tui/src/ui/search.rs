//! Search screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the search screen, with the lookup in flight if any.
pub fn render(frame: &mut Frame, pending: Option<&str>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Searchbuddy ");

    let lines = match pending {
        Some(terms) => vec![Line::from(Span::styled(
            format!("Searching for \"{terms}\"..."),
            Style::default().fg(Color::Yellow),
        ))],
        None => vec![
            Line::from(Span::styled(
                "Find people searching for the same thing.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Type a search and press Enter.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
