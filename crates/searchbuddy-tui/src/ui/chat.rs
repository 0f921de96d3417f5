//! Chat area
//!
//! Displays the log of the current chatroom session.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use searchbuddy_client::{Session, SessionState};

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render(frame: &mut Frame, session: &Session, area: Rect) {
    let title = format!(" {} ", session.chatroom().term);
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if matches!(session.state(), SessionState::Connecting) {
        vec![ListItem::new(Line::from(Span::styled(
            "Connecting...",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        session.log().iter().map(|line| ListItem::new(Line::raw(line.as_str()))).collect()
    };

    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE));
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
