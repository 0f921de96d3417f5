//! Chatroom list
//!
//! Displays discovered chatrooms with a cursor on the selected one.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use searchbuddy_client::Chatroom;

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";
const BORDER_SIZE: u16 = 2;

/// Render the chatroom list.
pub fn render(frame: &mut Frame, chatrooms: &[Chatroom], selected: usize, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Chatrooms ");

    if chatrooms.is_empty() {
        let empty = ListItem::new(Line::from(Span::styled(
            "No chatrooms found. Esc to search again.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(List::new(vec![empty]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = chatrooms
        .iter()
        .enumerate()
        .map(|(index, chatroom)| {
            let (prefix, style) = if index == selected {
                (SELECTED_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else if chatroom.online {
                (UNSELECTED_PREFIX, Style::default())
            } else {
                (UNSELECTED_PREFIX, Style::default().fg(Color::DarkGray))
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    format!("Chatroom {} - {} users", chatroom.term, chatroom.num_users),
                    style,
                ),
            ]))
        })
        .collect();

    // Scroll so the cursor stays on screen.
    let visible_height = usize::from(area.height.saturating_sub(BORDER_SIZE)).max(1);
    let skip = selected.saturating_sub(visible_height - 1);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
