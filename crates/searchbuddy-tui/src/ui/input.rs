//! Input line
//!
//! Displays the search box or the message composer, with cursor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use searchbuddy_app::{App, AppState};
use searchbuddy_client::Composer;

const PROMPT_WIDTH: u16 = 3; // border + "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (title, composer) = match app.state() {
        AppState::Searching => (" Search ", Some(app.search())),
        AppState::InRoom { session, .. } => (" Message ", Some(session.composer())),
        AppState::ChoosingRoom { .. } => (" Up/Down to choose, Enter to join ", None),
        AppState::Failed { .. } => ("", None),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(composer) = composer else {
        frame.render_widget(block, area);
        return;
    };

    let paragraph = Paragraph::new(format!("> {}", composer.text()))
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(paragraph, area);

    set_cursor(frame, composer, area);
}

fn set_cursor(frame: &mut Frame, composer: &Composer, area: Rect) {
    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor = u16::try_from(composer.cursor()).unwrap_or(u16::MAX);
    let cursor_offset = cursor.min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);

    frame.set_cursor_position((cursor_x.min(max_x), cursor_y));
}
