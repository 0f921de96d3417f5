//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod chat;
mod failed;
mod input;
mod rooms;
mod search;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use searchbuddy_app::{App, AppState};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, app, *main_area);
    input::render(frame, app, *input_area);
    status::render(frame, app, *status_area);
}

/// Render the screen for the current state.
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    match app.state() {
        AppState::Searching => search::render(frame, app.pending_search(), area),
        AppState::ChoosingRoom { chatrooms, selected } => {
            rooms::render(frame, chatrooms, *selected, area);
        },
        AppState::InRoom { session, .. } => chat::render(frame, session, area),
        AppState::Failed { message } => failed::render(frame, message, area),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Cell, layout::Position};
    use searchbuddy_app::{AppEvent, KeyInput};
    use searchbuddy_client::{ChannelEvent, Chatroom, SessionId};

    use super::*;

    const WIDTH: u16 = 40;
    const HEIGHT: u16 = 8;

    fn room(id: i32, term: &str, num_users: u32) -> Chatroom {
        Chatroom {
            chatroom_id: id,
            num_users,
            online: true,
            term: term.into(),
            url: format!("ws://example/chat/{id}"),
        }
    }

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
    }

    fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(usize::from(WIDTH))
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect()
    }

    fn screen(app: &App) -> String {
        rows(&draw(app)).join("\n")
    }

    /// Row contents between the left and right borders, right-trimmed.
    fn inner(row: &str) -> String {
        let chars: Vec<char> = row.chars().collect();
        let inside: String = chars[1..chars.len() - 1].iter().collect();
        inside.trim_end().to_owned()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    fn in_room() -> App {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });
        app.handle(AppEvent::DiscoverySucceeded { chatrooms: vec![room(1, "cats", 3)] });
        app.handle(AppEvent::Key(KeyInput::Enter));
        app
    }

    fn frame(app: &mut App, text: &str) {
        app.handle(AppEvent::Channel {
            session: SessionId::new(1),
            event: ChannelEvent::Frame(text.into()),
        });
    }

    #[test]
    fn search_screen_prompts_and_shows_idle() {
        let app = App::new();
        let screen = screen(&app);

        assert!(screen.contains("Searchbuddy"));
        assert!(screen.contains("idle"));
    }

    #[test]
    fn typing_sets_pending_indicator_and_cursor() {
        let mut app = App::new();
        type_text(&mut app, "cats");

        let mut terminal = draw(&app);
        let screen = rows(&terminal).join("\n");

        assert!(screen.contains("> cats"));
        assert!(screen.contains("pending"));
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(7, 5));
    }

    #[test]
    fn pending_lookup_is_shown() {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });

        assert!(screen(&app).contains("Searching for \"cats\""));
    }

    #[test]
    fn room_list_marks_selection() {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });
        app.handle(AppEvent::DiscoverySucceeded {
            chatrooms: vec![room(1, "cats", 3), room(2, "cat pics", 1)],
        });

        let rows = rows(&draw(&app));
        let list = [inner(&rows[1]), inner(&rows[2])].join("\n");

        insta::assert_snapshot!(list, @r"
        > Chatroom cats - 3 users
          Chatroom cat pics - 1 users
        ");
    }

    #[test]
    fn moving_selection_moves_marker() {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });
        app.handle(AppEvent::DiscoverySucceeded {
            chatrooms: vec![room(1, "cats", 3), room(2, "dogs", 1)],
        });
        app.handle(AppEvent::Key(KeyInput::Down));

        let rows = rows(&draw(&app));

        assert_eq!(inner(&rows[1]), "  Chatroom cats - 3 users");
        assert_eq!(inner(&rows[2]), "> Chatroom dogs - 1 users");
    }

    #[test]
    fn empty_room_list_says_so() {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });
        app.handle(AppEvent::DiscoverySucceeded { chatrooms: Vec::new() });

        assert!(screen(&app).contains("No chatrooms found"));
    }

    #[test]
    fn chat_shows_connecting_then_log() {
        let mut app = in_room();
        assert!(screen(&app).contains("Connecting..."));

        app.handle(AppEvent::Channel { session: SessionId::new(1), event: ChannelEvent::Opened });
        frame(&mut app, r#"{"type":"Joined","chatroom_id":1}"#);
        frame(&mut app, r#"{"type":"NewMessage","content":"meow"}"#);

        let screen = screen(&app);
        assert!(screen.contains("Joined chatroom!"));
        assert!(screen.contains("meow"));
        assert!(screen.contains("connected"));
    }

    #[test]
    fn chat_keeps_latest_lines_in_view() {
        let mut app = in_room();
        app.handle(AppEvent::Channel { session: SessionId::new(1), event: ChannelEvent::Opened });
        for i in 0..10 {
            frame(&mut app, &format!(r#"{{"type":"NewMessage","content":"line {i}"}}"#));
        }

        let rows = rows(&draw(&app));

        assert_eq!(inner(&rows[1]), "line 8");
        assert_eq!(inner(&rows[2]), "line 9");
    }

    #[test]
    fn closed_room_is_marked_disconnected() {
        let mut app = in_room();
        app.handle(AppEvent::Channel { session: SessionId::new(1), event: ChannelEvent::Closed });

        assert!(screen(&app).contains("disconnected"));
    }

    #[test]
    fn failure_shows_static_message() {
        let mut app = App::new();
        app.handle(AppEvent::Search { terms: "cats".into() });
        app.handle(AppEvent::DiscoveryFailed { reason: "timed out".into() });

        let screen = screen(&app);
        assert!(screen.contains("Couldn't communicate"));
        assert!(!screen.contains("timed out"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = in_room();
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
