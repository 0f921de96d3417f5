//! Terminal-agnostic keyboard input.

use searchbuddy_client::Edit;

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key.
    Tab,
    /// Escape key (back out, or quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
    /// Clear the whole input line (Ctrl+U).
    ClearLine,
}

impl KeyInput {
    /// Text edit this key performs on an input box. `None` for keys that
    /// are not edits.
    pub fn edit(self) -> Option<Edit> {
        match self {
            Self::Char(c) => Some(Edit::Insert(c)),
            Self::Backspace => Some(Edit::Backspace),
            Self::Delete => Some(Edit::Delete),
            Self::Left => Some(Edit::Left),
            Self::Right => Some(Edit::Right),
            Self::Home => Some(Edit::Home),
            Self::End => Some(Edit::End),
            Self::ClearLine => Some(Edit::Clear),
            Self::Enter | Self::Tab | Self::Esc | Self::Up | Self::Down => None,
        }
    }
}
