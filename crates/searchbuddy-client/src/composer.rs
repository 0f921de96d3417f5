//! Editable text buffer.
//!
//! The cursor counts characters, not bytes, so multi-byte input never splits
//! a code point.

/// A single edit applied to a [`Composer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert a character at the cursor.
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character at the cursor.
    Delete,
    /// Move the cursor one character left.
    Left,
    /// Move the cursor one character right.
    Right,
    /// Move the cursor to the start.
    Home,
    /// Move the cursor to the end.
    End,
    /// Replace the whole buffer, cursor at the end.
    Replace(String),
    /// Empty the buffer.
    Clear,
}

/// Text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    buffer: String,
    /// Cursor position in characters, `0..=char_count`.
    cursor: usize,
}

impl Composer {
    /// Create an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True if the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Apply one edit.
    pub fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::Insert(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            Edit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            Edit::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            Edit::Left => self.cursor = self.cursor.saturating_sub(1),
            Edit::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            Edit::Home => self.cursor = 0,
            Edit::End => self.cursor = self.char_count(),
            Edit::Replace(text) => {
                self.buffer = text;
                self.cursor = self.char_count();
            },
            Edit::Clear => {
                self.buffer.clear();
                self.cursor = 0;
            },
        }
    }

    /// Take the text, leaving the composer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> Composer {
        let mut composer = Composer::new();
        for c in text.chars() {
            composer.apply(Edit::Insert(c));
        }
        composer
    }

    #[test]
    fn insert_appends_at_cursor() {
        let composer = typed("hi");
        assert_eq!(composer.text(), "hi");
        assert_eq!(composer.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut composer = typed("ab");
        composer.apply(Edit::Backspace);
        assert_eq!(composer.text(), "a");
        assert_eq!(composer.cursor(), 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut composer = typed("ab");
        composer.apply(Edit::Home);
        composer.apply(Edit::Backspace);
        assert_eq!(composer.text(), "ab");
    }

    #[test]
    fn cursor_movement() {
        let mut composer = typed("abc");

        composer.apply(Edit::Home);
        assert_eq!(composer.cursor(), 0);

        composer.apply(Edit::End);
        assert_eq!(composer.cursor(), 3);

        composer.apply(Edit::Left);
        assert_eq!(composer.cursor(), 2);

        composer.apply(Edit::Right);
        composer.apply(Edit::Right);
        assert_eq!(composer.cursor(), 3);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut composer = typed("ac");
        composer.apply(Edit::Left);
        composer.apply(Edit::Insert('b'));
        assert_eq!(composer.text(), "abc");
    }

    #[test]
    fn multibyte_chars_are_edited_whole() {
        let mut composer = typed("né😀");
        composer.apply(Edit::Left);
        composer.apply(Edit::Backspace);
        assert_eq!(composer.text(), "n😀");

        composer.apply(Edit::Delete);
        assert_eq!(composer.text(), "n");
    }

    #[test]
    fn replace_moves_cursor_to_end() {
        let mut composer = typed("old");
        composer.apply(Edit::Replace("brand new".into()));
        assert_eq!(composer.text(), "brand new");
        assert_eq!(composer.cursor(), 9);
    }

    #[test]
    fn take_empties_buffer() {
        let mut composer = typed("hello");
        assert_eq!(composer.take(), "hello");
        assert_eq!(composer.text(), "");
        assert_eq!(composer.cursor(), 0);
    }

    #[test]
    fn whitespace_is_blank() {
        assert!(typed("  \t").is_blank());
        assert!(!typed(" x ").is_blank());
    }
}
