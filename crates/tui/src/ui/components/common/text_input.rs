//! UTF-8 safe single-line text input with cursor management.
//!
//! Used by the argument form and the upload path field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns between the start of the input and the cursor.
    pub fn cursor_columns(&self) -> u16 {
        u16::try_from(self.input[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    pub fn set_input<S: Into<String>>(&mut self, s: S) {
        self.input = s.into();
        self.cursor = self.input.len().min(self.cursor);
    }

    /// Clamp to the end of the buffer; `usize::MAX` places the cursor last.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.input.len());
        while !self.input.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    /// Return the buffer and reset to empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.input)
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                let before = self.input.len();
                self.backspace();
                before != self.input.len()
            }
            KeyCode::Delete => {
                let before = self.input.len();
                self.delete();
                before != self.input.len()
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.input.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::new();
        st.set_input("Grüße");
        st.set_cursor(2); // after "Gr"
        st.insert_char('x');
        assert_eq!(st.input(), "Grxüße");
        st.move_right(); // step over ü
        st.backspace(); // delete ü
        assert_eq!(st.input(), "Grxße");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "Gxße");
    }

    #[test]
    fn cursor_is_clamped_to_char_boundaries() {
        let mut st = TextInputState::new();
        st.set_input("ä");
        st.set_cursor(1);
        assert_eq!(st.cursor(), 0);
        st.set_cursor(usize::MAX);
        assert_eq!(st.cursor(), 2);
        assert_eq!(st.cursor_columns(), 1);
    }

    #[test]
    fn handle_key_reports_text_changes() {
        let mut st = TextInputState::new();
        assert!(st.handle_key(&KeyEvent::new(KeyCode::Char('ß'), KeyModifiers::SHIFT)));
        assert!(!st.handle_key(&KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!st.handle_key(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
        assert!(!st.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(st.handle_key(&KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)));
        assert_eq!(st.input(), "");
    }

    #[test]
    fn delete_and_take() {
        let mut st = TextInputState::new();
        st.set_input("/tmp/a.pdf");
        st.move_home();
        st.delete();
        assert_eq!(st.input(), "tmp/a.pdf");
        st.move_end();
        assert_eq!(st.take(), "tmp/a.pdf");
        assert_eq!(st.input(), "");
        assert_eq!(st.cursor(), 0);
    }
}
