//! Single-line edit buffer shared by the text-style controls.
//!
//! Tracks a cursor as a char index so multi-byte input behaves, and
//! renders a windowed view when the content is wider than the field.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let len = self.text.chars().count();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the given char index.
    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_at(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Render the buffer into spans, scrolled so the cursor stays visible
    /// within `width` cells. The cursor cell is reversed when focused.
    pub fn spans(&self, width: usize, focused: bool) -> Line<'static> {
        if width == 0 {
            return Line::from("");
        }
        let chars: Vec<char> = self.text.chars().collect();
        // Keep one cell free so the cursor can sit past the last char.
        let start = if self.cursor >= width {
            self.cursor + 1 - width
        } else {
            0
        };
        let end = (start + width).min(chars.len());
        let visible = &chars[start..end.max(start)];
        let cursor_off = self.cursor - start;

        if !focused {
            return Line::from(visible.iter().collect::<String>());
        }

        let before: String = visible.iter().take(cursor_off).collect();
        let at: String = visible
            .iter()
            .nth(cursor_off)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = visible.iter().skip(cursor_off + 1).collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_cursor_at_end() {
        let buf = LineBuffer::new("abc");
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn inserts_at_cursor() {
        let mut buf = LineBuffer::new("ac");
        buf.left();
        buf.insert('b');
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut buf = LineBuffer::new("abc");
        assert!(buf.backspace());
        assert_eq!(buf.text(), "ab");
        buf.home();
        assert!(!buf.backspace());
    }

    #[test]
    fn delete_removes_at_cursor() {
        let mut buf = LineBuffer::new("abc");
        buf.home();
        assert!(buf.delete());
        assert_eq!(buf.text(), "bc");
        buf.end();
        assert!(!buf.delete());
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut buf = LineBuffer::new("héllo");
        buf.home();
        buf.right();
        buf.right();
        buf.backspace();
        assert_eq!(buf.text(), "hllo");
        buf.insert('é');
        assert_eq!(buf.text(), "héllo");
    }

    #[test]
    fn set_text_clamps_cursor() {
        let mut buf = LineBuffer::new("a long string");
        buf.set_text("ab");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn windowed_rendering_scrolls_to_cursor() {
        let buf = LineBuffer::new("0123456789");
        let line = buf.spans(4, false);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        // Cursor at 10, width 4: window starts at 7.
        assert_eq!(rendered, "789");
    }

    #[test]
    fn focused_rendering_marks_cursor_cell() {
        let mut buf = LineBuffer::new("abc");
        buf.home();
        let line = buf.spans(10, true);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content.as_ref(), "a");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::REVERSED));
    }
}
