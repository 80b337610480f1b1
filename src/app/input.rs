//! Single-line message entry with a character cursor

/// Editable input line.
///
/// The cursor counts characters, not bytes, so multi-byte input (emoji,
/// accented letters) edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    value: String,
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Text before and after the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_offset(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing() {
        let mut input = InputLine::new();
        for c in "helo".chars() {
            input.insert(c);
        }
        input.move_left();
        input.insert('l');
        assert_eq!(input.value(), "hello");
        assert_eq!(input.cursor(), 4);

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "hell");

        input.move_home();
        input.delete();
        assert_eq!(input.value(), "ell");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = InputLine::new().with_value("hi ✨");
        assert_eq!(input.cursor(), 4);
        input.backspace();
        assert_eq!(input.value(), "hi ");

        input.insert('💖');
        input.move_left();
        let (before, after) = input.split_at_cursor();
        assert_eq!(before, "hi ");
        assert_eq!(after, "💖");
    }

    #[test]
    fn test_bounds_are_clamped() {
        let mut input = InputLine::new();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
