use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Key consumed, text unchanged (cursor movement or ignored key).
    Moved,
    /// Key consumed and the text changed.
    Edited,
    Submit,
    Cancel,
}

/// Single-line text editor backing the gap, input and dictation answers.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => InputResult::Cancel,
            KeyCode::Enter => InputResult::Submit,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.len());
                InputResult::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputResult::Moved
            }
            KeyCode::End => {
                self.cursor = self.len();
                InputResult::Moved
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.remove_at(self.cursor - 1);
                self.cursor -= 1;
                InputResult::Edited
            }
            KeyCode::Delete if self.cursor < self.len() => {
                self.remove_at(self.cursor);
                InputResult::Edited
            }
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                InputResult::Moved
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.len();
                InputResult::Moved
            }
            KeyCode::Char('u') if ctrl => {
                let changed = !self.text.is_empty();
                self.clear();
                if changed { InputResult::Edited } else { InputResult::Moved }
            }
            KeyCode::Char('w') if ctrl => {
                if self.delete_word_back() {
                    InputResult::Edited
                } else {
                    InputResult::Moved
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
                InputResult::Edited
            }
            _ => InputResult::Moved,
        }
    }

    /// Insert pasted text at the cursor; line breaks become spaces.
    pub fn insert_str(&mut self, text: &str) -> InputResult {
        let flat: String = text
            .chars()
            .filter(|ch| *ch != '\r')
            .map(|ch| if ch == '\n' { ' ' } else { ch })
            .collect();
        if flat.is_empty() {
            return InputResult::Moved;
        }
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert_str(byte_offset, &flat);
        self.cursor += flat.chars().count();
        InputResult::Edited
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn remove_at(&mut self, char_idx: usize) {
        let byte_offset = self.char_to_byte(char_idx);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
        true
    }
}
