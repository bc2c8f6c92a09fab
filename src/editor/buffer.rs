use ropey::Rope;

use super::LineEditor;

/// A rope-backed input line with submission history.
///
/// The buffer usually holds a single line but may contain literal newlines
/// while multiline insert mode is in use; submission normalizes those away.
pub struct LineBuffer {
    rope: Rope,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
    draft: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            draft: String::new(),
        }
    }

    /// All submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.rope.len_chars();
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor for LineBuffer {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.rope.insert(self.cursor, text);
        self.cursor += text.chars().count();
    }

    fn delete(&mut self, offset: isize) {
        if offset == 0 {
            return;
        }
        let count = offset.unsigned_abs();
        if offset < 0 {
            let start = self.cursor.saturating_sub(count);
            self.rope.remove(start..self.cursor);
            self.cursor = start;
        } else {
            let end = (self.cursor + count).min(self.rope.len_chars());
            self.rope.remove(self.cursor..end);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let pos = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor + delta.unsigned_abs()
        };
        self.move_to(pos);
    }

    fn move_to(&mut self, pos: usize) {
        self.cursor = pos.min(self.rope.len_chars());
    }

    fn take_line(&mut self) -> String {
        let line = self.rope.to_string();
        self.clear();
        line
    }

    fn clear(&mut self) {
        self.rope = Rope::new();
        self.cursor = 0;
        self.history_index = None;
        self.draft.clear();
    }

    fn push_history(&mut self, line: String) {
        if self.history.last() != Some(&line) {
            self.history.push(line);
        }
    }

    fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next_index = match self.history_index {
            None => {
                self.draft = self.rope.to_string();
                self.history.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_index = Some(next_index);
        let entry = self.history[next_index].clone();
        self.set_text(&entry);
    }

    fn history_next(&mut self) {
        let Some(index) = self.history_index else {
            return;
        };
        if index + 1 < self.history.len() {
            self.history_index = Some(index + 1);
            let entry = self.history[index + 1].clone();
            self.set_text(&entry);
        } else {
            self.history_index = None;
            let draft = std::mem::take(&mut self.draft);
            self.set_text(&draft);
        }
    }
}
