use ropey::Rope;

/// Cursor position in a [`TextArea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in chars.
    pub col: usize,
    /// Column to aim for when moving vertically.
    sticky_col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

/// Cursor motions understood by [`TextArea::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    PageUp(usize),
    PageDown(usize),
    BufferStart,
    BufferEnd,
}

/// Multi-line markdown editing surface backed by a rope.
///
/// Every mutation bumps [`TextArea::revision`], which lets observers tell
/// whether the text changed without comparing contents.
pub struct TextArea {
    rope: Rope,
    cursor: Cursor,
    scroll: usize,
    revision: u64,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl TextArea {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            scroll: 0,
            revision: 0,
        }
    }

    /// Replace the whole text and move the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::default();
        self.scroll = 0;
        self.revision += 1;
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// First visible line.
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line ending.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Line length in chars, without its line ending.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |line| line.chars().count())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.newline();
            return;
        }
        self.rope.insert_char(self.cursor_char_idx(), ch);
        self.cursor.set_col(self.cursor.col + 1);
        self.revision += 1;
    }

    /// Insert text at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let normalized = text.replace("\r\n", "\n");
        self.rope.insert(self.cursor_char_idx(), &normalized);

        let mut segments = normalized.split('\n');
        let first = segments.next().map_or(0, |s| s.chars().count());
        let rest: Vec<&str> = segments.collect();
        match rest.last() {
            Some(last) => {
                self.cursor.line += rest.len();
                self.cursor.set_col(last.chars().count());
            }
            None => self.cursor.set_col(self.cursor.col + first),
        }
        self.revision += 1;
    }

    pub fn newline(&mut self) {
        self.rope.insert_char(self.cursor_char_idx(), '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.revision += 1;
    }

    /// Delete the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor.line == 0 && self.cursor.col == 0 {
            return false;
        }
        let idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            let remove_from = self.previous_line_break_start(idx);
            self.rope.remove(remove_from..idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.revision += 1;
        true
    }

    /// Delete the char under the cursor, joining lines at line end.
    pub fn delete(&mut self) -> bool {
        let idx = self.cursor_char_idx();
        if idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.rope.char(idx) == '\r'
            && idx + 1 < self.rope.len_chars()
            && self.rope.char(idx + 1) == '\n'
        {
            idx + 2
        } else {
            idx + 1
        };
        self.rope.remove(idx..end);
        self.revision += 1;
        true
    }

    pub fn move_cursor(&mut self, motion: Motion) {
        match motion {
            Motion::Up => self.move_vertical(-1),
            Motion::Down => self.move_vertical(1),
            Motion::PageUp(rows) => self.move_vertical(-isize::try_from(rows).unwrap_or(isize::MAX)),
            Motion::PageDown(rows) => self.move_vertical(isize::try_from(rows).unwrap_or(isize::MAX)),
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::LineStart => self.cursor.set_col(0),
            Motion::LineEnd => self.cursor.set_col(self.line_len(self.cursor.line)),
            Motion::WordLeft => self.move_word_left(),
            Motion::WordRight => self.move_word_right(),
            Motion::BufferStart => self.cursor = Cursor::default(),
            Motion::BufferEnd => {
                let last = self.line_count().saturating_sub(1);
                self.cursor = Cursor::at(last, self.line_len(last));
            }
        }
    }

    /// Adjust the scroll offset so the cursor stays inside `height` rows.
    pub const fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor.line < self.scroll {
            self.scroll = self.cursor.line;
        } else if self.cursor.line >= self.scroll + height {
            self.scroll = self.cursor.line + 1 - height;
        }
    }

    fn cursor_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line) + self.cursor.col.min(self.line_len(line))
    }

    /// Start of the line ending that precedes char index `idx`.
    fn previous_line_break_start(&self, idx: usize) -> usize {
        if idx >= 2 && self.rope.char(idx - 2) == '\r' && self.rope.char(idx - 1) == '\n' {
            idx - 2
        } else {
            idx - 1
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let last = self.line_count().saturating_sub(1);
        let target = self.cursor.line.saturating_add_signed(delta).min(last);
        if target == self.cursor.line {
            return;
        }
        self.cursor.line = target;
        self.cursor.col = self.cursor.sticky_col.min(self.line_len(target));
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            self.move_left();
            return;
        }
        let chars: Vec<char> = self
            .line(self.cursor.line)
            .unwrap_or_default()
            .chars()
            .take(self.cursor.col)
            .collect();
        let mut col = chars.len();
        while col > 0 && !is_word_char(chars[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(chars[col - 1]) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    fn move_word_right(&mut self) {
        let chars: Vec<char> = self
            .line(self.cursor.line)
            .unwrap_or_default()
            .chars()
            .collect();
        if self.cursor.col >= chars.len() {
            self.move_right();
            return;
        }
        let mut col = self.cursor.col;
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        self.cursor.set_col(col);
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

impl std::fmt::Debug for TextArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextArea")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
