use ratatui::layout::Rect;
use ratatui::text::Span;
use std::cmp;

/// Terminal cells taken by `s`; wide chars such as CJK take two
fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    display_width(c.encode_utf8(&mut buf))
}

/// Text buffer behind the title, body and task inputs.
///
/// `cursor_col` counts chars, never bytes. `scroll_col` counts terminal cells.
#[derive(Debug, Clone)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub scroll_offset: usize, // first visible line
    pub scroll_col: usize,    // first visible cell
    multi_line: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::single_line()
    }
}

impl Editor {
    pub fn single_line() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll_offset: 0,
            scroll_col: 0,
            multi_line: false,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            multi_line: true,
            ..Self::single_line()
        }
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Cells between the start of the cursor line and the cursor
    fn cursor_x(&self) -> usize {
        let line = self.lines.get(self.cursor_line).map(String::as_str).unwrap_or("");
        let col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        display_width(&line[..Self::byte_index(line, col)])
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        if let Some(line) = self.lines.get_mut(self.cursor_line) {
            let idx = Self::byte_index(line, col);
            line.insert(idx, ch);
            self.cursor_col = col + 1;
        }
    }

    /// Split the current line at the cursor. Ignored by single-line editors.
    pub fn insert_newline(&mut self) {
        if !self.multi_line {
            return;
        }
        let col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        let Some(line) = self.lines.get_mut(self.cursor_line) else {
            return;
        };
        let idx = Self::byte_index(line, col);
        let rest = line.split_off(idx);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Backspace: remove the char before the cursor, joining lines at column 0
    pub fn delete_char(&mut self) {
        let col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        if col > 0 {
            if let Some(line) = self.lines.get_mut(self.cursor_line) {
                let idx = Self::byte_index(line, col - 1);
                line.remove(idx);
                self.cursor_col = col - 1;
            }
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
        }
    }

    /// Delete key: remove the char under the cursor
    pub fn delete_forward(&mut self) {
        let len = self.line_len(self.cursor_line);
        let col = cmp::min(self.cursor_col, len);
        if col < len {
            if let Some(line) = self.lines.get_mut(self.cursor_line) {
                let idx = Self::byte_index(line, col);
                line.remove(idx);
            }
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col = cmp::min(self.cursor_col, self.line_len(self.cursor_line)) - 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = cmp::min(self.cursor_col, self.line_len(self.cursor_line));
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_line);
    }

    pub fn clear(&mut self) {
        *self = if self.multi_line {
            Self::multi_line()
        } else {
            Self::single_line()
        };
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Scroll so the cursor stays inside a viewport of the given inner size
    pub fn update_scroll(&mut self, viewport_height: usize, viewport_width: usize) {
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if viewport_height > 0 && self.cursor_line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor_line + 1 - viewport_height;
        }

        let x = self.cursor_x();
        if x < self.scroll_col {
            self.scroll_col = x;
        } else if viewport_width > 0 && x >= self.scroll_col + viewport_width {
            self.scroll_col = x + 1 - viewport_width;
        }
    }

    /// Lines currently inside the viewport, clipped horizontally.
    /// A wide char cut by the left edge shows as padding.
    pub fn visible_lines(&self, viewport_height: usize, viewport_width: usize) -> Vec<String> {
        self.lines
            .iter()
            .skip(self.scroll_offset)
            .take(viewport_height)
            .map(|line| self.clip_line(line, viewport_width))
            .collect()
    }

    fn clip_line(&self, line: &str, viewport_width: usize) -> String {
        let mut out = String::new();
        let mut start = 0;
        for c in line.chars() {
            let width = char_width(c);
            let end = start + width;
            if end > self.scroll_col {
                if start < self.scroll_col {
                    out.push_str(&" ".repeat(end - self.scroll_col));
                } else if end - self.scroll_col <= viewport_width {
                    out.push(c);
                } else {
                    break;
                }
            }
            start = end;
        }
        out
    }

    /// Screen position of the cursor inside `inner` (the area within borders)
    pub fn cursor_screen_pos(&self, inner: Rect) -> Option<(u16, u16)> {
        let row = self.cursor_line.checked_sub(self.scroll_offset)?;
        let col = self.cursor_x().checked_sub(self.scroll_col)?;
        if row >= inner.height as usize || col >= inner.width as usize {
            return None;
        }
        Some((inner.x + col as u16, inner.y + row as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(editor: &mut Editor, s: &str) {
        for ch in s.chars() {
            editor.insert_char(ch);
        }
    }

    #[test]
    fn typing_builds_text() {
        let mut editor = Editor::multi_line();
        typed(&mut editor, "It\nrained.");
        assert_eq!(editor.text(), "It\nrained.");
        assert_eq!(editor.cursor_line, 1);
        assert_eq!(editor.cursor_col, 7);
    }

    #[test]
    fn single_line_ignores_newlines() {
        let mut editor = Editor::single_line();
        typed(&mut editor, "Day\n1");
        assert_eq!(editor.text(), "Day1");
        assert_eq!(editor.lines.len(), 1);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut editor = Editor::multi_line();
        typed(&mut editor, "ab\ncd");
        editor.move_cursor_home();
        editor.delete_char();
        assert_eq!(editor.text(), "abcd");
        assert_eq!((editor.cursor_line, editor.cursor_col), (0, 2));
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut editor = Editor::single_line();
        typed(&mut editor, "héllo");
        editor.move_cursor_left();
        editor.move_cursor_left();
        editor.move_cursor_left();
        editor.delete_char();
        assert_eq!(editor.text(), "hllo");
        editor.delete_forward();
        assert_eq!(editor.text(), "hlo");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut editor = Editor::multi_line();
        typed(&mut editor, "long line\nab");
        editor.move_cursor_up();
        editor.move_cursor_end();
        editor.move_cursor_down();
        assert_eq!(editor.cursor_col, 2);
    }

    #[test]
    fn clear_keeps_mode() {
        let mut editor = Editor::multi_line();
        typed(&mut editor, "x\ny");
        editor.clear();
        assert!(editor.is_empty());
        editor.insert_newline();
        assert_eq!(editor.lines.len(), 2);
        assert_eq!(editor.cursor_line, 0);
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut editor = Editor::multi_line();
        typed(&mut editor, "1\n2\n3\n4\n5");
        editor.update_scroll(2, 10);
        assert_eq!(editor.scroll_offset, 3);
        assert_eq!(editor.visible_lines(2, 10), vec!["4".to_string(), "5".to_string()]);

        let inner = Rect::new(10, 5, 10, 2);
        assert_eq!(editor.cursor_screen_pos(inner), Some((11, 6)));
    }

    #[test]
    fn horizontal_scroll_clips_lines() {
        let mut editor = Editor::single_line();
        typed(&mut editor, "abcdefgh");
        editor.update_scroll(1, 4);
        assert_eq!(editor.scroll_col, 5);
        assert_eq!(editor.visible_lines(1, 4), vec!["fgh".to_string()]);
    }

    #[test]
    fn cursor_counts_wide_chars_as_two_cells() {
        let mut editor = Editor::single_line();
        typed(&mut editor, "日本a");
        editor.update_scroll(1, 20);
        assert_eq!(editor.cursor_screen_pos(Rect::new(0, 0, 20, 1)), Some((5, 0)));

        editor.move_cursor_left();
        assert_eq!(editor.cursor_screen_pos(Rect::new(0, 0, 20, 1)), Some((4, 0)));
    }

    #[test]
    fn wide_char_cut_by_scroll_is_padded() {
        let mut editor = Editor::single_line();
        typed(&mut editor, "日本語");
        editor.update_scroll(1, 4);
        assert_eq!(editor.scroll_col, 3);
        assert_eq!(editor.visible_lines(1, 4), vec![" 語".to_string()]);
        assert_eq!(editor.cursor_screen_pos(Rect::new(0, 0, 4, 1)), Some((3, 0)));
    }
}
