//! Cursor-local line manipulation: character writing, erasing, and
//! insertion/deletion primitives.

use crate::cell::CellFlags;

use super::row::EolTag;
use super::Grid;

/// Erase-in-display scope (`CSI J`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// From the cursor to the end of the window.
    Below,
    /// From the top of the window through the cursor.
    Above,
    /// The whole visible window.
    All,
}

/// Erase-in-line scope (`CSI K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEraseMode {
    /// From the cursor to the end of the line.
    Right,
    /// From the start of the line through the cursor.
    Left,
    /// The whole line.
    All,
}

impl Grid {
    /// Writes `c` at the caret and advances it.
    ///
    /// `wrap` enables auto-wrap at the right edge; without it the caret
    /// clamps to the last column and subsequent characters overwrite.
    /// `insert` shifts the rest of the line right first.
    pub fn put_char(&mut self, c: char, wrap: bool, insert: bool) {
        if self.cursor.input_needs_wrap {
            self.wrap_cursor();
        }

        if self.cursor.col >= self.cols {
            self.cursor.col = self.cols.saturating_sub(1);
        }

        if insert {
            self.insert_blank_chars(1);
        }

        let col = self.cursor.col;
        let row = self.cursor.row;

        // Overwriting half of a wide glyph destroys the other half.
        if col > 0 && self.rows[row][col].flags.contains(CellFlags::WIDE_CHAR_SPACER) {
            self.rows[row][col - 1].ch = ' ';
            self.rows[row][col - 1].flags.remove(CellFlags::WIDE_CHAR);
        }
        if self.rows[row][col].flags.contains(CellFlags::WIDE_CHAR) && col + 1 < self.cols {
            self.rows[row][col + 1].ch = ' ';
            self.rows[row][col + 1].flags.remove(CellFlags::WIDE_CHAR_SPACER);
        }

        let template = &self.cursor.template;
        let cell = &mut self.rows[row][col];
        cell.ch = c;
        cell.fg = template.fg;
        cell.bg = template.bg;
        cell.flags = template.flags & !CellFlags::LAYOUT;

        if col >= self.rows[row].occ {
            self.rows[row].occ = col + 1;
        }
        self.dirty.mark_row(row);

        if self.cursor.col + 1 >= self.cols {
            if wrap {
                self.cursor.input_needs_wrap = true;
            }
        } else {
            self.cursor.col += 1;
        }
    }

    /// Writes a two-column glyph at the caret.
    pub fn put_wide_char(&mut self, c: char, wrap: bool, insert: bool) {
        if self.cursor.input_needs_wrap {
            self.wrap_cursor();
        }

        if self.cols < 2 {
            return;
        }

        // A wide glyph cannot straddle the right edge.
        if self.cursor.col + 1 >= self.cols {
            if wrap {
                let row = self.cursor.row;
                self.rows[row].occ = self.rows[row].occ.max(self.cursor.col + 1);
                self.wrap_cursor();
            } else {
                self.cursor.col = self.cols - 2;
            }
        }

        if insert {
            self.insert_blank_chars(2);
        }

        let col = self.cursor.col;
        let row = self.cursor.row;
        let template = self.cursor.template.clone();

        let cell = &mut self.rows[row][col];
        cell.ch = c;
        cell.fg = template.fg;
        cell.bg = template.bg;
        cell.flags = (template.flags & !CellFlags::LAYOUT) | CellFlags::WIDE_CHAR;

        let spacer = &mut self.rows[row][col + 1];
        spacer.ch = ' ';
        spacer.fg = template.fg;
        spacer.bg = template.bg;
        spacer.flags = CellFlags::WIDE_CHAR_SPACER;

        self.rows[row].occ = self.rows[row].occ.max(col + 2);
        self.dirty.mark_row(row);

        if col + 2 >= self.cols {
            self.cursor.col = self.cols - 1;
            if wrap {
                self.cursor.input_needs_wrap = true;
            }
        } else {
            self.cursor.col = col + 2;
        }
    }

    /// Resolves a pending wrap: tags the current line as continued and
    /// moves the caret to column 0 of the next line.
    pub(super) fn wrap_cursor(&mut self) {
        let row = self.cursor.row;
        self.rows[row].eol = EolTag::Continue;
        self.dirty.mark_row(row);

        self.cursor.col = 0;
        self.cursor.input_needs_wrap = false;

        if self.cursor.row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor.row + 1 < self.lines {
            self.cursor.row += 1;
        }
    }

    /// Erases part of the visible window, filling with the template.
    pub fn erase_display(&mut self, mode: EraseMode) {
        let template = self.cursor.template.clone();
        match mode {
            EraseMode::Below => {
                let row = self.cursor.row;
                let col = self.cursor.col;
                for c in col..self.cols {
                    self.rows[row][c].reset(&template);
                }
                for r in (row + 1)..self.lines {
                    self.rows[r].reset(&template);
                }
                self.dirty.mark_range(row, self.lines.saturating_sub(1));
            }
            EraseMode::Above => {
                let row = self.cursor.row;
                let col = self.cursor.col;
                for r in 0..row {
                    self.rows[r].reset(&template);
                }
                for c in 0..=col.min(self.cols.saturating_sub(1)) {
                    self.rows[row][c].reset(&template);
                }
                self.dirty.mark_range(0, row);
            }
            EraseMode::All => {
                for r in 0..self.lines {
                    self.rows[r].reset(&template);
                }
                self.dirty.mark_all();
            }
        }
    }

    /// Erases part of the caret line.
    pub fn erase_line(&mut self, mode: LineEraseMode) {
        let template = self.cursor.template.clone();
        let row = self.cursor.row;
        let col = self.cursor.col;
        match mode {
            LineEraseMode::Right => {
                for c in col..self.cols {
                    self.rows[row][c].reset(&template);
                }
            }
            LineEraseMode::Left => {
                for c in 0..=col.min(self.cols.saturating_sub(1)) {
                    self.rows[row][c].reset(&template);
                }
            }
            LineEraseMode::All => {
                self.rows[row].reset(&template);
            }
        }
        self.dirty.mark_row(row);
    }

    /// Erases `count` characters at the caret without moving it.
    pub fn erase_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let template = self.cursor.template.clone();
        let end = (col + count).min(self.cols);
        for c in col..end {
            self.rows[row][c].reset(&template);
        }
        self.dirty.mark_row(row);
    }

    /// Inserts `count` blank cells at the caret, shifting the rest right.
    pub fn insert_blank_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let count = count.min(self.cols.saturating_sub(col));
        if count == 0 {
            return;
        }

        for c in (col + count..self.cols).rev() {
            self.rows[row][c] = self.rows[row][c - count].clone();
        }
        let template = self.cursor.template.clone();
        for c in col..(col + count).min(self.cols) {
            self.rows[row][c].reset(&template);
        }
        self.rows[row].occ = self.rows[row].occ.saturating_add(count).min(self.cols);
        self.dirty.mark_row(row);
    }

    /// Deletes `count` characters at the caret, shifting the rest left.
    pub fn delete_chars(&mut self, count: usize) {
        let row = self.cursor.row;
        let col = self.cursor.col;
        let count = count.min(self.cols.saturating_sub(col));
        if count == 0 {
            return;
        }

        for c in col..(self.cols - count) {
            self.rows[row][c] = self.rows[row][c + count].clone();
        }
        let template = self.cursor.template.clone();
        for c in (self.cols - count)..self.cols {
            self.rows[row][c].reset(&template);
        }
        self.dirty.mark_row(row);
    }

    /// Inserts `count` blank lines at the caret row inside the region.
    pub fn insert_lines(&mut self, count: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_down_in_region(row, self.scroll_bottom, count);
    }

    /// Deletes `count` lines at the caret row inside the region.
    pub fn delete_lines(&mut self, count: usize) {
        let row = self.cursor.row;
        if row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.scroll_up_in_region(row, self.scroll_bottom, count);
    }
}
