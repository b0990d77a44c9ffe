//! Scroll operations: region scrolls, line feed, carriage return,
//! backspace, reverse index.

use super::row::EolTag;
use super::Grid;

impl Grid {
    /// Moves the caret down one line, scrolling at the region bottom.
    pub fn linefeed(&mut self) {
        self.cursor.input_needs_wrap = false;
        if self.cursor.row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor.row + 1 < self.lines {
            self.cursor.row += 1;
        }
    }

    pub fn carriage_return(&mut self) {
        self.cursor.col = 0;
        self.cursor.input_needs_wrap = false;
    }

    /// Moves the caret one column left.
    ///
    /// At column 0, steps back onto the previous line when that line
    /// wrapped into this one.
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            self.cursor.input_needs_wrap = false;
        } else if self.cursor.row > 0 && self.rows[self.cursor.row - 1].eol == EolTag::Continue {
            let row = self.cursor.row;
            self.cursor.row = row - 1;
            self.cursor.col = self.cols.saturating_sub(1);
            self.cursor.input_needs_wrap = false;
            self.dirty.mark_row(row - 1);
            self.dirty.mark_row(row);
        }
    }

    /// Moves the caret up one line, scrolling down at the region top.
    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.scroll_top {
            self.scroll_down(1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    pub fn scroll_up(&mut self, count: usize) {
        self.scroll_up_in_region(self.scroll_top, self.scroll_bottom, count);
    }

    pub fn scroll_down(&mut self, count: usize) {
        self.scroll_down_in_region(self.scroll_top, self.scroll_bottom, count);
    }

    pub(super) fn scroll_up_in_region(&mut self, top: usize, bottom: usize, count: usize) {
        if top > bottom || bottom >= self.lines {
            return;
        }
        let count = count.min(bottom - top + 1);

        for _ in 0..count {
            // Remove the top row; all higher indices shift down by one.
            let scrolled_row = self.rows.remove(top);

            // Rows leaving the top of a full-window region are history.
            if top == 0 && self.scrollback_enabled && self.max_scrollback > 0 {
                if self.scrollback.len() >= self.max_scrollback {
                    self.scrollback.pop_front();
                }
                self.scrollback.push_back(scrolled_row);
            }

            let fresh = self.fresh_row();
            self.rows.insert(bottom, fresh);
        }
        self.dirty.mark_range(top, bottom);
    }

    pub(super) fn scroll_down_in_region(&mut self, top: usize, bottom: usize, count: usize) {
        if top > bottom || bottom >= self.lines {
            return;
        }
        let count = count.min(bottom - top + 1);

        for _ in 0..count {
            self.rows.remove(bottom);
            let fresh = self.fresh_row();
            self.rows.insert(top, fresh);
        }
        self.dirty.mark_range(top, bottom);
    }
}
