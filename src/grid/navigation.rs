//! Cursor movement and tab navigation.

use super::Grid;

/// Which tab stops `CSI g` clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabClearMode {
    /// The stop at the caret column.
    Current,
    /// Every stop.
    All,
}

impl Grid {
    /// Moves the caret to an absolute position, clamped to the window.
    pub fn goto(&mut self, row: usize, col: usize) {
        self.cursor.row = row.min(self.lines.saturating_sub(1));
        self.cursor.col = col.min(self.cols.saturating_sub(1));
        self.cursor.input_needs_wrap = false;
    }

    pub fn goto_line(&mut self, row: usize) {
        self.cursor.row = row.min(self.lines.saturating_sub(1));
        self.cursor.input_needs_wrap = false;
    }

    pub fn goto_col(&mut self, col: usize) {
        self.cursor.col = col.min(self.cols.saturating_sub(1));
        self.cursor.input_needs_wrap = false;
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor.row = self.cursor.row.saturating_sub(n);
        self.cursor.input_needs_wrap = false;
    }

    pub fn move_down(&mut self, n: usize) {
        self.cursor.row = (self.cursor.row + n).min(self.lines.saturating_sub(1));
        self.cursor.input_needs_wrap = false;
    }

    pub fn move_forward(&mut self, n: usize) {
        self.cursor.col = (self.cursor.col + n).min(self.cols.saturating_sub(1));
        self.cursor.input_needs_wrap = false;
    }

    pub fn move_backward(&mut self, n: usize) {
        self.cursor.col = self.cursor.col.saturating_sub(n);
        self.cursor.input_needs_wrap = false;
    }

    /// Advances the caret through `count` tab stops.
    pub fn advance_tab(&mut self, count: usize) {
        for _ in 0..count {
            let next = self.tab_stops.next_stop(self.cursor.col, self.cols);
            self.cursor.col = next;
        }
    }

    /// Moves the caret back through `count` tab stops.
    pub fn backward_tab(&mut self, count: usize) {
        for _ in 0..count {
            if self.cursor.col == 0 {
                break;
            }
            self.cursor.col = self.tab_stops.prev_stop(self.cursor.col);
        }
    }

    /// Clears tab stops (`CSI g`).
    pub fn clear_tab_stops(&mut self, mode: TabClearMode) {
        match mode {
            TabClearMode::Current => {
                let col = self.cursor.col;
                self.tab_stops.clear(col);
            }
            TabClearMode::All => self.tab_stops.clear_all(),
        }
    }
}
