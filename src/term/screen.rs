//! Screen-buffer manager: alternate-buffer snapshots, per-buffer saved
//! cursors, and the DECSET save/restore buffer-mode flag.

use crate::cell::Cell;
use crate::grid::{Cursor, Grid, Row};

/// Bookkeeping for main/alternate buffer switching (DECSET 47, 1047,
/// 1048, 1049).
///
/// The alternate buffer is modeled as a snapshot: entering application
/// mode clones the visible window; leaving re-expands the snapshot to
/// the current width and puts it back line for line.
#[derive(Debug, Default)]
pub struct ScreenBuffer {
    /// Visible-window snapshot taken when entering the alternate buffer.
    saved_lines: Option<Vec<Row>>,
    /// Saved cursors, one per buffer (index 1 = alternate).
    saved_cursors: [Option<Cursor>; 2],
    /// Buffer mode stored by `CSI ? 47 s` for a later `CSI ? 47 r`.
    saved_is_alternate: bool,
}

impl ScreenBuffer {
    /// Saves the cursor for the given buffer (DECSC, DECSET 1048).
    pub fn save_cursor(&mut self, cursor: &Cursor, alternate: bool) {
        self.saved_cursors[usize::from(alternate)] = Some(cursor.clone());
    }

    /// Restores the saved cursor for the given buffer, clamped to the
    /// current window. Missing saves leave the cursor untouched.
    pub fn restore_cursor(&mut self, grid: &mut Grid, alternate: bool) {
        if let Some(saved) = self.saved_cursors[usize::from(alternate)].clone() {
            grid.cursor = saved;
            grid.cursor.row = grid.cursor.row.min(grid.lines.saturating_sub(1));
            grid.cursor.col = grid.cursor.col.min(grid.cols.saturating_sub(1));
            grid.cursor.input_needs_wrap = false;
        }
    }

    /// Enters the alternate buffer: snapshots the visible window and
    /// suspends scrollback retention.
    pub fn enter_alternate(&mut self, grid: &mut Grid) {
        self.saved_lines = Some(grid.visible_rows().to_vec());
        grid.scrollback_enabled = false;
        grid.dirty_mut().mark_all();
    }

    /// Leaves the alternate buffer: restores the snapshot (re-expanded
    /// to the current width) or, with no snapshot, clears the window.
    pub fn leave_alternate(&mut self, grid: &mut Grid) {
        grid.scrollback_enabled = true;
        match self.saved_lines.take() {
            Some(rows) => {
                for (line, mut saved) in rows.into_iter().enumerate() {
                    if line >= grid.lines {
                        break;
                    }
                    saved.resize(grid.cols);
                    *grid.row_mut(line) = saved;
                }
                self.trim_blank_tail(grid);
            }
            None => {
                // No snapshot: this is a brand-new blank buffer.
                let template = Cell::default();
                for line in 0..grid.lines {
                    grid.row_mut(line).reset(&template);
                }
            }
        }
        grid.dirty_mut().mark_all();
    }

    /// Resets trailing all-blank lines to fresh state after a restore.
    fn trim_blank_tail(&self, grid: &mut Grid) {
        let template = Cell::default();
        for line in (0..grid.lines).rev() {
            if !grid.row(line).is_blank() {
                break;
            }
            grid.row_mut(line).reset(&template);
        }
    }

    /// Stores the current buffer mode (`CSI ? 47 s`).
    pub fn save_buffer_mode(&mut self, alternate: bool) {
        self.saved_is_alternate = alternate;
    }

    /// The stored buffer mode (`CSI ? 47 r`).
    pub fn saved_buffer_mode(&self) -> bool {
        self.saved_is_alternate
    }

    /// Drops all saved state (full reset).
    pub fn reset(&mut self) {
        self.saved_lines = None;
        self.saved_cursors = [None, None];
        self.saved_is_alternate = false;
    }
}
