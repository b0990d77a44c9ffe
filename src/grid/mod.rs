//! Terminal grid: cell rows, cursor, scroll region, and tab stops.

pub mod cursor;
pub mod dirty;
mod editing;
mod navigation;
pub mod row;
mod scroll;
pub mod tabs;


use std::collections::VecDeque;

use crate::cell::{Cell, Color};

pub use cursor::Cursor;
pub use dirty::DirtyTracker;
pub use editing::{EraseMode, LineEraseMode};
pub use navigation::TabClearMode;
pub use row::{EolTag, Row};
pub use tabs::TabStops;

/// The screen-content model.
///
/// Stores visible rows (index 0 = top of window), the cursor, the
/// scrolling region, and the tab-stop table. Rows scrolled off the top
/// of a full-window region are retained in `scrollback` while the main
/// buffer is active.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Row>,
    pub cols: usize,
    pub lines: usize,
    pub cursor: Cursor,
    /// DECSTBM region, inclusive on both ends.
    scroll_top: usize,
    scroll_bottom: usize,
    tab_stops: TabStops,
    dirty: DirtyTracker,
    pub scrollback: VecDeque<Row>,
    max_scrollback: usize,
    /// Cleared while the alternate buffer is active.
    pub(crate) scrollback_enabled: bool,
    /// Sticky background captured by a full-screen erase in application mode.
    app_mode_bg: Option<Color>,
    next_line_id: u64,
}

impl Grid {
    pub fn new(lines: usize, cols: usize) -> Self {
        Self::with_max_scrollback(lines, cols, 10_000)
    }

    pub fn with_max_scrollback(lines: usize, cols: usize, max_scrollback: usize) -> Self {
        let rows = (0..lines).map(|id| Row::new(cols, id as u64)).collect();

        Self {
            rows,
            cols,
            lines,
            cursor: Cursor::default(),
            scroll_top: 0,
            scroll_bottom: lines.saturating_sub(1),
            tab_stops: TabStops::new(cols),
            dirty: DirtyTracker::new(lines),
            scrollback: VecDeque::new(),
            max_scrollback,
            scrollback_enabled: true,
            app_mode_bg: None,
            next_line_id: lines as u64,
        }
    }

    pub fn row(&self, line: usize) -> &Row {
        &self.rows[line]
    }

    pub fn row_mut(&mut self, line: usize) -> &mut Row {
        self.dirty.mark_row(line);
        &mut self.rows[line]
    }

    /// Allocates the next monotonically increasing line identifier.
    pub(crate) fn fresh_row(&mut self) -> Row {
        let id = self.next_line_id;
        self.next_line_id += 1;
        Row::new(self.cols, id)
    }

    /// The identifier of the top visible line.
    pub fn top_line_id(&self) -> u64 {
        self.rows[0].id
    }

    /// The identifier of the line under the cursor.
    pub fn current_line_id(&self) -> u64 {
        self.rows[self.cursor.row].id
    }

    /// Finds the visible row carrying `id`, or the nearest window edge.
    pub fn find_line_or_edge(&self, id: u64) -> usize {
        for (i, row) in self.rows.iter().enumerate() {
            if row.id == id {
                return i;
            }
        }
        if id < self.rows[0].id {
            0
        } else {
            self.lines - 1
        }
    }

    // Scrolling region

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_bottom(&self) -> usize {
        self.scroll_bottom
    }

    /// Sets the DECSTBM region (inclusive offsets within the window).
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(self.lines.saturating_sub(1));
        // Inverted pairs are swapped rather than rejected.
        let (top, bottom) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        self.scroll_top = top;
        self.scroll_bottom = bottom;
    }

    pub fn clear_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = self.lines.saturating_sub(1);
    }

    // Tab stops

    pub fn tab_stops(&self) -> &TabStops {
        &self.tab_stops
    }

    pub fn set_tab_stop(&mut self) {
        let col = self.cursor.col;
        self.tab_stops.set(col);
    }

    pub fn reset_tab_stops(&mut self) {
        self.tab_stops.reset(self.cols);
    }

    // Invalidation

    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn dirty_mut(&mut self) -> &mut DirtyTracker {
        &mut self.dirty
    }

    // Application-mode background

    pub fn app_mode_bg(&self) -> Option<Color> {
        self.app_mode_bg
    }

    pub(crate) fn set_app_mode_bg(&mut self, color: Option<Color>) {
        self.app_mode_bg = color;
    }

    /// Clears every visible row and homes the cursor.
    pub fn clear_all(&mut self) {
        let template = Cell::default();
        for r in 0..self.lines {
            self.rows[r].reset(&template);
        }
        self.cursor.col = 0;
        self.cursor.row = 0;
        self.cursor.input_needs_wrap = false;
        self.dirty.mark_all();
    }

    /// The visible rows, top to bottom.
    pub fn visible_rows(&self) -> &[Row] {
        &self.rows
    }
}
