use crate::cell::Cell;

/// Cursor position plus the decoration template applied to new cells.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub template: Cell,
    /// Set when a character was written in the last column and the wrap
    /// decision is pending. The column index never rests past the edge.
    pub input_needs_wrap: bool,
}

impl Cursor {
    /// Resets the decoration template to the default.
    pub fn reset_attrs(&mut self) {
        self.template = Cell::default();
    }
}
