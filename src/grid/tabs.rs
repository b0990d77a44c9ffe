//! Horizontal tab-stop table.

const DEFAULT_TAB_INTERVAL: usize = 8;

/// Bit-vector of tab stop columns.
///
/// Grows on demand when referenced beyond its current length; grown
/// entries are seeded with the default every-8 pattern.
#[derive(Debug, Clone)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    pub fn new(cols: usize) -> Self {
        let mut table = Self { stops: Vec::new() };
        table.ensure(cols);
        table
    }

    fn ensure(&mut self, len: usize) {
        while self.stops.len() < len {
            let col = self.stops.len();
            self.stops.push(col % DEFAULT_TAB_INTERVAL == 0);
        }
    }

    /// Sets a stop at the given column.
    pub fn set(&mut self, col: usize) {
        self.ensure(col + 1);
        self.stops[col] = true;
    }

    /// Clears the stop at the given column.
    pub fn clear(&mut self, col: usize) {
        self.ensure(col + 1);
        self.stops[col] = false;
    }

    /// Clears every stop.
    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    /// Re-seeds the whole table with the default pattern.
    pub fn reset(&mut self, cols: usize) {
        self.stops.clear();
        self.ensure(cols);
    }

    /// True when the column carries a stop.
    pub fn is_stop(&self, col: usize) -> bool {
        self.stops.get(col).copied().unwrap_or(false)
    }

    /// The next stop strictly greater than `col`, clamped to `width - 1`.
    pub fn next_stop(&mut self, col: usize, width: usize) -> usize {
        self.ensure(width);
        let mut c = col + 1;
        while c < width && !self.stops[c] {
            c += 1;
        }
        c.min(width.saturating_sub(1))
    }

    /// The previous stop strictly less than `col`, or column 0.
    pub fn prev_stop(&self, col: usize) -> usize {
        let mut c = col;
        while c > 0 {
            c -= 1;
            if self.is_stop(c) {
                return c;
            }
        }
        0
    }
}
