//! Sequence dispatcher: semantic actions for completed escape
//! sequences.
//!
//! The recognizer hands over the raw accumulator (introducer first,
//! terminator last); routing is keyed on the introducer, then on the
//! final byte. Failures come back as [`SequenceError`] so the caller can
//! emit exactly one diagnostic and resume.

mod attr;
mod csi;
mod mode;
mod osc;


use tracing::debug;

use crate::error::SequenceError;
use crate::event::EventListener;
use crate::term::{Term, TermMode};

impl<T: EventListener> Term<T> {
    /// Dispatches one completed sequence accumulator.
    pub(crate) fn dispatch(&mut self, seq: &str) -> Result<(), SequenceError> {
        let first = match seq.chars().next() {
            Some(c) => c,
            None => return Err(SequenceError::Unknown(String::new())),
        };

        match first {
            '[' => self.csi_dispatch(&seq[1..]),
            ']' => self.osc_dispatch(&seq[1..]),
            'P' => {
                // Device control strings: recognized for termination only.
                debug!(?seq, "discarding device control string");
                Ok(())
            }
            '@' => Err(SequenceError::Unsupported(seq.to_string())),
            ' ' => self.esc_intermediate(seq),
            _ => self.esc_dispatch(seq),
        }
    }

    /// ESC-final short forms (one-character accumulators).
    fn esc_dispatch(&mut self, seq: &str) -> Result<(), SequenceError> {
        match seq {
            "=" => {
                self.set_mode_flag(TermMode::APP_KEYPAD, true);
                Ok(())
            }
            ">" => {
                self.set_mode_flag(TermMode::APP_KEYPAD, false);
                Ok(())
            }
            // NEL: next line.
            "E" => {
                self.grid.linefeed();
                self.grid.carriage_return();
                Ok(())
            }
            // IND: index.
            "D" => {
                self.grid.linefeed();
                Ok(())
            }
            // RI: reverse index.
            "M" => {
                self.grid.reverse_index();
                Ok(())
            }
            "7" => {
                self.save_cursor();
                Ok(())
            }
            "8" => {
                self.restore_cursor();
                Ok(())
            }
            "c" => {
                self.full_reset();
                Ok(())
            }
            // HTS: tab stop at the caret column.
            "H" => {
                self.grid.set_tab_stop();
                Ok(())
            }
            // Parameterless home.
            "F" => {
                self.grid.goto(0, 0);
                Ok(())
            }
            _ => Err(SequenceError::Unknown(seq.to_string())),
        }
    }

    /// Space-intermediate ESC sequences.
    ///
    /// `ESC SP F/G/L` announce 7/8-bit control preferences; both widths
    /// are always supported here, so they are no-ops.
    fn esc_intermediate(&mut self, seq: &str) -> Result<(), SequenceError> {
        match seq {
            " F" | " G" | " L" => Ok(()),
            _ => Err(SequenceError::Unsupported(seq.to_string())),
        }
    }

    pub(super) fn set_mode_flag(&mut self, flag: TermMode, set: bool) {
        if set {
            self.mode.insert(flag);
        } else {
            self.mode.remove(flag);
        }
    }
}
