//! CSI dispatch keyed on the final byte.

use crate::cell::Color;
use crate::error::SequenceError;
use crate::event::{Event, EventListener};
use crate::grid::{EraseMode, LineEraseMode, TabClearMode};
use crate::term::{Term, TermMode};

/// Splits a parameter string on `;` into integers; empty fields are 0.
fn parse_params(body: &str) -> Result<Vec<u16>, SequenceError> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split(';')
        .map(|p| {
            if p.is_empty() {
                Ok(0)
            } else {
                p.parse::<u16>()
                    .map_err(|_| SequenceError::Unknown(format!("[{body}")))
            }
        })
        .collect()
}

impl<T: EventListener> Term<T> {
    /// Dispatches a CSI sequence; `body` is parameters plus final byte.
    pub(super) fn csi_dispatch(&mut self, body: &str) -> Result<(), SequenceError> {
        let action = match body.chars().last() {
            Some(c) => c,
            None => return Err(SequenceError::Unknown("[".into())),
        };
        let params_str = &body[..body.len() - action.len_utf8()];

        // DEC private forms.
        if let Some(rest) = params_str.strip_prefix('?') {
            return self.csi_private(rest, action);
        }

        // Secondary device attributes.
        if let Some(rest) = params_str.strip_prefix('>') {
            if action == 'c' && matches!(rest, "" | "0") {
                self.pty_write(&b"\x1b[>82;1;0c"[..]);
                return Ok(());
            }
            return Err(SequenceError::Unknown(format!("[{body}")));
        }

        // DECSTR.
        if params_str == "!" {
            if action == 'p' {
                self.full_reset();
                return Ok(());
            }
            return Err(SequenceError::Unknown(format!("[{body}")));
        }

        let ps = parse_params(params_str)?;
        let p0 = ps.first().copied().unwrap_or(0) as usize;
        let p1 = ps.get(1).copied().unwrap_or(0) as usize;
        let n = p0.max(1);

        match action {
            'A' => self.grid.move_up(n),
            'B' => self.grid.move_down(n),
            'C' => self.grid.move_forward(n),
            'D' => self.grid.move_backward(n),
            'E' => {
                self.grid.move_down(n);
                self.grid.carriage_return();
            }
            'F' => {
                self.grid.move_up(n);
                self.grid.carriage_return();
            }
            'H' | 'f' => {
                let row = self.origin_row(p0.max(1) - 1);
                self.grid.goto(row, p1.max(1) - 1);
            }
            'd' => {
                let row = self.origin_row(p0.max(1) - 1);
                self.grid.goto_line(row);
            }
            'G' | '`' => self.grid.goto_col(p0.max(1) - 1),
            'J' => self.erase_display(p0)?,
            'K' => {
                let mode = match p0 {
                    0 => LineEraseMode::Right,
                    1 => LineEraseMode::Left,
                    2 => LineEraseMode::All,
                    _ => return Err(SequenceError::Unsupported(format!("[{body}"))),
                };
                self.grid.erase_line(mode);
            }
            'L' => self.grid.insert_lines(n),
            'M' => self.grid.delete_lines(n),
            'S' => self.grid.scroll_up(n),
            'T' => self.grid.scroll_down(n),
            'X' => self.grid.erase_chars(n),
            'P' => self.grid.delete_chars(n),
            '@' => self.grid.insert_blank_chars(n),
            'I' => self.grid.advance_tab(n),
            'Z' => self.grid.backward_tab(n),
            'g' => {
                let mode = match p0 {
                    0 => TabClearMode::Current,
                    3 => TabClearMode::All,
                    _ => return Err(SequenceError::Unsupported(format!("[{body}"))),
                };
                self.grid.clear_tab_stops(mode);
            }
            'm' => self.sgr(&ps),
            'h' => self.ansi_modes(&ps, true)?,
            'l' => self.ansi_modes(&ps, false)?,
            'r' => {
                let top = p0.max(1) - 1;
                let bottom = if p1 == 0 { self.grid.lines - 1 } else { p1 - 1 };
                self.grid.set_scroll_region(top, bottom);
                self.grid.goto(0, 0);
            }
            'c' => self.pty_write(&b"\x1b[?1;2c"[..]),
            'n' => self.device_status(p0)?,
            'U' => {
                let bottom = self.grid.lines - 1;
                self.grid.goto(bottom, 0);
            }
            // Window manipulation: accepted without reply.
            't' => {}
            _ => return Err(SequenceError::Unknown(format!("[{body}"))),
        }
        Ok(())
    }

    /// Row offset under origin mode.
    fn origin_row(&self, row: usize) -> usize {
        if self.mode.contains(TermMode::ORIGIN) {
            row + self.grid.scroll_top()
        } else {
            row
        }
    }

    /// Erase in display, with the corner-position aliases to mode 2.
    fn erase_display(&mut self, mut mode: usize) -> Result<(), SequenceError> {
        let cursor_row = self.grid.cursor.row;
        let cursor_col = self.grid.cursor.col;
        let at_home = cursor_row == 0 && cursor_col == 0;
        let at_end =
            cursor_row == self.grid.lines - 1 && cursor_col == self.grid.cols - 1;
        if (mode == 0 && at_home) || (mode == 1 && at_end) {
            mode = 2;
        }

        match mode {
            0 => self.grid.erase_display(EraseMode::Below),
            1 => self.grid.erase_display(EraseMode::Above),
            2 => {
                // A full-screen erase fixes the window background for
                // the renderer.
                let bg = self.grid.cursor.template.bg;
                if bg != Color::Default {
                    self.grid.set_app_mode_bg(Some(bg));
                }
                self.grid.erase_display(EraseMode::All);
            }
            _ => return Err(SequenceError::Unsupported(format!("[{mode}J"))),
        }
        Ok(())
    }

    /// ANSI `h`/`l` modes.
    fn ansi_modes(&mut self, params: &[u16], set: bool) -> Result<(), SequenceError> {
        for &param in params {
            match param {
                4 => self.set_mode_flag(TermMode::INSERT, set),
                // SRM: setting send/receive mode turns local echo off.
                12 => self.listener.send_event(Event::LocalEcho(!set)),
                20 | 25 | 34 => {}
                _ => {
                    return Err(SequenceError::Unsupported(format!(
                        "[{param}{}",
                        if set { 'h' } else { 'l' }
                    )))
                }
            }
        }
        Ok(())
    }

    /// Device status reports.
    fn device_status(&mut self, param: usize) -> Result<(), SequenceError> {
        match param {
            5 => self.pty_write(&b"\x1b[0n"[..]),
            6 => {
                let row = self.grid.cursor.row + 1;
                let col = self.grid.cursor.col + 1;
                self.pty_write(format!("\x1b[{row};{col}R").into_bytes());
            }
            _ => return Err(SequenceError::Unsupported(format!("[{param}n"))),
        }
        Ok(())
    }
}
