//! DEC private mode set/reset (`CSI ? … h|l`) and buffer-mode
//! save/restore (`CSI ? … s|r`).

use crate::error::SequenceError;
use crate::event::EventListener;
use crate::grid::EraseMode;
use crate::mouse::{MouseProtocol, MouseTrackingState};
use crate::term::{Term, TermMode};

impl<T: EventListener> Term<T> {
    /// Dispatches `CSI ? …` forms keyed on the final byte.
    pub(super) fn csi_private(
        &mut self,
        params_str: &str,
        action: char,
    ) -> Result<(), SequenceError> {
        let params: Result<Vec<u16>, _> = params_str
            .split(';')
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|_| SequenceError::Unknown(format!("[?{params_str}{action}")))
            })
            .collect();
        let params = params?;

        match action {
            'h' => {
                for &p in &params {
                    self.dec_private_mode(p, true)?;
                }
                Ok(())
            }
            'l' => {
                for &p in &params {
                    self.dec_private_mode(p, false)?;
                }
                Ok(())
            }
            's' => {
                // Only the buffer mode is stored.
                if params.iter().any(|&p| p == 47 || p == 1047) {
                    let alt = self.mode.contains(TermMode::ALT_SCREEN);
                    self.screen.save_buffer_mode(alt);
                }
                Ok(())
            }
            'r' => {
                if params.iter().any(|&p| p == 47 || p == 1047) {
                    let want_alt = self.screen.saved_buffer_mode();
                    let is_alt = self.mode.contains(TermMode::ALT_SCREEN);
                    if want_alt && !is_alt {
                        self.enter_alt(false, false);
                    } else if !want_alt && is_alt {
                        self.leave_alt(false, false);
                    }
                }
                Ok(())
            }
            _ => Err(SequenceError::Unknown(format!("[?{params_str}{action}"))),
        }
    }

    /// One DEC private mode, keyed by numeric parameter.
    fn dec_private_mode(&mut self, param: u16, set: bool) -> Result<(), SequenceError> {
        match param {
            1 => self.set_mode_flag(TermMode::APP_CURSOR, set),
            5 => {
                let was = self.mode.contains(TermMode::REVERSE_VIDEO);
                self.set_mode_flag(TermMode::REVERSE_VIDEO, set);
                if was != set {
                    // Whole-screen inversion: everything repaints.
                    self.grid.dirty_mut().mark_all();
                }
            }
            6 => {
                self.set_mode_flag(TermMode::ORIGIN, set);
                let top = if set { self.grid.scroll_top() } else { 0 };
                self.grid.goto(top, 0);
            }
            7 => self.set_mode_flag(TermMode::LINE_WRAP, set),
            // Cursor blink: intentionally unimplemented.
            12 => {}
            // Cursor visibility is the renderer's concern.
            25 => self.set_mode_flag(TermMode::SHOW_CURSOR, set),
            47 => {
                if set {
                    self.enter_alt(false, false);
                } else {
                    self.leave_alt(false, false);
                }
            }
            1047 => {
                if set {
                    self.enter_alt(false, false);
                } else {
                    // Clears the window on the way out.
                    self.leave_alt(false, true);
                }
            }
            1048 => {
                if set {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => {
                if set {
                    self.enter_alt(true, true);
                } else {
                    self.leave_alt(true, true);
                }
            }
            1000 => self.set_mouse_state(MouseTrackingState::Normal, set),
            1002 => self.set_mouse_state(MouseTrackingState::Drag, set),
            1003 => self.set_mouse_state(MouseTrackingState::Any, set),
            // Highlight tracking: accepted, treated as off.
            1001 => self.mouse_state = MouseTrackingState::Off,
            1004 => self.set_mode_flag(TermMode::FOCUS_IN_OUT, set),
            1005 => self.set_mouse_protocol(MouseProtocol::Utf8, set),
            1006 => self.set_mouse_protocol(MouseProtocol::Sgr, set),
            1015 => self.set_mouse_protocol(MouseProtocol::Urxvt, set),
            2004 => self.set_mode_flag(TermMode::BRACKETED_PASTE, set),
            _ => {
                return Err(SequenceError::Unsupported(format!(
                    "[?{param}{}",
                    if set { 'h' } else { 'l' }
                )))
            }
        }
        Ok(())
    }

    fn set_mouse_state(&mut self, state: MouseTrackingState, set: bool) {
        self.mouse_state = if set { state } else { MouseTrackingState::Off };
    }

    fn set_mouse_protocol(&mut self, protocol: MouseProtocol, set: bool) {
        self.mouse_protocol = if set { protocol } else { MouseProtocol::Normal };
    }
}
