//! Terminal state machine.
//!
//! [`Term<T>`] owns the grid, mode flags, palette, escape recognizer,
//! screen-buffer manager, mouse tracker, and settings. Characters enter
//! through [`Term::advance`]; everything going the other way (reply
//! bytes, bell, title changes) leaves through the attached
//! [`EventListener`].

mod handler;
pub mod mode;
pub mod screen;

#[cfg(test)]
mod tests;

pub use mode::TermMode;

use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use crate::color::Palette;
use crate::error::SequenceError;
use crate::event::{Event, EventListener};
use crate::grid::{EolTag, EraseMode, Grid};
use crate::key_encoding::{self, Key, Modifiers};
use crate::mouse::{MouseEvent, MouseProtocol, MouseTracker, MouseTrackingState};
use crate::parser::{Action, Parser};
use crate::settings::{LineFeedRule, Settings};

/// Leader bytes emitted before pasted text under bracketed paste.
const PASTE_LEADER: &[u8] = b"\x1b[200~";
/// Trailer bytes emitted after pasted text under bracketed paste.
const PASTE_TRAILER: &[u8] = b"\x1b[201~";

/// The terminal state machine.
///
/// Generic over `T: EventListener` so tests can use a collecting
/// listener while the real embedder routes events to its UI loop and
/// peer transmit path.
#[derive(Debug)]
pub struct Term<T: EventListener> {
    grid: Grid,
    mode: TermMode,
    palette: Palette,
    parser: Parser,
    screen: screen::ScreenBuffer,
    mouse_state: MouseTrackingState,
    mouse_protocol: MouseProtocol,
    mouse: MouseTracker,
    settings: Settings,
    /// Last caption set by OSC 0/2.
    title: String,
    listener: T,
}

impl<T: EventListener> Term<T> {
    /// Creates a new terminal with the given window dimensions.
    pub fn new(lines: usize, cols: usize, settings: Settings, listener: T) -> Self {
        Self {
            grid: Grid::new(lines, cols),
            mode: TermMode::default(),
            palette: Palette::default(),
            parser: Parser::new(),
            screen: screen::ScreenBuffer::default(),
            mouse_state: MouseTrackingState::default(),
            mouse_protocol: MouseProtocol::default(),
            mouse: MouseTracker::default(),
            settings,
            title: String::new(),
            listener,
        }
    }

    // Accessors

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn mode(&self) -> TermMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn mouse_tracking_state(&self) -> MouseTrackingState {
        self.mouse_state
    }

    pub fn mouse_protocol(&self) -> MouseProtocol {
        self.mouse_protocol
    }

    /// True while the alternate buffer is active.
    pub fn is_application_mode(&self) -> bool {
        self.mode.contains(TermMode::ALT_SCREEN)
    }

    pub fn event_listener(&self) -> &T {
        &self.listener
    }

    // Input pipeline

    /// Processes one Unicode scalar from the peer.
    pub fn advance(&mut self, c: char) {
        let actions = self.parser.advance(c);
        for action in actions {
            match action {
                Action::Print(ch) => self.input(ch),
                Action::Control(ch) => self.control(ch),
                Action::Dispatch(seq) => {
                    if let Err(err) = self.dispatch(&seq) {
                        // The recognizer is already back in idle; one
                        // diagnostic, then resume at the next scalar.
                        warn!(%err, "escape sequence dropped");
                    }
                }
                Action::Error(SequenceError::Incomplete) => {
                    debug!("incomplete escape sequence dropped");
                }
                Action::Error(err) => warn!(%err, "escape sequence dropped"),
            }
        }
    }

    /// Feeds a whole string through [`Term::advance`].
    pub fn advance_str(&mut self, input: &str) {
        for c in input.chars() {
            self.advance(c);
        }
    }

    /// Places one printable character.
    fn input(&mut self, c: char) {
        let width = match UnicodeWidthChar::width(c) {
            Some(w) => w,
            None => return,
        };
        self.listener.on_print(c);
        let wrap = self.mode.contains(TermMode::LINE_WRAP);
        let insert = self.mode.contains(TermMode::INSERT);
        match width {
            0 => {}
            2 => self.grid.put_wide_char(c, wrap, insert),
            _ => self.grid.put_char(c, wrap, insert),
        }
    }

    /// Handles a C0/C1 control character.
    fn control(&mut self, c: char) {
        match c {
            '\n' | '\x0b' => {
                if self.settings.line_feed_rule == LineFeedRule::LfOnly {
                    self.grid.carriage_return();
                }
                self.line_feed();
            }
            '\r' => {
                self.grid.carriage_return();
                self.tag_eol(EolTag::Cr);
                if self.settings.line_feed_rule == LineFeedRule::CrOnly {
                    self.line_feed();
                }
            }
            '\x07' => self.listener.send_event(Event::Bell),
            '\x08' => self.grid.backspace(),
            '\t' => self.grid.advance_tab(1),
            // Charset shifts are handled upstream of this core.
            '\x0e' | '\x0f' | '\0' => {}
            _ => debug!(code = c as u32, "unsupported control character"),
        }
    }

    /// Flushes the current line and advances through the region.
    fn line_feed(&mut self) {
        let row = self.grid.cursor.row;
        let tag = match self.grid.row(row).eol {
            EolTag::Cr => EolTag::CrLf,
            _ => EolTag::Lf,
        };
        self.grid.row_mut(row).eol = tag;
        self.grid.linefeed();
    }

    fn tag_eol(&mut self, tag: EolTag) {
        let row = self.grid.cursor.row;
        self.grid.row_mut(row).eol = tag;
    }

    // Outward paths

    pub(crate) fn pty_write(&self, bytes: impl Into<Vec<u8>>) {
        self.listener.send_event(Event::PtyWrite(bytes.into()));
    }

    /// Reports a focus change to the peer when focus reporting is on.
    pub fn focus_changed(&mut self, focused: bool) {
        if !self.mode.contains(TermMode::FOCUS_IN_OUT) {
            return;
        }
        self.pty_write(if focused { &b"\x1b[I"[..] } else { &b"\x1b[O"[..] });
    }

    /// Bytes to send before pasted text. Empty when bracketed paste is off.
    pub fn paste_leader(&self) -> &'static [u8] {
        if self.mode.contains(TermMode::BRACKETED_PASTE) {
            PASTE_LEADER
        } else {
            b""
        }
    }

    /// Bytes to send after pasted text. Empty when bracketed paste is off.
    pub fn paste_trailer(&self) -> &'static [u8] {
        if self.mode.contains(TermMode::BRACKETED_PASTE) {
            PASTE_TRAILER
        } else {
            b""
        }
    }

    /// Feeds a pointer event to the mouse tracker.
    ///
    /// Returns true when tracking consumed the event (even if no bytes
    /// were emitted); false means the embedder should treat the event as
    /// local (selection, scrolling).
    pub fn mouse_input(&mut self, event: MouseEvent) -> bool {
        // Read once: a mode change by the dispatcher mid-event can only
        // take effect on the next event.
        let state = self.mouse_state;
        let protocol = self.mouse_protocol;

        let mut report = Vec::new();
        let consumed = self.mouse.process(state, protocol, &event, &mut report);
        if !report.is_empty() {
            self.pty_write(report);
        }
        consumed
    }

    /// Encodes a cursor/function/editing key under the current modes.
    pub fn encode_key(&self, key: Key, mods: Modifiers) -> Vec<u8> {
        key_encoding::encode_key(key, mods, self.mode, self.settings.modify_cursor_keys)
    }

    // Buffer switching

    pub(crate) fn enter_alt(&mut self, save_cursor: bool, clear: bool) {
        if self.mode.contains(TermMode::ALT_SCREEN) {
            return;
        }
        if save_cursor {
            self.screen.save_cursor(&self.grid.cursor, false);
        }
        self.screen.enter_alternate(&mut self.grid);
        self.mode.insert(TermMode::ALT_SCREEN);
        if clear {
            self.grid.erase_display(EraseMode::All);
        }
    }

    pub(crate) fn leave_alt(&mut self, restore_cursor: bool, clear: bool) {
        if !self.mode.contains(TermMode::ALT_SCREEN) {
            return;
        }
        if clear {
            self.grid.erase_display(EraseMode::All);
        }
        self.screen.leave_alternate(&mut self.grid);
        self.mode.remove(TermMode::ALT_SCREEN);
        if restore_cursor {
            self.screen.restore_cursor(&mut self.grid, false);
        }
    }

    /// Saves the cursor for the active buffer (DECSC, DECSET 1048).
    pub(crate) fn save_cursor(&mut self) {
        let alt = self.mode.contains(TermMode::ALT_SCREEN);
        self.screen.save_cursor(&self.grid.cursor, alt);
    }

    /// Restores the cursor for the active buffer (DECRC, DECRST 1048).
    pub(crate) fn restore_cursor(&mut self) {
        let alt = self.mode.contains(TermMode::ALT_SCREEN);
        self.screen.restore_cursor(&mut self.grid, alt);
    }

    // Lifecycle

    /// Re-initializes the recognizer and mode flags, preserving the grid.
    pub fn reset_internal(&mut self) {
        self.parser.reset();
        self.mode = TermMode::default();
        self.mouse_state = MouseTrackingState::Off;
        self.mouse_protocol = MouseProtocol::Normal;
        self.mouse = MouseTracker::default();
    }

    /// Full reset: modes, tab stops, decoration, region, and grid.
    pub fn full_reset(&mut self) {
        self.reset_internal();
        self.screen.reset();
        self.grid.scrollback_enabled = true;
        self.grid.reset_tab_stops();
        self.grid.clear_scroll_region();
        self.grid.cursor.reset_attrs();
        self.grid.set_app_mode_bg(None);
        self.grid.clear_all();
    }
}
