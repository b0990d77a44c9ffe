//! Mouse tracking: state machine, protocol matrix, and report
//! encodings.
//!
//! Four tracking states (off, clicks, drags, all motion) crossed with
//! four wire protocols (legacy single-byte, UTF-8 coordinates, URXVT
//! decimal, SGR). The tracker remembers the pressed button and the last
//! reported motion cell so drags collapse to one report per cell.

use bitflags::bitflags;

/// What the terminal reports, set by DECSET 1000/1002/1003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseTrackingState {
    /// No tracking; pointer events stay local.
    #[default]
    Off,
    /// Button presses and releases.
    Normal,
    /// Presses, releases, and motion while a button is held.
    Drag,
    /// Every pointer event.
    Any,
}

/// Report wire format, set by DECSET 1005/1006/1015.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseProtocol {
    /// `ESC [ M` with single-byte status and coordinates.
    #[default]
    Normal,
    /// `ESC [ M` with UTF-8 encoded coordinates.
    Utf8,
    /// `ESC [ status ; col ; row M` in decimal.
    Urxvt,
    /// `ESC [ < status ; col ; row M|m`.
    Sgr,
}

/// Pointer event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    ButtonDown,
    ButtonUp,
    WheelUp,
    WheelDown,
    Move,
}

/// Physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseModifiers: u8 {
        const SHIFT   = 0b001;
        const META    = 0b010;
        const CONTROL = 0b100;
    }
}

/// One pointer event, in 0-based window cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    pub modifiers: MouseModifiers,
    pub row: usize,
    pub col: usize,
}

/// Coordinate ceiling for the single-byte encoding.
const NORMAL_COORD_LIMIT: usize = 255 - 32;
/// Coordinate ceiling for the multi-byte encodings.
const EXTENDED_COORD_LIMIT: usize = 2047 - 32;

fn button_bits(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => 0x00,
        MouseButton::Middle => 0x01,
        MouseButton::Right => 0x02,
    }
}

fn modifier_bits(mods: MouseModifiers) -> u8 {
    let mut bits = 0;
    if mods.contains(MouseModifiers::SHIFT) {
        bits |= 0x04;
    }
    if mods.contains(MouseModifiers::META) {
        bits |= 0x08;
    }
    if mods.contains(MouseModifiers::CONTROL) {
        bits |= 0x10;
    }
    bits
}

/// Tracks pressed-button and motion state between pointer events.
#[derive(Debug, Default)]
pub struct MouseTracker {
    pressed: Option<MouseButton>,
    last_move: Option<(usize, usize)>,
}

impl MouseTracker {
    /// Processes one pointer event under the given state and protocol.
    ///
    /// Returns true when tracking consumed the event; report bytes, if
    /// any, are appended to `out`.
    pub fn process(
        &mut self,
        state: MouseTrackingState,
        protocol: MouseProtocol,
        event: &MouseEvent,
        out: &mut Vec<u8>,
    ) -> bool {
        if state == MouseTrackingState::Off {
            self.pressed = None;
            self.last_move = None;
            return false;
        }

        let limit = match protocol {
            MouseProtocol::Normal => NORMAL_COORD_LIMIT,
            _ => EXTENDED_COORD_LIMIT,
        };
        let row = event.row.min(limit);
        let col = event.col.min(limit);

        let base = match event.action {
            MouseAction::ButtonDown => {
                if self.pressed.is_some() {
                    // A second button while one is held: swallowed.
                    return true;
                }
                self.pressed = Some(event.button);
                button_bits(event.button)
            }
            MouseAction::ButtonUp => {
                // Only SGR can say which button was released.
                let bits = if protocol == MouseProtocol::Sgr {
                    button_bits(event.button)
                } else {
                    0x03
                };
                self.pressed = None;
                bits
            }
            MouseAction::WheelUp => 0x40,
            MouseAction::WheelDown => 0x41,
            MouseAction::Move => {
                let wanted = state == MouseTrackingState::Any
                    || (state == MouseTrackingState::Drag && self.pressed.is_some());
                if !wanted || self.last_move == Some((row, col)) {
                    return true;
                }
                self.last_move = Some((row, col));
                0x20 + self.pressed.map(button_bits).unwrap_or(0)
            }
        };

        let mut status = base | modifier_bits(event.modifiers);
        if protocol != MouseProtocol::Sgr {
            status += 0x20;
        }

        let release = event.action == MouseAction::ButtonUp;
        encode(protocol, status, row, col, release, out);
        true
    }
}

/// Encodes one report in the given protocol.
fn encode(
    protocol: MouseProtocol,
    status: u8,
    row: usize,
    col: usize,
    release: bool,
    out: &mut Vec<u8>,
) {
    match protocol {
        MouseProtocol::Normal => {
            out.extend_from_slice(b"\x1b[M");
            out.push(status);
            // At the ceiling the biased value overflows a byte; xterm
            // sends a zero there and so do we.
            out.push(overflowing_coord(col));
            out.push(overflowing_coord(row));
        }
        MouseProtocol::Utf8 => {
            out.extend_from_slice(b"\x1b[M");
            out.push(status);
            push_utf8_coord(col, out);
            push_utf8_coord(row, out);
        }
        MouseProtocol::Urxvt => {
            out.extend_from_slice(
                format!("\x1b[{status};{};{}M", col + 1, row + 1).as_bytes(),
            );
        }
        MouseProtocol::Sgr => {
            let finalizer = if release { 'm' } else { 'M' };
            out.extend_from_slice(
                format!("\x1b[<{status};{};{}{finalizer}", col + 1, row + 1).as_bytes(),
            );
        }
    }
}

fn overflowing_coord(coord: usize) -> u8 {
    let biased = coord + 1 + 0x20;
    if biased > 0xff {
        0
    } else {
        biased as u8
    }
}

/// One byte when it fits, otherwise the UTF-8 encoding of the value.
fn push_utf8_coord(coord: usize, out: &mut Vec<u8>) {
    let value = (coord + 1 + 0x20) as u32;
    if let Some(c) = char::from_u32(value) {
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }
}
