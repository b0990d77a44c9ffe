//! Key event encoding for terminal input (xterm-style).
//!
//! Cursor keys honor DECCKM and the `modifyCursorKeys` resource;
//! function keys use the xterm PC-style encodings; editing keys carry a
//! legacy shifted variant kept for older applications.

use bitflags::bitflags;

use crate::term::TermMode;

/// Keys with non-textual encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowRight,
    ArrowLeft,
    /// Function key F1–F12.
    F(u8),
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
}

bitflags! {
    /// Keyboard modifiers for key events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 0b001;
        const ALT     = 0b010;
        const CONTROL = 0b100;
    }
}

impl Modifiers {
    /// The xterm modifier parameter: 1 + shift + 2·alt + 4·ctrl.
    ///
    /// Returns 0 when no modifiers are active so callers can omit the
    /// parameter entirely.
    fn xterm_param(self) -> u8 {
        if self.is_empty() {
            0
        } else {
            self.bits() + 1
        }
    }
}

/// Terminator letters for the cursor keys.
fn cursor_letter(key: Key) -> Option<u8> {
    Some(match key {
        Key::ArrowUp => b'A',
        Key::ArrowDown => b'B',
        Key::ArrowRight => b'C',
        Key::ArrowLeft => b'D',
        _ => return None,
    })
}

/// `CSI NN ~` numbers for F5–F12.
fn function_tilde(n: u8) -> Option<u8> {
    Some(match n {
        5 => 15,
        6 => 17,
        7 => 18,
        8 => 19,
        9 => 20,
        10 => 21,
        11 => 23,
        12 => 24,
        _ => return None,
    })
}

/// Encode a key event into bytes to send to the peer.
///
/// Returns an empty `Vec` if the key has no encoding.
pub fn encode_key(key: Key, mods: Modifiers, mode: TermMode, modify_cursor_keys: u8) -> Vec<u8> {
    let m = mods.xterm_param();

    if let Some(letter) = cursor_letter(key) {
        let modified = (2..=7).contains(&m);
        return if modify_cursor_keys == 2 && modified {
            format!("\x1b[1;{}{}", m, letter as char).into_bytes()
        } else if modify_cursor_keys == 3 && modified {
            format!("\x1b[>1;{}{}", m, letter as char).into_bytes()
        } else if mode.contains(TermMode::APP_CURSOR) {
            vec![0x1b, b'O', letter]
        } else {
            vec![0x1b, b'[', letter]
        };
    }

    if let Key::F(n) = key {
        // F1-F4 use the SS3 letters, F5-F12 the tilde numbers.
        if (1..=4).contains(&n) {
            let letter = b'P' + (n - 1);
            return if m > 1 {
                format!("\x1b[1;{}{}", m, letter as char).into_bytes()
            } else {
                vec![0x1b, b'O', letter]
            };
        }
        if let Some(nn) = function_tilde(n) {
            return if m > 1 {
                format!("\x1b[{nn};{m}~").into_bytes()
            } else {
                format!("\x1b[{nn}~").into_bytes()
            };
        }
        return Vec::new();
    }

    encode_editing_key(key, false)
}

/// Encode an editing-pad key (`CSI n ~`).
///
/// `legacy` selects the old shifted numbering some applications expect.
pub fn encode_editing_key(key: Key, legacy: bool) -> Vec<u8> {
    let n = if legacy {
        match key {
            Key::Insert => 1,
            Key::Home => 2,
            Key::PageUp => 3,
            Key::Delete => 4,
            Key::End => 5,
            Key::PageDown => 6,
            _ => return Vec::new(),
        }
    } else {
        match key {
            Key::Insert => 2,
            Key::Home => 7,
            Key::PageUp => 5,
            Key::Delete => 3,
            Key::End => 8,
            Key::PageDown => 6,
            _ => return Vec::new(),
        }
    };
    format!("\x1b[{n}~").into_bytes()
}
