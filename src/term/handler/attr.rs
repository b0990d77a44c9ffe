//! SGR attribute engine.
//!
//! Parameters run through a small state machine because of the 38/48
//! extended-color encodings (`38;5;n` indexed, `38;2;r;g;b` direct).
//! A sequence that ends mid-assignment keeps whatever was already
//! applied; there is no rollback.

use tracing::debug;

use crate::cell::{CellFlags, Color, Rgb};
use crate::event::EventListener;
use crate::term::Term;

/// Sub-states for the extended color encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorState {
    /// Plain code dispatch.
    Idle,
    /// After 38/48: expecting the encoding selector (5 or 2).
    Select,
    /// After `;5`: expecting the palette index.
    Index,
    /// After `;2`: expecting red, green, blue.
    Red,
    Green,
    Blue,
}

impl<T: EventListener> Term<T> {
    /// Applies one SGR parameter list to the cursor template.
    pub(super) fn sgr(&mut self, params: &[u16]) {
        // An empty parameter list means a single 0.
        let params = if params.is_empty() { &[0u16][..] } else { params };

        let template = &mut self.grid.cursor.template;
        let mut state = ColorState::Idle;
        let mut to_foreground = true;
        let mut rgb = Rgb::default();

        let mut i = 0;
        while i < params.len() {
            let code = params[i];
            match state {
                ColorState::Idle => {
                    match code {
                        0 | 22 => {
                            template.fg = Color::Default;
                            template.bg = Color::Default;
                            template.flags &= CellFlags::LAYOUT;
                        }
                        1 => template.flags.insert(CellFlags::BOLD),
                        4 => template.flags.insert(CellFlags::UNDERLINE),
                        5 | 6 => template.flags.insert(CellFlags::BLINK),
                        7 => template.flags.insert(CellFlags::INVERSE),
                        8 => template.flags.insert(CellFlags::HIDDEN),
                        24 => template.flags.remove(CellFlags::UNDERLINE),
                        25 => template.flags.remove(CellFlags::BLINK),
                        27 => template.flags.remove(CellFlags::INVERSE),
                        28 => template.flags.remove(CellFlags::HIDDEN),
                        30..=37 => template.fg = Color::Indexed((code - 30) as u8),
                        39 => template.fg = Color::Default,
                        40..=47 => template.bg = Color::Indexed((code - 40) as u8),
                        49 => template.bg = Color::Default,
                        90..=97 => template.fg = Color::Indexed((code - 90 + 8) as u8),
                        100..=107 => template.bg = Color::Indexed((code - 100 + 8) as u8),
                        38 => {
                            state = ColorState::Select;
                            to_foreground = true;
                        }
                        48 => {
                            state = ColorState::Select;
                            to_foreground = false;
                        }
                        _ => debug!(code, "ignoring unknown SGR parameter"),
                    }
                }
                ColorState::Select => match code {
                    5 => state = ColorState::Index,
                    2 => state = ColorState::Red,
                    _ => {
                        // Not an extended-color selector: reprocess the
                        // code as a plain parameter.
                        state = ColorState::Idle;
                        continue;
                    }
                },
                ColorState::Index => {
                    if code <= 255 {
                        let color = Color::Indexed(code as u8);
                        if to_foreground {
                            template.fg = color;
                        } else {
                            template.bg = color;
                        }
                    }
                    state = ColorState::Idle;
                }
                ColorState::Red => {
                    if code <= 255 {
                        rgb.r = code as u8;
                        state = ColorState::Green;
                    } else {
                        state = ColorState::Idle;
                    }
                }
                ColorState::Green => {
                    if code <= 255 {
                        rgb.g = code as u8;
                        state = ColorState::Blue;
                    } else {
                        state = ColorState::Idle;
                    }
                }
                ColorState::Blue => {
                    if code <= 255 {
                        rgb.b = code as u8;
                        let color = Color::Spec(rgb);
                        if to_foreground {
                            template.fg = color;
                        } else {
                            template.bg = color;
                        }
                    }
                    state = ColorState::Idle;
                }
            }
            i += 1;
        }
    }
}
