//! Grid cell representation: character, colors, and decoration flags.

use bitflags::bitflags;

bitflags! {
    /// Bitflags for cell decorations and layout hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD             = 0b0000_0001;
        const BLINK            = 0b0000_0010;
        const UNDERLINE        = 0b0000_0100;
        const INVERSE          = 0b0000_1000;
        const HIDDEN           = 0b0001_0000;
        const WIDE_CHAR        = 0b0010_0000;
        const WIDE_CHAR_SPACER = 0b0100_0000;
    }
}

impl CellFlags {
    /// Flags describing glyph layout rather than decoration.
    pub const LAYOUT: Self = Self::WIDE_CHAR.union(Self::WIDE_CHAR_SPACER);
}

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A cell color: terminal default, palette index, or direct RGB.
///
/// `Indexed` cells resolve through the palette at render time, so an
/// OSC 4 palette rewrite changes how existing cells display without any
/// cell mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Spec(Rgb),
}

/// A single grid cell with character, colors, and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg: Color::Default,
            flags: CellFlags::empty(),
        }
    }
}

impl Cell {
    /// Resets this cell to match the template, dropping layout flags.
    pub fn reset(&mut self, template: &Self) {
        self.ch = template.ch;
        self.fg = template.fg;
        self.bg = template.bg;
        self.flags = template.flags & !CellFlags::LAYOUT;
    }

    /// True when the cell holds no visible character.
    pub fn is_blank(&self) -> bool {
        (self.ch == ' ' || self.ch == '\0') && !self.flags.intersects(CellFlags::LAYOUT)
    }
}
