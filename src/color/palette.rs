//! The 256-entry indexed palette, mutable via OSC 4.

use crate::cell::Rgb;

/// Number of indexed palette entries addressable by SGR and OSC 4.
pub const NUM_COLORS: usize = 256;

// xterm default ANSI colors 0-15.
const ANSI: [Rgb; 16] = [
    Rgb { r: 0x00, g: 0x00, b: 0x00 }, // Black
    Rgb { r: 0xcd, g: 0x00, b: 0x00 }, // Red
    Rgb { r: 0x00, g: 0xcd, b: 0x00 }, // Green
    Rgb { r: 0xcd, g: 0xcd, b: 0x00 }, // Yellow
    Rgb { r: 0x00, g: 0x00, b: 0xee }, // Blue
    Rgb { r: 0xcd, g: 0x00, b: 0xcd }, // Magenta
    Rgb { r: 0x00, g: 0xcd, b: 0xcd }, // Cyan
    Rgb { r: 0xe5, g: 0xe5, b: 0xe5 }, // White
    Rgb { r: 0x7f, g: 0x7f, b: 0x7f }, // Bright Black
    Rgb { r: 0xff, g: 0x00, b: 0x00 }, // Bright Red
    Rgb { r: 0x00, g: 0xff, b: 0x00 }, // Bright Green
    Rgb { r: 0xff, g: 0xff, b: 0x00 }, // Bright Yellow
    Rgb { r: 0x5c, g: 0x5c, b: 0xff }, // Bright Blue
    Rgb { r: 0xff, g: 0x00, b: 0xff }, // Bright Magenta
    Rgb { r: 0x00, g: 0xff, b: 0xff }, // Bright Cyan
    Rgb { r: 0xff, g: 0xff, b: 0xff }, // Bright White
];

const DEFAULT_FG: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };
const DEFAULT_BG: Rgb = Rgb { r: 0x00, g: 0x00, b: 0x00 };

/// The indexed palette plus default foreground/background.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Rgb; NUM_COLORS],
    defaults: [Rgb; NUM_COLORS],
    default_fg: Rgb,
    default_bg: Rgb,
}

impl Palette {
    pub fn new() -> Self {
        let mut colors = [Rgb { r: 0, g: 0, b: 0 }; NUM_COLORS];

        // 0-15: ANSI colors
        colors[..16].copy_from_slice(&ANSI);

        // 16-231: 6x6x6 color cube
        for r in 0..6u8 {
            for g in 0..6u8 {
                for b in 0..6u8 {
                    let idx = 16 + (r as usize * 36) + (g as usize * 6) + b as usize;
                    colors[idx] = Rgb {
                        r: if r == 0 { 0 } else { 55 + r * 40 },
                        g: if g == 0 { 0 } else { 55 + g * 40 },
                        b: if b == 0 { 0 } else { 55 + b * 40 },
                    };
                }
            }
        }

        // 232-255: grayscale ramp
        for i in 0..24u8 {
            let v = 8 + i * 10;
            colors[232 + i as usize] = Rgb { r: v, g: v, b: v };
        }

        let defaults = colors;
        Self {
            colors,
            defaults,
            default_fg: DEFAULT_FG,
            default_bg: DEFAULT_BG,
        }
    }

    /// The current RGB value at the given palette index.
    pub fn color(&self, idx: u8) -> Rgb {
        self.colors[idx as usize]
    }

    pub fn default_fg(&self) -> Rgb {
        self.default_fg
    }

    pub fn default_bg(&self) -> Rgb {
        self.default_bg
    }

    /// Installs a new RGB value at the given index (OSC 4).
    pub fn set_color(&mut self, idx: u8, rgb: Rgb) {
        self.colors[idx as usize] = rgb;
    }

    /// Restores the built-in value at the given index.
    pub fn reset_color(&mut self, idx: u8) {
        self.colors[idx as usize] = self.defaults[idx as usize];
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an OSC 4 color specification into an 8-bit-per-channel RGB.
///
/// Accepted forms:
/// - `#rgb`, `#rrggbb`, `#rrrgggbbb`, `#rrrrggggbbbb`: hex triples;
///   short channels are shifted left, long channels keep their high bits.
/// - `rgb:R/G/B`: 1 to 4 hex digits per channel, normalized to 8 bits.
pub fn parse_color_spec(spec: &str) -> Option<Rgb> {
    if let Some(hex) = spec.strip_prefix('#') {
        let width = match hex.len() {
            3 => 1,
            6 => 2,
            9 => 3,
            12 => 4,
            _ => return None,
        };
        let r = scale_channel(&hex[..width], width)?;
        let g = scale_channel(&hex[width..2 * width], width)?;
        let b = scale_channel(&hex[2 * width..], width)?;
        return Some(Rgb { r, g, b });
    }

    if let Some(body) = spec.strip_prefix("rgb:") {
        let mut parts = body.split('/');
        let (r, g, b) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        // Channels must share one digit width.
        let width = r.len();
        if g.len() != width || b.len() != width {
            return None;
        }
        return Some(Rgb {
            r: scale_channel(r, width)?,
            g: scale_channel(g, width)?,
            b: scale_channel(b, width)?,
        });
    }

    None
}

/// Normalizes one hex channel of the given digit width to 8 bits.
fn scale_channel(digits: &str, width: usize) -> Option<u8> {
    let value = u16::from_str_radix(digits, 16).ok()?;
    match width {
        1 => Some((value << 4) as u8),
        2 => Some(value as u8),
        3 => Some((value >> 4) as u8),
        4 => Some((value >> 8) as u8),
        _ => None,
    }
}
