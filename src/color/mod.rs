//! Indexed color palette and OSC color-specification parsing.

mod palette;

pub use palette::{parse_color_spec, Palette, NUM_COLORS};
