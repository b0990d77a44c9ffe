//! Core state machine of an xterm-compatible terminal emulator.
//!
//! `vtcore` turns a stream of Unicode scalars from a pseudo-terminal peer
//! into mutations of a rectangular cell grid, and produces the reply bytes
//! the peer expects: device attributes, cursor position reports, mouse
//! reports, and function-key encodings. It contains no rendering, PTY,
//! or platform-specific code; the embedder feeds characters in through
//! [`Term::advance`] and receives outward traffic through an
//! [`EventListener`].

#![deny(unsafe_code)]

pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod grid;
pub mod key_encoding;
pub mod mouse;
pub mod parser;
pub mod settings;
pub mod term;

pub use cell::{Cell, CellFlags, Color, Rgb};
pub use color::Palette;
pub use error::SequenceError;
pub use event::{Event, EventListener, VoidListener};
pub use grid::{Cursor, EolTag, Grid, Row};
pub use key_encoding::{encode_editing_key, encode_key, Key, Modifiers};
pub use mouse::{
    MouseAction, MouseButton, MouseEvent, MouseModifiers, MouseProtocol, MouseTrackingState,
};
pub use parser::Parser;
pub use settings::{LineFeedRule, Settings};
pub use term::{Term, TermMode};
