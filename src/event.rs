//! Terminal events and the listener trait.
//!
//! Events flow outward from the terminal core to the embedder. Reply
//! bytes for the peer travel as [`Event::PtyWrite`]; they are produced
//! by the dispatcher and the mouse/focus paths and are never routed back
//! into the parser. Settings-touching changes (title, local echo) are
//! events rather than direct mutations so the embedder can apply them
//! after its input-processing lock has been released.

use crate::cell::Rgb;

/// Terminal events that flow outward to the embedder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// BEL received.
    Bell,
    /// Window caption changed (OSC 0/2).
    Title(String),
    /// ANSI mode 12 toggled send/receive mode; `true` means local echo
    /// is now on.
    LocalEcho(bool),
    /// A palette entry was rewritten by OSC 4.
    PaletteChanged(u8, Rgb),
    /// Reply bytes for the peer: device attributes, cursor reports,
    /// mouse reports, focus reports.
    PtyWrite(Vec<u8>),
}

/// Receives terminal events.
///
/// The default implementation is a no-op, so [`VoidListener`] needs no
/// method body. Real implementations forward `PtyWrite` payloads to the
/// peer transmit path and route the rest to the UI layer.
///
/// Bound: `Send + 'static` because mouse and focus events may originate
/// on a different thread than the input stream.
pub trait EventListener: Send + 'static {
    /// Handle a terminal event. Default: no-op.
    fn send_event(&self, _event: Event) {}

    /// Observe each printable character as it is placed. Modal input
    /// watchers (e.g. password prompts) hook in here. Default: no-op.
    fn on_print(&self, _c: char) {}
}

/// No-op event listener for tests and headless operation.
pub struct VoidListener;

impl EventListener for VoidListener {}
