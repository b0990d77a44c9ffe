//! User-facing settings the core reads while processing input.

use serde::{Deserialize, Serialize};

/// How incoming line terminators are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFeedRule {
    /// CR and LF each mean exactly what they say.
    #[default]
    Normal,
    /// The peer sends bare LF; synthesize a CR before each LF.
    LfOnly,
    /// The peer sends bare CR; synthesize an LF after each CR.
    CrOnly,
}

/// Terminal settings consumed by the core.
///
/// The core never writes these during input processing; changes
/// requested by the peer (local echo, caption) surface as events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub line_feed_rule: LineFeedRule,
    pub local_echo: bool,
    pub caption: String,
    /// The xterm `modifyCursorKeys` resource. Must be positive.
    pub modify_cursor_keys: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            line_feed_rule: LineFeedRule::Normal,
            local_echo: true,
            caption: String::new(),
            modify_cursor_keys: 2,
        }
    }
}
