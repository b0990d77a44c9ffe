use bitflags::bitflags;

bitflags! {
    /// Terminal mode flags toggled by ANSI and DEC private sequences.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TermMode: u16 {
        const SHOW_CURSOR     = 1 << 0;
        const APP_CURSOR      = 1 << 1;
        const APP_KEYPAD      = 1 << 2;
        const LINE_WRAP       = 1 << 3;
        const ORIGIN          = 1 << 4;
        const INSERT          = 1 << 5;
        const ALT_SCREEN      = 1 << 6;
        const FOCUS_IN_OUT    = 1 << 7;
        const BRACKETED_PASTE = 1 << 8;
        const REVERSE_VIDEO   = 1 << 9;
    }
}

impl Default for TermMode {
    fn default() -> Self {
        Self::LINE_WRAP | Self::SHOW_CURSOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_wrap_and_show_cursor() {
        let mode = TermMode::default();
        assert!(mode.contains(TermMode::LINE_WRAP));
        assert!(mode.contains(TermMode::SHOW_CURSOR));
        assert!(!mode.contains(TermMode::ALT_SCREEN));
    }
}
