//! Escape-sequence recognizer.
//!
//! A two-layer pushdown recognizer over a stream of Unicode scalars.
//! The outer layer holds a one-character lookahead latch used solely to
//! disambiguate `ESC \`: that pair is the 7-bit alias of the C1 string
//! terminator (0x9C) and is rewritten to it before the state machine
//! sees either character. Every other `ESC x` pair reaches the inner
//! machine unchanged.
//!
//! The inner layer is a small accumulator machine: `Idle` passes
//! printable and control characters through; `Escaping` collects the
//! sequence body and decides termination from the introducer
//! (`[` CSI, `]` OSC, `P` DCS, `@`, or a bare final).
//!
//! The recognizer never recovers characters embedded in a bad sequence
//! as text; a failed sequence surfaces once as an error action and is
//! discarded.

use smallvec::SmallVec;

use crate::error::SequenceError;

/// Hard upper bound on the accumulator, against runaway device strings.
const MAX_SEQUENCE_LEN: usize = 4096;

/// The C1 string terminator produced by the `ESC \` alias.
pub(crate) const ST: char = '\u{9c}';

const ESC: char = '\u{1b}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Escaping,
}

/// A unit of work handed to the terminal by the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Printable character for the current line.
    Print(char),
    /// C0/C1 control character.
    Control(char),
    /// A completed sequence: introducer first, terminator last.
    Dispatch(String),
    /// A malformed sequence was dropped.
    Error(SequenceError),
}

/// Actions produced by one input scalar. The `ESC x` rewrite can yield
/// two (the deferred ESC plus the effect of `x`), never more.
pub type Actions = SmallVec<[Action; 2]>;

/// The escape-sequence recognizer.
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    acc: String,
    got_escape: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one scalar, returning the actions it produced.
    pub fn advance(&mut self, ch: char) -> Actions {
        let mut out = Actions::new();

        if self.got_escape {
            self.got_escape = false;
            if ch == '\\' {
                // ESC \ is ST; it stands for sequence termination only.
                self.process(ST, &mut out);
                return out;
            }
            self.process(ESC, &mut out);
        }

        if ch == ESC {
            self.got_escape = true;
        } else {
            self.process(ch, &mut out);
        }
        out
    }

    /// Drops any partial sequence and returns to idle.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.acc.clear();
        self.got_escape = false;
    }

    /// True while a sequence is being collected.
    pub fn in_sequence(&self) -> bool {
        self.state == State::Escaping || self.got_escape
    }

    fn process(&mut self, ch: char, out: &mut Actions) {
        match self.state {
            State::Idle => {
                if ch == ESC {
                    self.state = State::Escaping;
                    self.acc.clear();
                } else if is_control(ch) {
                    out.push(Action::Control(ch));
                } else {
                    out.push(Action::Print(ch));
                }
            }
            State::Escaping => {
                if ch == '\0' {
                    // NUL inside a sequence: observed in real streams; dropped.
                    return;
                }
                if ch == ESC {
                    // A fresh ESC aborts whatever was being collected.
                    out.push(Action::Error(SequenceError::Incomplete));
                    self.acc.clear();
                    return;
                }

                self.acc.push(ch);
                if self.acc.len() > MAX_SEQUENCE_LEN {
                    out.push(Action::Error(SequenceError::Unknown(std::mem::take(
                        &mut self.acc,
                    ))));
                    self.state = State::Idle;
                    return;
                }

                if self.terminated(ch) {
                    out.push(Action::Dispatch(std::mem::take(&mut self.acc)));
                    self.state = State::Idle;
                }
            }
        }
    }

    /// Whether the character just appended completes the accumulator.
    fn terminated(&self, last: char) -> bool {
        let mut chars = self.acc.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return false,
        };

        if chars.next().is_none() {
            // One-character sequences: ESC-final dispatch. `P` is held
            // back because it introduces a device control string.
            return last.is_ascii_digit()
                || (last.is_ascii_alphabetic() && last != 'P')
                || matches!(last, '>' | '=' | '|' | '}' | '~');
        }

        match first {
            ']' => last == '\u{07}' || last == ST,
            'P' => last == ST,
            '@' => last == '0' || last == '1',
            // CSI-style, including intermediate-led sequences.
            _ => last.is_ascii_alphabetic() || matches!(last, '@' | '~' | '|' | '{'),
        }
    }
}

/// C0 or C1 control character.
fn is_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}
