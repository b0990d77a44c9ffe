//! OSC dispatch: window caption and palette programming.

use crate::color::parse_color_spec;
use crate::error::SequenceError;
use crate::event::{Event, EventListener};
use crate::term::Term;

impl<T: EventListener> Term<T> {
    /// Dispatches an OSC body (terminator still attached).
    pub(super) fn osc_dispatch(&mut self, body: &str) -> Result<(), SequenceError> {
        let body = match body.strip_suffix('\u{07}') {
            Some(b) => b,
            None => body.strip_suffix('\u{9c}').unwrap_or(body),
        };

        let (code, rest) = body.split_once(';').unwrap_or((body, ""));
        match code {
            // Caption changes are applied by the embedder once the
            // input lock has been released.
            "0" | "2" => {
                self.title = rest.to_string();
                self.listener.send_event(Event::Title(rest.to_string()));
                Ok(())
            }
            // Icon name: accepted, ignored.
            "1" => Ok(()),
            "4" => self.osc_set_palette(rest),
            _ => Err(SequenceError::Unsupported(format!("]{code}"))),
        }
    }

    /// OSC 4: consume `index ; spec` pairs, installing each in turn.
    fn osc_set_palette(&mut self, body: &str) -> Result<(), SequenceError> {
        let mut fields = body.split(';');
        loop {
            let index = match fields.next() {
                Some(f) => f,
                None => return Ok(()),
            };
            if index.is_empty() && fields.clone().next().is_none() {
                return Ok(());
            }
            let spec = fields
                .next()
                .ok_or_else(|| SequenceError::Unknown(format!("]4;{body}")))?;

            let index: u8 = index
                .parse()
                .map_err(|_| SequenceError::Unknown(format!("]4;{body}")))?;
            let rgb = parse_color_spec(spec)
                .ok_or_else(|| SequenceError::Unknown(format!("]4;{body}")))?;

            // Overwrites take effect immediately; indexed cells pick up
            // the new value with no cell mutation.
            self.palette.set_color(index, rgb);
            self.listener.send_event(Event::PaletteChanged(index, rgb));
        }
    }
}
