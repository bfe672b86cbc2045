//! Terminal clipboard via the OSC 52 escape sequence.

use anyhow::{Context, Result};
use base64::Engine;
use std::io::Write;
use streettech_core::clipboard::Clipboard;

/// Escape sequence asking the terminal to set its clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

/// Writes clipboard requests to stdout; supporting terminals apply them.
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| out.flush())
            .context("write clipboard sequence")
    }
}
