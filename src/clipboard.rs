//! Clipboard access through the terminal (OSC 52)

use std::io::{self, Write};

use base64::Engine;

/// Escape sequence asking the terminal to put `text` on the system clipboard
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", encoded)
}

/// Write the OSC 52 sequence for `text` to `out`
pub fn copy_to_terminal<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_copy_writes_sequence() {
        let mut out = Vec::new();
        copy_to_terminal(&mut out, "interface A {\n}").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
    }
}
