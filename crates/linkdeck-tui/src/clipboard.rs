//! Clipboard writes through the terminal's OSC 52 escape sequence.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// OSC 52 "set clipboard" sequence for `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Write `text` to the clipboard of the terminal behind `out`.
pub fn copy_via_osc52<W: Write>(out: &mut W, text: &str) -> Result<(), String> {
    out.write_all(osc52_sequence(text).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|err| format!("clipboard write failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x1b\\");
    }

    #[test]
    fn copy_writes_sequence() {
        let mut out = Vec::new();
        assert!(copy_via_osc52(&mut out, "http://a").is_ok());
        assert_eq!(out, osc52_sequence("http://a").into_bytes());
    }

    #[test]
    fn write_failure_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = copy_via_osc52(&mut Broken, "x").err();
        assert_eq!(err.as_deref(), Some("clipboard write failed: closed"));
    }
}
