//! Remote mirror wire protocol.
//!
//! Text frames understood by the browser client, one frame per
//! notification, split across two channels:
//!
//! ```text
//! presentation channel          sound channel
//! ────────────────────          ─────────────
//! MORSE:<word>                  START
//! TRANSLATE:<text>              STOP
//! CLEAR
//! ```
//!
//! This module only formats frames into caller-provided buffers; the
//! transport (WebSocket fan-out, retries, client lifecycle) is an
//! external collaborator. No allocation, no_std-clean.

use crate::mirror::Pulse;
use crate::word::WORD_CAPACITY;

/// Pending-word frame prefix.
pub const MORSE_PREFIX: &str = "MORSE:";

/// Decoded-text frame prefix.
pub const TRANSLATE_PREFIX: &str = "TRANSLATE:";

/// Reset frame (no payload).
pub const CLEAR_FRAME: &str = "CLEAR";

/// Sound-channel frame for a start pulse.
pub const START_FRAME: &str = "START";

/// Sound-channel frame for a stop pulse.
pub const STOP_FRAME: &str = "STOP";

/// Largest frame this crate produces: the longest prefix plus a
/// full-capacity word payload.
pub const MAX_FRAME_LEN: usize = TRANSLATE_PREFIX.len() + WORD_CAPACITY;

/// Format a pending-word frame. Returns bytes written.
pub fn frame_word(word: &str, out: &mut [u8]) -> usize {
    write_frame(MORSE_PREFIX, word, out)
}

/// Format a decoded-text frame. Returns bytes written.
pub fn frame_translation(text: &str, out: &mut [u8]) -> usize {
    write_frame(TRANSLATE_PREFIX, text, out)
}

/// Sound-channel frame for a pulse.
pub const fn pulse_frame(pulse: Pulse) -> &'static str {
    match pulse {
        Pulse::Start => START_FRAME,
        Pulse::Stop => STOP_FRAME,
    }
}

/// Copy `prefix` then `body` into `out`, truncating the body (never the
/// prefix boundary mid-byte) if the buffer is short.
fn write_frame(prefix: &str, body: &str, out: &mut [u8]) -> usize {
    let mut pos = 0;
    for &b in prefix.as_bytes().iter().chain(body.as_bytes()) {
        if pos >= out.len() {
            break;
        }
        out[pos] = b;
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_frame() {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame_word(".- -...", &mut buf);
        assert_eq!(&buf[..len], b"MORSE:.- -...");
    }

    #[test]
    fn test_translation_frame() {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame_translation("AB", &mut buf);
        assert_eq!(&buf[..len], b"TRANSLATE:AB");
    }

    #[test]
    fn test_empty_payload_frames() {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame_word("", &mut buf);
        assert_eq!(&buf[..len], b"MORSE:");
    }

    #[test]
    fn test_pulse_frames() {
        assert_eq!(pulse_frame(Pulse::Start), "START");
        assert_eq!(pulse_frame(Pulse::Stop), "STOP");
    }

    #[test]
    fn test_truncation() {
        let mut buf = [0u8; 8];
        let len = frame_word("...---...", &mut buf);
        assert_eq!(len, 8);
        assert_eq!(&buf[..len], b"MORSE:..");
    }

    #[test]
    fn test_max_frame_len_covers_full_word() {
        let bytes = [b'.'; WORD_CAPACITY];
        let word = core::str::from_utf8(&bytes).unwrap();
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame_word(word, &mut buf);
        assert_eq!(len, MORSE_PREFIX.len() + WORD_CAPACITY);
    }
}
