//! Serial wire format
//!
//! One ASCII line per frame: `R,G,B\n`, each channel a decimal integer in
//! 0–255 without leading zeros, red first. No checksum or other framing.

use crate::color::OutputFrame;
use std::fmt::Write as _;

/// Longest possible line: `255,255,255\n`
pub const MAX_LINE_LEN: usize = 12;

/// Encode an output frame as a serial line
pub fn encode(frame: OutputFrame) -> Vec<u8> {
    encode_line(frame).into_bytes()
}

/// Encode an output frame as a serial line, as text
pub fn encode_line(frame: OutputFrame) -> String {
    let mut line = String::with_capacity(MAX_LINE_LEN);
    // Writing into a String cannot fail
    let _ = writeln!(line, "{},{},{}", frame.r, frame.g, frame.b);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_off() {
        assert_eq!(encode(OutputFrame::OFF), b"0,0,0\n");
    }

    #[test]
    fn test_encode_red_green_blue_order() {
        let frame = OutputFrame { r: 255, g: 7, b: 80 };
        assert_eq!(encode_line(frame), "255,7,80\n");
    }

    #[test]
    fn test_longest_line() {
        let frame = OutputFrame { r: 255, g: 255, b: 255 };
        assert_eq!(encode(frame).len(), MAX_LINE_LEN);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every line parses back to the same channels, in order
            #[test]
            fn line_is_three_decimal_fields(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let line = encode_line(OutputFrame { r, g, b });
                prop_assert!(line.ends_with('\n'));
                prop_assert_eq!(line.matches('\n').count(), 1);
                let fields: Vec<&str> = line.trim_end().split(',').collect();
                prop_assert_eq!(fields.len(), 3);
                for (field, value) in fields.iter().zip([r, g, b]) {
                    prop_assert!(field.len() == 1 || !field.starts_with('0'));
                    prop_assert_eq!(field.parse::<u8>().unwrap(), value);
                }
            }
        }
    }
}
