//! Final color computation

use crate::color::Rgb;

/// The color actually sent to the device for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFrame {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl OutputFrame {
    /// All channels off
    pub const OFF: OutputFrame = OutputFrame { r: 0, g: 0, b: 0 };
}

impl From<OutputFrame> for Rgb {
    fn from(f: OutputFrame) -> Self {
        Rgb::new(f.r, f.g, f.b)
    }
}

/// Combine color, brightness and strobe into the output frame
///
/// The strobe blanks the output entirely; otherwise each channel is scaled by
/// `brightness` and rounded to the nearest integer.
pub fn compute_output(color: Rgb, brightness: f64, strobe: bool) -> OutputFrame {
    if strobe {
        return OutputFrame::OFF;
    }
    OutputFrame {
        r: scale_channel(color.r, brightness),
        g: scale_channel(color.g, brightness),
        b: scale_channel(color.b, brightness),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Value is clamped to 0..=255 before the cast"
)]
fn scale_channel(channel: u8, brightness: f64) -> u8 {
    (f64::from(channel) * brightness).round().clamp(0.0, 255.0) as u8
}
