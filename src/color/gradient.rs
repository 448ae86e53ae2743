//! Rainbow lookup table for the color strip
//!
//! Sample `i` of a table with `n` samples has hue `360 * i / n` degrees at
//! full saturation and value, so the strip runs red → yellow → green → cyan
//! → blue → magenta from left to right.

use crate::color::Rgb;

/// Convert a hue in degrees (full saturation and value) to RGB
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Channel values are clamped to 0..=255 before the cast"
)]
pub fn hue_to_rgb(hue_deg: f64) -> Rgb {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    let (r, g, b) = match h.floor() as u8 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Precomputed hue sweep, one sample per strip pixel column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientTable {
    samples: Vec<Rgb>,
}

impl GradientTable {
    /// Build a table of `width` samples; zero is treated as one
    #[expect(
        clippy::cast_precision_loss,
        reason = "Strip widths are a few thousand pixels at most"
    )]
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        let samples = (0..width)
            .map(|i| hue_to_rgb(360.0 * i as f64 / width as f64))
            .collect();
        Self { samples }
    }

    /// Color at `offset`, clamped to the last sample
    pub fn sample(&self, offset: usize) -> Rgb {
        let index = offset.min(self.samples.len() - 1);
        self.samples[index]
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples from left to right
    pub fn as_slice(&self) -> &[Rgb] {
        &self.samples
    }
}
