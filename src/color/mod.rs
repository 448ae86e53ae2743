//! Color selection and output module
//!
//! Turns a pointer position into color/brightness picks and combines them
//! with the strobe flag into the frame sent to the device.
//!
//! # Channel Order
//!
//! Every color in the crate is red, green, blue, in that order: the startup
//! color, the gradient table, [`Rgb`], [`OutputFrame`] and the serial line.
//! There is no conversion step anywhere between them.
//!
//! # Architecture
//!
//! - `GradientTable`: precomputed hue sweep sampled by the color strip
//! - `RegionSelector`: hit-tests the color strip and brightness bar
//! - `compute_output`: applies brightness and strobe

pub mod compute;
pub mod gradient;
pub mod region;

pub use compute::{OutputFrame, compute_output};
pub use gradient::{GradientTable, hue_to_rgb};
pub use region::{RegionSelector, Selection, UiRegion};

use serde::{Deserialize, Serialize};

/// An 8-bit color in red, green, blue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}
