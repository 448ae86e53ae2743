//! Configuration data models
//!
//! All pixel quantities are expressed at the reference resolution
//! ([`REFERENCE_WIDTH`] x [`REFERENCE_HEIGHT`]) and scaled to the real frame by
//! [`LightConfig::calibrate`].

use serde::{Deserialize, Serialize};

/// Frame width the pixel thresholds were tuned against
pub const REFERENCE_WIDTH: u32 = 1280;
/// Frame height the pixel thresholds were tuned against
pub const REFERENCE_HEIGHT: u32 = 720;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Camera frame geometry
    pub frame: FrameSettings,
    /// Fist detection and strobe timing
    pub gesture: GestureSettings,
    /// Pointer smoothing
    pub smoothing: SmoothingSettings,
    /// Color strip hit region
    pub color_strip: ColorStripSettings,
    /// Brightness bar hit region
    pub brightness_bar: BrightnessBarSettings,
    /// Color at startup, in red, green, blue order
    pub initial_color: [u8; 3],
    /// Serial link to the lighting device
    pub serial: SerialSettings,
}

/// Camera frame geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Mirror landmark x coordinates (x -> 1 - x) before use
    pub mirror_input: bool,
}

/// Fist detection and strobe timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Average wrist-to-fingertip span below which the hand counts as a fist
    pub fist_span_px: f64,
    /// Minimum time between strobe toggles while fisted
    pub strobe_interval_ms: u64,
}

/// Pointer smoothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingSettings {
    /// Number of recent fingertip samples averaged into the pointer
    pub history_capacity: usize,
}

/// Color strip geometry (horizontally centered in the frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorStripSettings {
    /// Strip width, also the number of gradient samples at reference size
    pub width: u32,
    /// Strip height
    pub height: u32,
    /// Distance from the top of the frame
    pub y_offset: u32,
    /// Extra vertical tolerance above and below the strip
    pub hit_margin: u32,
}

/// Brightness bar geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightnessBarSettings {
    /// Left edge
    pub x_min: u32,
    /// Right edge
    pub x_max: u32,
    /// Top edge (full brightness)
    pub y_min: u32,
    /// Bottom edge (minimum brightness)
    pub y_max: u32,
    /// Lowest selectable brightness level
    pub min_level: f64,
}

/// Serial link to the lighting device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    /// Device node, e.g. `/dev/ttyACM0`. `None` runs in simulation mode.
    pub port: Option<String>,
    /// Baud rate the device firmware expects
    pub baud_rate: u32,
    /// Time to wait after opening the port before the first write
    pub settle_delay_ms: u64,
    /// Longest a single line write may block before it counts as failed
    pub write_timeout_ms: u64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            frame: FrameSettings::default(),
            gesture: GestureSettings::default(),
            smoothing: SmoothingSettings::default(),
            color_strip: ColorStripSettings::default(),
            brightness_bar: BrightnessBarSettings::default(),
            initial_color: [0, 255, 255],
            serial: SerialSettings::default(),
        }
    }
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            mirror_input: false,
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            fist_span_px: 130.0,
            strobe_interval_ms: 80,
        }
    }
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            history_capacity: 8,
        }
    }
}

impl Default for ColorStripSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 25,
            y_offset: 50,
            hit_margin: 30,
        }
    }
}

impl Default for BrightnessBarSettings {
    fn default() -> Self {
        Self {
            x_min: 10,
            x_max: 110,
            y_min: 200,
            y_max: 550,
            min_level: 0.05,
        }
    }
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 9600,
            settle_delay_ms: 2000,
            write_timeout_ms: 500,
        }
    }
}
