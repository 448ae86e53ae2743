//! Configuration management module
//!
//! Startup configuration lives in `$GESTURELIGHT_HOME/config.json` and is
//! written atomically. Only the static setup (frame geometry, thresholds,
//! serial port) is stored here; the color, brightness and strobe picked at
//! runtime are never persisted.

pub mod calibration;
pub mod manager;
pub mod models;

pub use calibration::{Calibration, MAX_FRAME_DIMENSION};
pub use manager::ConfigManager;
pub use models::{
    BrightnessBarSettings, ColorStripSettings, FrameSettings, GestureSettings, LightConfig,
    REFERENCE_HEIGHT, REFERENCE_WIDTH, SerialSettings, SmoothingSettings,
};
