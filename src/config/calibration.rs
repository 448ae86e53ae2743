//! Resolution scaling of the configured thresholds
//!
//! The stored configuration describes the UI at 1280x720. A [`Calibration`]
//! is the same configuration resolved into pixel space for the actual frame
//! size, computed once at startup and then treated as constant by the core.
//!
//! Scaling rules:
//! - horizontal quantities scale by `width / 1280`
//! - vertical quantities scale by `height / 720`
//! - distances (the fist span) scale by the ratio of frame diagonals

use crate::color::{Rgb, UiRegion};
use crate::config::models::{LightConfig, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::error::{GestureLightError, Result};
use std::time::Duration;

/// Largest accepted frame width or height
///
/// The gradient table holds one sample per strip pixel, so this also bounds
/// its size.
pub const MAX_FRAME_DIMENSION: u32 = 16_384;

/// Configuration resolved into pixel space for one frame size
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Frame width in pixels
    pub frame_width: f64,
    /// Frame height in pixels
    pub frame_height: f64,
    /// Mirror landmark x coordinates before use
    pub mirror_input: bool,
    /// Fist threshold in pixels
    pub fist_span_px: f64,
    /// Minimum time between strobe toggles
    pub strobe_interval: Duration,
    /// Pointer history length
    pub history_capacity: usize,
    /// Color strip rectangle
    pub color_strip: UiRegion,
    /// Vertical tolerance above and below the color strip
    pub strip_hit_margin: f64,
    /// Brightness bar rectangle
    pub brightness_bar: UiRegion,
    /// Lowest selectable brightness
    pub min_level: f64,
    /// Startup color
    pub initial_color: Rgb,
}

impl Calibration {
    /// Number of samples in the color gradient (one per strip pixel column)
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Strip width is a positive whole number of pixels by construction"
    )]
    pub fn gradient_samples(&self) -> usize {
        self.color_strip.width as usize
    }
}

impl LightConfig {
    /// Validate the configuration and scale it to the configured frame size
    pub fn calibrate(&self) -> Result<Calibration> {
        let frame = &self.frame;
        let strip = &self.color_strip;
        let bar = &self.brightness_bar;

        if frame.width == 0 || frame.height == 0 {
            return Err(invalid(format!(
                "frame size must be nonzero, got {}x{}",
                frame.width, frame.height
            )));
        }
        if frame.width > MAX_FRAME_DIMENSION || frame.height > MAX_FRAME_DIMENSION {
            return Err(invalid(format!(
                "frame size {}x{} exceeds the {MAX_FRAME_DIMENSION} pixel limit",
                frame.width, frame.height
            )));
        }
        if self.smoothing.history_capacity == 0 {
            return Err(invalid("pointer history capacity must be at least 1"));
        }
        if !(self.gesture.fist_span_px.is_finite() && self.gesture.fist_span_px > 0.0) {
            return Err(invalid(format!(
                "fist span threshold must be positive, got {}",
                self.gesture.fist_span_px
            )));
        }
        if strip.width == 0 || strip.height == 0 {
            return Err(invalid("color strip must have a nonzero size"));
        }
        if strip.width > REFERENCE_WIDTH {
            return Err(invalid(format!(
                "color strip width {} exceeds the reference frame width {REFERENCE_WIDTH}",
                strip.width
            )));
        }
        if bar.x_min >= bar.x_max || bar.y_min >= bar.y_max {
            return Err(invalid(format!(
                "brightness bar extents are not ordered: x {}..{}, y {}..{}",
                bar.x_min, bar.x_max, bar.y_min, bar.y_max
            )));
        }
        if !(bar.min_level > 0.0 && bar.min_level <= 1.0) {
            return Err(invalid(format!(
                "minimum brightness must be in (0, 1], got {}",
                bar.min_level
            )));
        }

        let width = f64::from(frame.width);
        let height = f64::from(frame.height);
        let sx = width / f64::from(REFERENCE_WIDTH);
        let sy = height / f64::from(REFERENCE_HEIGHT);
        let reference_diagonal = f64::from(REFERENCE_WIDTH).hypot(f64::from(REFERENCE_HEIGHT));
        let sd = width.hypot(height) / reference_diagonal;

        let strip_width = (f64::from(strip.width) * sx).round().max(1.0);
        let color_strip = UiRegion {
            x: ((width - strip_width) / 2.0).floor(),
            y: f64::from(strip.y_offset) * sy,
            width: strip_width,
            height: f64::from(strip.height) * sy,
        };

        let brightness_bar = UiRegion {
            x: f64::from(bar.x_min) * sx,
            y: f64::from(bar.y_min) * sy,
            width: f64::from(bar.x_max - bar.x_min) * sx,
            height: f64::from(bar.y_max - bar.y_min) * sy,
        };

        let strip_hit_margin = f64::from(strip.hit_margin) * sy;
        if color_strip
            .grown_vertically(strip_hit_margin)
            .intersects(&brightness_bar)
        {
            return Err(invalid(
                "color strip and brightness bar overlap; a pointer could hit both",
            ));
        }

        Ok(Calibration {
            frame_width: width,
            frame_height: height,
            mirror_input: frame.mirror_input,
            fist_span_px: self.gesture.fist_span_px * sd,
            strobe_interval: Duration::from_millis(self.gesture.strobe_interval_ms),
            history_capacity: self.smoothing.history_capacity,
            color_strip,
            strip_hit_margin,
            brightness_bar,
            min_level: bar.min_level,
            initial_color: Rgb::from(self.initial_color),
        })
    }
}

fn invalid(reason: impl Into<String>) -> GestureLightError {
    GestureLightError::InvalidCalibration(reason.into())
}
