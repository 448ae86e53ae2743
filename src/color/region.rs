//! UI region hit-testing
//!
//! Two fixed rectangles drive all interaction: the color strip near the top
//! of the frame and the brightness bar on the left. The pointer picks from
//! whichever one it is over; elsewhere nothing changes.

use crate::color::{GradientTable, Rgb};
use crate::config::Calibration;
use crate::tracking::Point;

/// Axis-aligned rectangle in frame pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiRegion {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl UiRegion {
    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// The same rectangle grown by `margin` above and below
    pub fn grown_vertically(&self, margin: f64) -> UiRegion {
        UiRegion {
            x: self.x,
            y: self.y - margin,
            width: self.width,
            height: self.height + 2.0 * margin,
        }
    }

    /// Whether two rectangles share any point
    pub fn intersects(&self, other: &UiRegion) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Outcome of one hit-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// The pointer is over neither region
    Unchanged,
    /// The pointer picked a color from the strip
    UpdatedColor(Rgb),
    /// The pointer picked a brightness level from the bar
    UpdatedBrightness(f64),
}

/// Hit-tests the color strip and brightness bar
#[derive(Debug, Clone)]
pub struct RegionSelector {
    color_strip: UiRegion,
    color_hit_area: UiRegion,
    brightness_bar: UiRegion,
    min_level: f64,
    gradient: GradientTable,
}

impl RegionSelector {
    /// Build the selector and its gradient table from calibrated settings
    pub fn new(calibration: &Calibration) -> Self {
        let color_strip = calibration.color_strip;
        Self {
            color_strip,
            color_hit_area: color_strip.grown_vertically(calibration.strip_hit_margin),
            brightness_bar: calibration.brightness_bar,
            min_level: calibration.min_level,
            gradient: GradientTable::new(calibration.gradient_samples()),
        }
    }

    /// The color strip rectangle (without the vertical margin)
    pub fn color_strip(&self) -> UiRegion {
        self.color_strip
    }

    /// The brightness bar rectangle
    pub fn brightness_bar(&self) -> UiRegion {
        self.brightness_bar
    }

    /// The gradient sampled by the color strip
    pub fn gradient(&self) -> &GradientTable {
        &self.gradient
    }

    /// Hit-test a smoothed pointer
    pub fn select(&self, pointer: Point) -> Selection {
        if self.color_hit_area.contains(pointer) {
            return Selection::UpdatedColor(self.color_at(pointer.x));
        }
        if self.brightness_bar.contains(pointer) {
            return Selection::UpdatedBrightness(self.brightness_level(pointer.y));
        }
        Selection::Unchanged
    }

    /// Gradient color under horizontal position `x`
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Offset is floored and clamped to be non-negative before the cast"
    )]
    pub fn color_at(&self, x: f64) -> Rgb {
        let offset = (x - self.color_strip.x).floor().max(0.0) as usize;
        self.gradient.sample(offset)
    }

    /// Brightness for vertical position `y`: full at the top of the bar,
    /// falling linearly to the floor at the bottom, clamped outside it
    pub fn brightness_level(&self, y: f64) -> f64 {
        let level = 1.0 - (y - self.brightness_bar.y) / self.brightness_bar.height;
        level.clamp(self.min_level, 1.0)
    }
}
