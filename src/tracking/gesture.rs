//! Fist detection and the strobe timer
//!
//! A hand counts as a fist when the average distance from the wrist to the
//! index, middle and ring fingertips drops below a calibrated threshold.
//! While the fist is held the strobe flips at most once per interval; opening
//! the hand forces the strobe off.

use crate::config::Calibration;
use crate::tracking::landmarks::{INDEX_TIP, LandmarkSet, MIDDLE_TIP, Point, RING_TIP, WRIST};
use std::time::{Duration, Instant};
use tracing::debug;

/// Strobe flag plus the time of its last flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrobeState {
    /// Whether the light is currently blanked by the strobe
    pub is_strobe: bool,
    /// When the flag last flipped while fisted; `None` before the first flip
    pub last_toggle: Option<Instant>,
}

/// Result of classifying one landmark set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureReading {
    /// Whether the hand is closed
    pub fist_active: bool,
    /// Average wrist-to-fingertip distance in pixels
    pub avg_span: f64,
    /// Whether the strobe flag changed during this classification
    pub strobe_changed: bool,
}

/// Classifies hands as fist/open and drives the strobe timer
#[derive(Debug, Clone)]
pub struct GestureDetector {
    fist_span_px: f64,
    strobe_interval: Duration,
    frame_width: f64,
    frame_height: f64,
    mirror_input: bool,
}

impl GestureDetector {
    /// Create a detector from calibrated settings
    pub fn new(calibration: &Calibration) -> Self {
        Self {
            fist_span_px: calibration.fist_span_px,
            strobe_interval: calibration.strobe_interval,
            frame_width: calibration.frame_width,
            frame_height: calibration.frame_height,
            mirror_input: calibration.mirror_input,
        }
    }

    /// Fist threshold in pixels
    pub fn fist_span_px(&self) -> f64 {
        self.fist_span_px
    }

    /// Average pixel distance from the wrist to the three fingertips
    pub fn average_span(&self, landmarks: &LandmarkSet) -> f64 {
        let root = self.pixel(landmarks, WRIST);
        let total: f64 = [INDEX_TIP, MIDDLE_TIP, RING_TIP]
            .into_iter()
            .map(|tip| root.distance(self.pixel(landmarks, tip)))
            .sum();
        total / 3.0
    }

    /// Strict comparison against the threshold
    pub fn is_fist_span(&self, avg_span: f64) -> bool {
        avg_span < self.fist_span_px
    }

    /// Classify a hand and update the strobe state
    pub fn classify(
        &self,
        landmarks: &LandmarkSet,
        strobe: &mut StrobeState,
        now: Instant,
    ) -> GestureReading {
        let avg_span = self.average_span(landmarks);
        let fist_active = self.is_fist_span(avg_span);
        let before = strobe.is_strobe;

        if fist_active {
            self.advance_strobe(strobe, now);
        } else {
            strobe.is_strobe = false;
        }

        let strobe_changed = before != strobe.is_strobe;
        if strobe_changed {
            debug!(
                "Strobe {} (avg span {:.1}px)",
                if strobe.is_strobe { "ON" } else { "OFF" },
                avg_span
            );
        }

        GestureReading {
            fist_active,
            avg_span,
            strobe_changed,
        }
    }

    /// Flip the strobe if more than one interval has passed since the last flip
    fn advance_strobe(&self, strobe: &mut StrobeState, now: Instant) {
        let due = match strobe.last_toggle {
            None => true,
            Some(mark) => now.saturating_duration_since(mark) > self.strobe_interval,
        };
        if due {
            strobe.is_strobe = !strobe.is_strobe;
            strobe.last_toggle = Some(now);
        }
    }

    fn pixel(&self, landmarks: &LandmarkSet, index: usize) -> Point {
        landmarks.pixel(index, self.frame_width, self.frame_height, self.mirror_input)
    }
}
