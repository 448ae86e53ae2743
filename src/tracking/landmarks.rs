//! Hand landmark input types
//!
//! The detector reports 21 keypoints per hand in normalized image
//! coordinates. The core converts the few it needs into frame pixels.

use crate::error::{GestureLightError, Result};
use serde::{Deserialize, Serialize};

/// Number of keypoints in one hand landmark set
pub const LANDMARK_COUNT: usize = 21;

/// Wrist keypoint
pub const WRIST: usize = 0;
/// Index fingertip, also the pointer
pub const INDEX_TIP: usize = 8;
/// Middle fingertip
pub const MIDDLE_TIP: usize = 12;
/// Ring fingertip
pub const RING_TIP: usize = 16;

/// A 2-D point. Normalized in a [`LandmarkSet`], pixels everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// The 21 keypoints of one detected hand, normalized to the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Wrap a full set of keypoints
    pub const fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a set from a slice, which must hold exactly 21 points
    pub fn from_slice(points: &[Point]) -> Result<Self> {
        let points: [Point; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            GestureLightError::MalformedFrame(format!(
                "expected {LANDMARK_COUNT} landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self { points })
    }

    /// All keypoints in detector order
    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    /// One keypoint scaled to frame pixels
    ///
    /// With `mirror` set the x axis is flipped first, matching a
    /// selfie-style view of the camera image.
    pub fn pixel(&self, index: usize, frame_width: f64, frame_height: f64, mirror: bool) -> Point {
        let p = self.points[index];
        let x = if mirror { 1.0 - p.x } else { p.x };
        Point::new(x * frame_width, p.y * frame_height)
    }
}
