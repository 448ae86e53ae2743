//! Shared test utilities for `gesturelight` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::config::manager::HOME_ENV_VAR;
use crate::tracking::{LANDMARK_COUNT, LandmarkSet, Point};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify `GESTURELIGHT_HOME`.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `GESTURELIGHT_HOME` at a temp directory for a test
/// scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because other
/// threads may read the environment concurrently. The guard holds
/// `HOME_LOCK` for its whole lifetime, so tests touching the variable run
/// one at a time, and each test gets its own `TempDir`.
pub struct HomeGuard {
    original: Option<String>,
    // Held for the lifetime of the guard
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a process-wide lock"
)]
impl HomeGuard {
    /// Create a new guard that sets `GESTURELIGHT_HOME` to the given temp directory.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = HOME_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(HOME_ENV_VAR).ok();
        // SAFETY: HOME_LOCK is held, so no other test reads or writes the
        // variable until this guard is dropped.
        unsafe {
            std::env::set_var(HOME_ENV_VAR, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a process-wide lock"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: HOME_LOCK is still held by this guard.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(HOME_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(HOME_ENV_VAR);
            }
        }
    }
}

/// Build a landmark set with the wrist at `wrist` and the index, middle and
/// ring fingertips placed `span_px` pixels straight above it in a
/// 1280x720 frame. Every other landmark sits on the wrist.
///
/// The index fingertip (landmark 8) is the pointer, so the smoothed pointer
/// for a single frame is `(wrist.x, wrist.y - span_px)` in pixels.
pub fn hand_with_span(wrist_px: Point, span_px: f64) -> LandmarkSet {
    let wrist = Point::new(wrist_px.x / 1280.0, wrist_px.y / 720.0);
    let tip = Point::new(wrist_px.x / 1280.0, (wrist_px.y - span_px) / 720.0);
    let mut points = [wrist; LANDMARK_COUNT];
    for index in [8, 12, 16] {
        points[index] = tip;
    }
    LandmarkSet::new(points)
}

/// Build an open hand (span well above the fist threshold) whose index
/// fingertip lands on `pointer_px` in a 1280x720 frame.
pub fn open_hand_pointing_at(pointer_px: Point) -> LandmarkSet {
    const SPAN: f64 = 300.0;
    // Wrist below the fingertip, or above it near the bottom edge
    let wrist_y = if pointer_px.y + SPAN <= 720.0 {
        pointer_px.y + SPAN
    } else {
        pointer_px.y - SPAN
    };
    let wrist = Point::new(pointer_px.x / 1280.0, wrist_y / 720.0);
    let tip = Point::new(pointer_px.x / 1280.0, pointer_px.y / 720.0);
    let mut points = [wrist; LANDMARK_COUNT];
    for index in [8, 12, 16] {
        points[index] = tip;
    }
    LandmarkSet::new(points)
}

/// Build a closed fist (span 50 px) with the wrist at `wrist_px`.
pub fn fist_at(wrist_px: Point) -> LandmarkSet {
    hand_with_span(wrist_px, 50.0)
}

/// Sanity check used by a few tests: the fixture keeps every landmark in the
/// unit square.
pub fn assert_in_unit_square(set: &LandmarkSet) {
    for p in set.points() {
        assert!((0.0..=1.0).contains(&p.x), "x out of range: {}", p.x);
        assert!((0.0..=1.0).contains(&p.y), "y out of range: {}", p.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_stay_in_unit_square() {
        assert_in_unit_square(&hand_with_span(Point::new(640.0, 500.0), 129.9));
        assert_in_unit_square(&fist_at(Point::new(0.0, 50.0)));
        assert_in_unit_square(&open_hand_pointing_at(Point::new(1280.0, 0.0)));
        // Near the bottom edge the wrist flips above the fingertip
        assert_in_unit_square(&open_hand_pointing_at(Point::new(60.0, 700.0)));
    }

    #[test]
    fn test_open_hand_fingertip_lands_on_pointer() {
        for pointer in [Point::new(240.0, 60.0), Point::new(60.0, 700.0)] {
            let hand = open_hand_pointing_at(pointer);
            let tip = hand.pixel(crate::tracking::INDEX_TIP, 1280.0, 720.0, false);
            assert!((tip.x - pointer.x).abs() < 1e-9);
            assert!((tip.y - pointer.y).abs() < 1e-9);
        }
    }
}
