//! `gesturelight` - Hand-gesture control of a serial RGB light
//!
//! Consumes hand landmarks from an external tracker, one set per camera
//! frame, and drives a lighting device over a serial line:
//! - point at the color strip to pick a hue
//! - point at the brightness bar to dim
//! - hold a fist to strobe
//!
//! `ControlLoop` runs the whole pipeline per frame on a single thread;
//! `LandmarkFeed` reads tracker output on a background thread.

// Module declarations
pub mod color;
pub mod config;
pub mod controller;
pub mod device;
pub mod error;
pub mod tracking;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{GestureLightError, Result};
