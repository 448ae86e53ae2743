//! Control loop module
//!
//! Coordinates gesture detection, pointer smoothing, region selection, color
//! computation and serial output, one camera frame at a time.
//!
//! # Overview
//!
//! The control loop is the single owner of all mutable state:
//! - **`ControllerState`**: color, brightness and strobe
//! - **Pointer history**: the `PointerSmoother`
//! - **Tracking state**: `NoHand` or `HandTracked`
//!
//! Nothing else writes to any of it, and every write happens inside
//! `process_frame`, so no locking is involved.
//!
//! # Event Flow
//!
//! ```text
//! FrameEvent → GestureDetector → PointerSmoother → RegionSelector
//!                                                        ↓
//!            transport ← SerialEncoder ← ColorCompute ← ControllerState
//!                                                        ↓
//!                                                  DisplayState → renderer
//! ```
//!
//! # Hand Loss
//!
//! Losing the hand changes nothing but the tracking state. Color, brightness,
//! strobe and the pointer history all hold their last values and the device
//! keeps receiving the same line every frame. A hand that disappears while
//! the strobe is on leaves it on until the hand comes back open.

pub mod control_loop;

pub use control_loop::{ControlLoop, ControllerState, DisplayState, LoopStats, TrackingState};
