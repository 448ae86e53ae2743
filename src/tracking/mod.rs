//! Hand tracking module
//!
//! Everything between the external landmark detector and the color logic:
//!
//! - `LandmarkSet` / `Point`: the detector's per-frame output
//! - `LandmarkFeed`: background reader that turns JSON lines into `FrameEvent`s
//! - `GestureDetector`: fist classification and the strobe timer
//! - `PointerSmoother`: moving average over the index fingertip
//!
//! # Event Flow
//!
//! ```text
//! detector → JSON lines → LandmarkFeed → FrameEvent → ControlLoop
//! ```

pub mod feed;
pub mod gesture;
pub mod landmarks;
pub mod smoother;

pub use feed::{FeedStats, FrameEvent, LandmarkFeed, parse_frame_line};
pub use gesture::{GestureDetector, GestureReading, StrobeState};
pub use landmarks::{INDEX_TIP, LANDMARK_COUNT, LandmarkSet, MIDDLE_TIP, Point, RING_TIP, WRIST};
pub use smoother::PointerSmoother;
