//! Per-frame control loop
//!
//! Owns every piece of mutable state in the core and runs the full pipeline
//! once per camera frame.

use crate::color::{
    OutputFrame, RegionSelector, Rgb, Selection, UiRegion, compute_output,
};
use crate::config::Calibration;
use crate::device::{LightTransport, SimulatedTransport, encode_line};
use crate::tracking::{
    FrameEvent, GestureDetector, INDEX_TIP, LandmarkSet, Point, PointerSmoother, StrobeState,
};
use std::sync::mpsc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Whether the current frame has a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// No hand in the frame; all state is held
    #[default]
    NoHand,
    /// A hand is being tracked
    HandTracked,
}

/// Color, brightness and strobe: everything the output depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Current color pick
    pub color: Rgb,
    /// Current brightness in `[min_level, 1.0]`
    pub brightness: f64,
    /// Strobe flag and timer
    pub strobe: StrobeState,
}

impl ControllerState {
    /// Startup state: the given color at full brightness, strobe off
    pub fn new(initial_color: Rgb) -> Self {
        Self {
            color: initial_color,
            brightness: 1.0,
            strobe: StrobeState::default(),
        }
    }

    /// Apply a region pick
    pub fn apply(&mut self, selection: Selection) {
        match selection {
            Selection::Unchanged => {}
            Selection::UpdatedColor(color) => self.color = color,
            Selection::UpdatedBrightness(level) => self.brightness = level,
        }
    }

    /// The frame this state produces
    pub fn output(&self) -> OutputFrame {
        compute_output(self.color, self.brightness, self.strobe.is_strobe)
    }
}

/// Snapshot handed to the renderer after every frame
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// Hand present or not
    pub tracking: TrackingState,
    /// Smoothed pointer in frame pixels, if a hand was ever seen
    pub pointer: Option<Point>,
    /// Whether the hand in this frame is a fist
    pub fist_active: bool,
    /// Region pick made this frame
    pub selection: Selection,
    /// Current color pick
    pub color: Rgb,
    /// Current brightness
    pub brightness: f64,
    /// Strobe flag
    pub strobe: bool,
    /// Frame sent to the device
    pub output: OutputFrame,
    /// Encoded serial line
    pub line: String,
    /// Brightness as the whole percentage shown in the HUD
    pub power_percent: u8,
    /// Top edge of the brightness fill bar, in frame pixels
    pub bar_fill_top: i32,
    /// Fill color of the brightness bar: black while strobing
    pub bar_color: Rgb,
}

/// Counters for the lifetime of the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames processed
    pub frames: u64,
    /// Frames with a hand
    pub hand_frames: u64,
    /// Frames that picked a color
    pub color_picks: u64,
    /// Frames that picked a brightness
    pub brightness_picks: u64,
    /// Failed writes to the device
    pub transport_failures: u64,
}

/// Runs gesture detection, smoothing, selection, color compute and
/// transmission once per frame
pub struct ControlLoop {
    calibration: Calibration,
    detector: GestureDetector,
    smoother: PointerSmoother,
    selector: RegionSelector,
    state: ControllerState,
    tracking: TrackingState,
    fist_active: bool,
    transport: Box<dyn LightTransport>,
    display_sender: Option<mpsc::SyncSender<DisplayState>>,
    stats: LoopStats,
}

impl ControlLoop {
    /// Create a loop for `calibration` that sends frames to `transport`
    pub fn new(calibration: Calibration, transport: Box<dyn LightTransport>) -> Self {
        info!(
            "Control loop ready: {}x{} frame, fist below {:.1}px, output to {}",
            calibration.frame_width,
            calibration.frame_height,
            calibration.fist_span_px,
            transport.describe()
        );

        Self {
            detector: GestureDetector::new(&calibration),
            smoother: PointerSmoother::new(calibration.history_capacity),
            selector: RegionSelector::new(&calibration),
            state: ControllerState::new(calibration.initial_color),
            tracking: TrackingState::NoHand,
            fist_active: false,
            transport,
            display_sender: None,
            stats: LoopStats::default(),
            calibration,
        }
    }

    /// Also publish a [`DisplayState`] per frame on `sender`
    ///
    /// Publishing never blocks: if the renderer falls behind, snapshots are
    /// dropped.
    #[must_use]
    pub fn with_display_sender(mut self, sender: mpsc::SyncSender<DisplayState>) -> Self {
        self.display_sender = Some(sender);
        self
    }

    /// Current color, brightness and strobe
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Hand present in the last frame or not
    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    /// Whether the most recently tracked hand was a fist
    ///
    /// Frames without a hand leave this unchanged.
    pub fn fist_held(&self) -> bool {
        self.fist_active
    }

    /// Pointer history
    pub fn smoother(&self) -> &PointerSmoother {
        &self.smoother
    }

    /// Color strip geometry
    pub fn color_strip(&self) -> UiRegion {
        self.selector.color_strip()
    }

    /// Brightness bar geometry
    pub fn brightness_bar(&self) -> UiRegion {
        self.selector.brightness_bar()
    }

    /// Whether frames currently go nowhere
    pub fn is_simulated(&self) -> bool {
        self.transport.is_simulated()
    }

    /// Counters so far
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Process one frame
    ///
    /// Without a hand, gesture detection, smoothing and selection are
    /// skipped and the previous state carries over. The output is computed
    /// and sent either way.
    pub fn process_frame(&mut self, landmarks: Option<&LandmarkSet>, now: Instant) -> DisplayState {
        self.stats.frames += 1;
        self.update_tracking(landmarks.is_some());

        let mut selection = Selection::Unchanged;
        let mut fist_active = false;

        if let Some(landmarks) = landmarks {
            self.stats.hand_frames += 1;

            let reading = self.detector.classify(landmarks, &mut self.state.strobe, now);
            fist_active = reading.fist_active;
            if fist_active != self.fist_active {
                info!("Fist {}", if fist_active { "closed" } else { "opened" });
                self.fist_active = fist_active;
            }

            let fingertip = landmarks.pixel(
                INDEX_TIP,
                self.calibration.frame_width,
                self.calibration.frame_height,
                self.calibration.mirror_input,
            );
            self.smoother.push(fingertip);

            if let Some(pointer) = self.smoother.current() {
                selection = self.selector.select(pointer);
                self.record_selection(selection);
                self.state.apply(selection);
            }
        }

        let output = self.state.output();
        let line = encode_line(output);
        self.transmit(line.as_bytes());

        let display = self.display_state(selection, fist_active, output, line);
        self.publish(&display);
        display
    }

    /// Consume frame events until the feed disconnects
    pub fn run(&mut self, receiver: &mpsc::Receiver<FrameEvent>) -> LoopStats {
        info!("Entering control loop");
        loop {
            match receiver.recv() {
                Ok(event) => {
                    self.process_frame(event.landmarks.as_ref(), event.captured_at);
                }
                Err(mpsc::RecvError) => {
                    info!("Frame feed disconnected. Exiting control loop.");
                    break;
                }
            }
        }
        info!(
            "Control loop exited after {} frames ({} with a hand)",
            self.stats.frames, self.stats.hand_frames
        );
        self.stats
    }

    fn update_tracking(&mut self, hand_present: bool) {
        let next = if hand_present {
            TrackingState::HandTracked
        } else {
            TrackingState::NoHand
        };
        if next != self.tracking {
            match next {
                TrackingState::HandTracked => info!("Hand acquired"),
                TrackingState::NoHand => info!("Hand lost, holding last state"),
            }
            self.tracking = next;
        }
    }

    fn record_selection(&mut self, selection: Selection) {
        match selection {
            Selection::Unchanged => {}
            Selection::UpdatedColor(color) => {
                self.stats.color_picks += 1;
                if color != self.state.color {
                    debug!("Color picked: {},{},{}", color.r, color.g, color.b);
                }
            }
            Selection::UpdatedBrightness(level) => {
                self.stats.brightness_picks += 1;
                if (level - self.state.brightness).abs() > f64::EPSILON {
                    debug!("Brightness picked: {:.2}", level);
                }
            }
        }
    }

    /// Send a line; on failure fall back to simulation mode for the rest of
    /// the session
    fn transmit(&mut self, line: &[u8]) {
        if let Err(e) = self.transport.send(line) {
            self.stats.transport_failures += 1;
            error!(
                "Failed to write to {}: {}. Switching to simulation mode",
                self.transport.describe(),
                e
            );
            self.transport = Box::new(SimulatedTransport::new());
        }
    }

    fn publish(&mut self, display: &DisplayState) {
        let Some(sender) = &self.display_sender else {
            return;
        };
        match sender.try_send(display.clone()) {
            Ok(()) | Err(mpsc::TrySendError::Full(_)) => {}
            Err(mpsc::TrySendError::Disconnected(_)) => {
                warn!("Display receiver disconnected; no longer publishing display state");
                self.display_sender = None;
            }
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Brightness is in [0, 1] and the bar lies inside the frame"
    )]
    fn display_state(
        &self,
        selection: Selection,
        fist_active: bool,
        output: OutputFrame,
        line: String,
    ) -> DisplayState {
        let brightness = self.state.brightness;
        let bar = self.selector.brightness_bar();
        let strobe = self.state.strobe.is_strobe;

        DisplayState {
            tracking: self.tracking,
            pointer: self.smoother.current(),
            fist_active,
            selection,
            color: self.state.color,
            brightness,
            strobe,
            output,
            line,
            power_percent: (brightness * 100.0).floor().clamp(0.0, 100.0) as u8,
            bar_fill_top: (bar.bottom() - brightness * bar.height).trunc() as i32,
            bar_color: if strobe { Rgb::BLACK } else { self.state.color },
        }
    }
}
