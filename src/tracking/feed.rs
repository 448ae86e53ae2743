//! Landmark feed reader
//!
//! Reads hand-tracker output as JSON lines on a background thread and
//! forwards one [`FrameEvent`] per line to the control loop.
//!
//! Line format:
//!
//! ```text
//! {"landmarks": [[0.51, 0.82], ... 21 pairs ...], "t_ms": 1533}
//! {"landmarks": null, "t_ms": 1566}
//! {}
//! ```
//!
//! `t_ms` is the capture time in milliseconds since the start of the stream.
//! Without it the frame is stamped with its arrival time. Malformed lines are
//! logged and skipped.

use crate::error::{GestureLightError, Result};
use crate::tracking::landmarks::{LandmarkSet, Point};
use serde::Deserialize;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One camera frame's worth of detector output
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvent {
    /// The detected hand, if any
    pub landmarks: Option<LandmarkSet>,
    /// When the frame was captured
    pub captured_at: Instant,
}

/// Counters reported when the feed ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Frames forwarded to the control loop
    pub frames: u64,
    /// Lines rejected as malformed
    pub malformed: u64,
}

#[derive(Debug, Deserialize)]
struct FrameLine {
    #[serde(default)]
    landmarks: Option<Vec<Point>>,
    #[serde(default)]
    t_ms: Option<u64>,
}

/// Parse one feed line
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_frame_line(line: &str, stream_start: Instant) -> Result<Option<FrameEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parsed: FrameLine = serde_json::from_str(line)
        .map_err(|e| GestureLightError::MalformedFrame(e.to_string()))?;

    let landmarks = parsed
        .landmarks
        .as_deref()
        .map(LandmarkSet::from_slice)
        .transpose()?;

    let captured_at = match parsed.t_ms {
        Some(ms) => stream_start
            .checked_add(Duration::from_millis(ms))
            .ok_or_else(|| GestureLightError::MalformedFrame(format!("t_ms out of range: {ms}")))?,
        None => Instant::now(),
    };

    Ok(Some(FrameEvent {
        landmarks,
        captured_at,
    }))
}

/// Background reader that turns a line stream into frame events
pub struct LandmarkFeed<R> {
    reader: R,
    event_sender: mpsc::SyncSender<FrameEvent>,
}

impl<R: BufRead + Send + 'static> LandmarkFeed<R> {
    /// Create a feed over `reader` that delivers frames to `event_sender`
    pub fn new(reader: R, event_sender: mpsc::SyncSender<FrameEvent>) -> Self {
        Self {
            reader,
            event_sender,
        }
    }

    /// Start the reader thread
    ///
    /// The thread ends at end of input, on a read error, or when the
    /// receiving side hangs up. The sender is dropped on exit, which the
    /// control loop sees as a disconnect.
    pub fn start(self) -> JoinHandle<FeedStats> {
        thread::spawn(move || self.run())
    }

    fn run(mut self) -> FeedStats {
        let stream_start = Instant::now();
        let mut stats = FeedStats::default();
        let mut line = String::new();

        info!("Landmark feed started");
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    info!("Landmark feed reached end of input");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Landmark feed read error, stopping: {}", e);
                    break;
                }
            }

            match parse_frame_line(&line, stream_start) {
                Ok(Some(event)) => {
                    if self.event_sender.send(event).is_err() {
                        debug!("Frame receiver dropped, stopping landmark feed");
                        break;
                    }
                    stats.frames += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    stats.malformed += 1;
                    warn!("Skipping frame: {}", e);
                }
            }
        }

        info!(
            "Landmark feed stopped: {} frames, {} malformed lines",
            stats.frames, stats.malformed
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hand_json() -> String {
        let pairs: Vec<String> = (0..21).map(|i| format!("[{}, 0.5]", f64::from(i) / 40.0)).collect();
        format!("[{}]", pairs.join(","))
    }

    #[test]
    fn test_parse_hand_frame() {
        let start = Instant::now();
        let line = format!(r#"{{"landmarks": {}, "t_ms": 40}}"#, hand_json());
        let event = parse_frame_line(&line, start).unwrap().unwrap();

        let set = event.landmarks.unwrap();
        assert_eq!(set.points()[8], Point::new(0.2, 0.5));
        assert_eq!(event.captured_at, start + Duration::from_millis(40));
    }

    #[test]
    fn test_parse_no_hand_frames() {
        let start = Instant::now();
        let null = parse_frame_line(r#"{"landmarks": null, "t_ms": 5}"#, start).unwrap().unwrap();
        assert!(null.landmarks.is_none());

        let empty = parse_frame_line("{}", start).unwrap().unwrap();
        assert!(empty.landmarks.is_none());
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(parse_frame_line("   \n", Instant::now()).unwrap(), None);
    }

    #[test]
    fn test_wrong_point_count_is_malformed() {
        let err = parse_frame_line(r#"{"landmarks": [[0.1, 0.2]]}"#, Instant::now()).unwrap_err();
        assert!(matches!(err, GestureLightError::MalformedFrame(_)));
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let err = parse_frame_line("{landmarks", Instant::now()).unwrap_err();
        assert!(matches!(err, GestureLightError::MalformedFrame(_)));
    }

    #[test]
    fn test_feed_forwards_frames_and_skips_garbage() {
        let input = format!(
            "{{\"landmarks\": {}, \"t_ms\": 0}}\nnot json\n\n{{\"landmarks\": null, \"t_ms\": 33}}\n",
            hand_json()
        );
        let (tx, rx) = mpsc::sync_channel(8);
        let handle = LandmarkFeed::new(Cursor::new(input), tx).start();

        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(first.landmarks.is_some());
        let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(second.landmarks.is_none());

        let stats = handle.join().unwrap();
        assert_eq!(stats, FeedStats { frames: 2, malformed: 1 });
        assert!(rx.recv().is_err(), "sender must be dropped at end of input");
    }
}
