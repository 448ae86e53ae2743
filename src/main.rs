//! `gesturelight` - Hand-gesture control of a serial RGB light
//!
//! Reads hand landmarks as JSON lines on stdin (one line per camera frame,
//! produced by an external hand tracker) and drives the lighting device
//! named in `$GESTURELIGHT_HOME/config.json`. Without a device it runs in
//! simulation mode.

use anyhow::{Context, Result};
use gesturelight::{
    config::ConfigManager,
    controller::ControlLoop,
    device,
    error::{GestureLightError, get_user_friendly_error},
    tracking::LandmarkFeed,
    utils,
};
use std::io::BufReader;
use std::sync::mpsc;
use tracing::{error, info, warn};

/// Frames buffered between the feed thread and the control loop
///
/// Kept small so a slow device write makes the feed wait instead of letting
/// stale frames pile up.
const FRAME_QUEUE_DEPTH: usize = 4;

fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    let config_path = ConfigManager::get_config_path();
    let config = ConfigManager::load().context("Failed to load configuration")?;
    if !config_path.exists() {
        // Leave a file behind for the operator to edit
        if let Err(e) = ConfigManager::save(&config) {
            warn!("Could not write default configuration: {}", e);
        }
    }

    let calibration = match config.calibrate() {
        Ok(calibration) => calibration,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("{}", get_user_friendly_error(&e));
            return Err(anyhow::Error::new(e).context("Configuration does not calibrate"));
        }
    };

    let transport = device::connect(&config.serial);
    let mut control = ControlLoop::new(calibration, transport);
    if control.is_simulated() {
        info!("Simulation mode: frames are computed but not transmitted");
    }

    let (frame_tx, frame_rx) = mpsc::sync_channel(FRAME_QUEUE_DEPTH);
    let feed_handle = LandmarkFeed::new(BufReader::new(std::io::stdin()), frame_tx).start();

    let loop_stats = control.run(&frame_rx);

    match feed_handle.join() {
        Ok(feed_stats) => {
            if feed_stats.malformed > 0 {
                warn!("{} malformed landmark lines were skipped", feed_stats.malformed);
            }
        }
        Err(_) => error!("Landmark feed thread panicked"),
    }

    if loop_stats.transport_failures > 0 {
        let e = GestureLightError::TransportError(gesturelight::error::StringError::new(
            "device stopped accepting writes",
        ));
        eprintln!("{}", get_user_friendly_error(&e));
    }

    info!(
        "gesturelight shutting down: {} frames, {} color picks, {} brightness picks",
        loop_stats.frames, loop_stats.color_picks, loop_stats.brightness_picks
    );

    Ok(())
}
