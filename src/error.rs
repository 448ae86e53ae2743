//! Error types for `gesturelight`
//!
//! The control core itself has no recoverable failure modes; these variants
//! cover the edges around it (configuration, the landmark feed and the serial
//! transport). Variants that wrap another error keep it as `#[source]` so the
//! full chain shows up in logs.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `gesturelight`
#[derive(Debug, Error)]
pub enum GestureLightError {
    /// Configuration could not be loaded, saved or applied
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration values are out of range for the current frame geometry
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Writing to the lighting device failed
    #[error("Transport error: {0}")]
    TransportError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A landmark feed line could not be turned into a frame
    #[error("Malformed landmark frame: {0}")]
    MalformedFrame(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `gesturelight` operations
pub type Result<T> = std::result::Result<T, GestureLightError>;

/// Convert an error to a user-friendly message
///
/// Used by the binary when startup fails, so the operator gets a hint about
/// what to change rather than a bare error chain.
pub fn get_user_friendly_error(error: &GestureLightError) -> String {
    match error {
        GestureLightError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Defaults will be used for this session.\n\
             Check that the directory in GESTURELIGHT_HOME is writable."
            .to_string(),
        GestureLightError::InvalidCalibration(reason) => {
            format!(
                "The configuration does not fit the camera frame:\n\n{reason}\n\n\
                 Adjust config.json or delete it to restore the defaults."
            )
        }
        GestureLightError::TransportError(_) => "Unable to write to the lighting device.\n\n\
             Please ensure:\n\
             - The device is plugged in\n\
             - The serial port in config.json is correct\n\
             - No other program holds the port open"
            .to_string(),
        GestureLightError::MalformedFrame(detail) => {
            format!(
                "The hand tracker sent a frame that could not be read:\n\n{detail}\n\n\
                 Each line must be a JSON object with 21 [x, y] landmarks or null."
            )
        }
        GestureLightError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        GestureLightError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}
