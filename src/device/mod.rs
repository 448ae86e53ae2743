//! Lighting device module
//!
//! Encodes output frames into the serial line format and delivers them.
//!
//! # Simulation Mode
//!
//! Running without a device is a normal mode, not an error: when no port is
//! configured or the port cannot be opened, [`connect`] returns a
//! [`SimulatedTransport`]. Frames are still computed and encoded every time,
//! they just go nowhere.

pub mod encoder;
pub mod transport;

pub use encoder::{MAX_LINE_LEN, encode, encode_line};
pub use transport::{LightTransport, SerialPortTransport, SerialTransport, SimulatedTransport};

use crate::config::SerialSettings;
use tracing::{info, warn};

/// Open the configured device, falling back to simulation mode
pub fn connect(settings: &SerialSettings) -> Box<dyn LightTransport> {
    if settings.port.is_none() {
        info!("No serial port configured, running in simulation mode");
        return Box::new(SimulatedTransport::new());
    }

    match SerialTransport::open(settings) {
        Ok(transport) => Box::new(transport),
        Err(e) => {
            warn!("{}. Running in simulation mode", e);
            Box::new(SimulatedTransport::new())
        }
    }
}
