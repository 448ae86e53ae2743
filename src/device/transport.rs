//! Transports to the lighting device
//!
//! The control loop only needs "send these bytes". `SerialTransport` writes
//! to any `Write` (normally a raw-mode serial port, see
//! [`SerialPortTransport`]); `SimulatedTransport` drops every message, which
//! is what runs when no device is attached.

use crate::config::SerialSettings;
use crate::error::{GestureLightError, Result, StringError};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Destination for encoded serial lines
pub trait LightTransport: Send {
    /// Send one encoded line
    fn send(&mut self, line: &[u8]) -> Result<()>;

    /// True when messages are discarded instead of reaching a device
    fn is_simulated(&self) -> bool {
        false
    }

    /// Short label for logs
    fn describe(&self) -> String;
}

/// Writes lines to a device, flushing after each one
pub struct SerialTransport<W> {
    writer: W,
    label: String,
    lines_sent: u64,
}

impl<W: Write + Send> SerialTransport<W> {
    /// Wrap an already-open writer
    pub fn new(writer: W, label: impl Into<String>) -> Self {
        Self {
            writer,
            label: label.into(),
            lines_sent: 0,
        }
    }

    /// Lines written so far
    pub fn lines_sent(&self) -> u64 {
        self.lines_sent
    }

    /// Consume the transport and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Transport over a real serial port
pub type SerialPortTransport = SerialTransport<Box<dyn SerialPort>>;

impl SerialTransport<Box<dyn SerialPort>> {
    /// Open the configured serial port
    ///
    /// The port is put in raw mode at `baud_rate`, so each line reaches the
    /// device byte for byte with no newline translation. Writes that block
    /// longer than `write_timeout_ms` fail. After opening, waits
    /// `settle_delay_ms` for boards that reset when the port opens.
    pub fn open(settings: &SerialSettings) -> Result<Self> {
        let port_name = settings.port.as_deref().ok_or_else(|| {
            GestureLightError::TransportError(StringError::new("no serial port configured"))
        })?;

        let port = serialport::new(port_name, settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(settings.write_timeout_ms))
            .open()
            .map_err(|e| GestureLightError::TransportError(Box::new(e)))?;

        info!("Opened serial port {} at {} baud", port_name, settings.baud_rate);

        if settings.settle_delay_ms > 0 {
            debug!("Waiting {}ms for the device to settle", settings.settle_delay_ms);
            std::thread::sleep(Duration::from_millis(settings.settle_delay_ms));
        }

        Ok(Self::new(port, port_name))
    }

    /// Baud rate the port is actually running at
    pub fn baud_rate(&self) -> Result<u32> {
        self.writer
            .baud_rate()
            .map_err(|e| GestureLightError::TransportError(Box::new(e)))
    }
}

impl<W: Write + Send> LightTransport for SerialTransport<W> {
    fn send(&mut self, line: &[u8]) -> Result<()> {
        self.writer
            .write_all(line)
            .and_then(|()| self.writer.flush())
            .map_err(|e| GestureLightError::TransportError(Box::new(e)))?;
        self.lines_sent += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("serial {}", self.label)
    }
}

/// Discards every message; used when no device is attached
#[derive(Debug, Default)]
pub struct SimulatedTransport {
    discarded: u64,
}

impl SimulatedTransport {
    /// Create a simulated transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages dropped so far
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

impl LightTransport for SimulatedTransport {
    fn send(&mut self, _line: &[u8]) -> Result<()> {
        self.discarded += 1;
        Ok(())
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "simulation".to_string()
    }
}
