//! Opening a serial port with the line settings BetaBrite signs expect.

use crate::base::{Error, Result};
use crate::types::SignOptions;
use crate::BetaBrite;
use log::{debug, error};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io;
use std::time::Duration;

/// Baud rate of the sign's serial interface.
pub const BAUD_RATE: u32 = 9600;

/// Data bits per character.
pub const DATA_BITS: DataBits = DataBits::Seven;

/// Parity bit setting.
pub const PARITY: Parity = Parity::Even;

/// Stop bits per character.
pub const STOP_BITS: StopBits = StopBits::One;

/// Per-read timeout of the port; the overall register read timeout comes from `SignOptions`.
pub const PORT_READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Opens `path` at 9600 baud, 7 data bits, even parity, 1 stop bit.
pub fn open_port(path: &str) -> Result<Box<dyn SerialPort>> {
    debug!("Opening serial port {} ({} 7E1)", path, BAUD_RATE);
    serialport::new(path, BAUD_RATE)
        .data_bits(DATA_BITS)
        .parity(PARITY)
        .stop_bits(STOP_BITS)
        .flow_control(FlowControl::None)
        .timeout(PORT_READ_TIMEOUT)
        .open()
        .map_err(|e| {
            error!("Failed to open serial port {}: {}", path, e);
            Error::from(io::Error::from(e))
        })
}

/// Opens `path` and connects a sign on it.
///
/// # Example
/// ```no_run
/// # fn main() -> betabrite::Result<()> {
/// let mut sign = betabrite::serial::open("/dev/ttyUSB0", Default::default())?;
/// sign.write_text('A', betabrite::DisplayMode::Hold, "Hello")?;
/// # Ok(())
/// # }
/// ```
pub fn open(path: &str, options: SignOptions) -> Result<BetaBrite<dyn SerialPort>> {
    BetaBrite::with_stream_and_options(open_port(path)?, options)
}
