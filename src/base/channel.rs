use crate::base::error::{Error, Result};
use crate::base::message::Message;
use crate::base::traits::ProtocolEncoder;
use log::{error, trace, warn};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

const DEFAULT_CHANNEL_READ_CHUNK_SIZE: usize = 256;

/// Channel encodes messages with a protocol and sends them via a byte stream.
///
/// The sign protocol is fire-and-forget, so reading is limited to collecting raw reply bytes.
///
/// # Examples
/// ```ignore
/// let mut channel = Channel::new(AlphaProtocol::new(), serial_port);
///
/// channel.write(&Message::new(b'E')).unwrap();
/// ```
#[derive(Debug)]
pub struct Channel<P, T: ?Sized> {
    protocol: P,
    stream: Box<T>,
}

impl<P, T: ?Sized> Channel<P, T>
where
    P: ProtocolEncoder,
    T: io::Read + io::Write,
{
    /// Create a new `Channel` writing through `protocol` into `stream`
    ///
    /// # Example
    /// ```ignore
    /// let channel = Channel::new(AlphaProtocol::new(), serial_port);
    /// ```
    pub fn new(protocol: P, stream: Box<T>) -> Channel<P, T> {
        trace!("Creating new Channel");
        Channel { protocol, stream }
    }

    /// Shared access to the underlying stream
    pub fn stream(&self) -> &T {
        &self.stream
    }

    /// Mutable access to the underlying stream
    pub fn stream_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    /// Consume the channel and hand back the stream
    pub fn into_stream(self) -> Box<T> {
        self.stream
    }

    /// Write message to channel
    ///
    /// Returns the number of bytes put on the wire.
    ///
    /// # Example
    /// ```ignore
    /// channel.write(&Message::new(b'E')).unwrap();
    /// ```
    pub fn write(&mut self, msg: &Message) -> Result<usize> {
        trace!(
            "Channel write called: cmd={:02X}, data_len={}",
            msg.cmd,
            msg.data.len()
        );
        let written = self.protocol.write_to(msg, &mut self.stream)?;
        trace!("Flushing stream...");
        self.stream.flush()?;
        trace!("Stream flushed");
        Ok(written)
    }

    /// Read raw bytes until `terminator` shows up, the stream ends, or `timeout` expires.
    ///
    /// The bytes are returned untouched, terminator included. An empty read is reported
    /// as `Error::OperationTimeout`.
    ///
    /// # Example
    /// ```ignore
    /// let reply = channel.read_until_byte(EOT, Duration::from_secs(1))?;
    /// ```
    pub fn read_until_byte(&mut self, terminator: u8, timeout: Duration) -> Result<Vec<u8>> {
        trace!(
            "Channel read_until_byte called: terminator={:02X}, timeout={:?}",
            terminator,
            timeout
        );
        let start = Instant::now();
        let mut chunk = [0u8; DEFAULT_CHANNEL_READ_CHUNK_SIZE];
        let mut received = Vec::new();

        loop {
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                trace!("Overall timeout reached ({:?})", elapsed);
                break;
            }

            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    trace!("Stream read returned 0 bytes, treating as end of stream");
                    break;
                }
                Ok(read) => {
                    trace!("Read {} bytes from stream", read);
                    match chunk[..read].iter().position(|b| *b == terminator) {
                        Some(pos) => {
                            received.extend_from_slice(&chunk[..=pos]);
                            trace!(
                                "Terminator {:02X} received, dropping {} trailing bytes",
                                terminator,
                                read - pos - 1
                            );
                            break;
                        }
                        None => received.extend_from_slice(&chunk[..read]),
                    }
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::TimedOut
                            | io::ErrorKind::WouldBlock
                            | io::ErrorKind::Interrupted
                    ) =>
                {
                    trace!("Stream read timed out, retrying until deadline");
                }
                Err(e) => {
                    error!("IO error reading from stream: {}", e);
                    return Err(e.into());
                }
            }
        }

        if received.is_empty() {
            warn!("No bytes received within {:?}", timeout);
            return Err(Error::OperationTimeout);
        }
        trace!("Received {} raw bytes", received.len());
        Ok(received)
    }

    /// Send a request and collect the raw reply up to `terminator`
    ///
    /// # Example
    /// ```ignore
    /// let reply = channel.invoke(&Message::with_data(b'F', &[0x2A]), EOT, Duration::from_secs(1));
    /// ```
    pub fn invoke(
        &mut self,
        request: &Message,
        terminator: u8,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        trace!(
            "Channel invoke called: cmd={:02X}, data_len={}, timeout={:?}",
            request.cmd,
            request.data.len(),
            timeout
        );
        match self.write(request) {
            Ok(written) => trace!("Invoke: wrote {} bytes for request", written),
            Err(e) => {
                error!("Invoke: failed to write request: {:?}", e);
                return Err(e);
            }
        }
        trace!("Invoke: waiting for reply...");
        self.read_until_byte(terminator, timeout)
    }
}
