//! # BetaBrite Driver
//!
//! `betabrite` drives serial LED signs speaking the Alpha sign protocol (BetaBrite and
//! friends). It encodes broadcast packets, writes them to any `Read + Write` stream and
//! offers high-level access to the sign: writing text and string files, setting the
//! clock, configuring memory and reading diagnostic registers.
//!
//! Every packet has the layout
//!
//! ```text
//! NUL×5 SOH 'Z' '0' '0' STX <selector> <payload> ETX <4 hex checksum digits> EOT
//! ```
//!
//! The sign never acknowledges writes, so operations are fire-and-forget.

extern crate chrono;
extern crate log;

pub mod base;
mod checksum;
pub mod cmds;
mod internals;
pub mod protocol;
pub mod requests;
#[cfg(feature = "serial")]
pub mod serial;
pub mod text;
pub mod types;

pub use crate::base::{Channel, Error, Message, Result};
pub use crate::checksum::Checksum;
pub use crate::cmds::{Command, PRIORITY_FILE_LABEL};
pub use crate::internals::SIGN_DEFAULT_READ_TIMEOUT;
pub use crate::protocol::AlphaProtocol;
pub use crate::types::{DisplayMode, FileDescriptor, SignOptions};

use crate::cmds::EOT;
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Weekday};
use log::{debug, error, trace};
use std::io::{Read, Write};
use std::time::Duration;

/// Represents a connection to and control interface for a BetaBrite sign.
///
/// It requires a `Channel` configured with `AlphaProtocol` for communication. The device
/// does no locking; share it between threads only behind your own mutex.
#[derive(Debug)]
pub struct BetaBrite<T: ?Sized> {
    channel: Channel<AlphaProtocol, T>,
    options: SignOptions,
}

impl<T: ?Sized> BetaBrite<T>
where
    T: Read + Write,
{
    /// Constructs a new `BetaBrite` using an existing `Channel`.
    ///
    /// Unless `options.sync_clock_on_connect` is `false`, the sign clock is set to the
    /// local time, weekday and 24 hour format before this returns.
    ///
    /// # Arguments
    ///
    /// * `channel` - A `Channel` instance configured with `AlphaProtocol` and connected to the sign (9600 baud, 7E1).
    /// * `options` - Connection options.
    ///
    /// # Example
    /// ```ignore
    /// # use betabrite::{BetaBrite, AlphaProtocol, Channel, SignOptions};
    /// let serial_port = serialport::new("/dev/ttyUSB0", 9600).open()?;
    /// let channel = Channel::new(AlphaProtocol::new(), serial_port);
    /// let mut sign = BetaBrite::new(channel, SignOptions::default())?;
    /// ```
    pub fn new(channel: Channel<AlphaProtocol, T>, options: SignOptions) -> Result<BetaBrite<T>> {
        trace!("Creating new BetaBrite with options {:?}", options);
        let mut sign = BetaBrite { channel, options };
        if sign.options.sync_clock_on_connect {
            debug!("Syncing sign clock on connect");
            sign.sync_clock()?;
        }
        Ok(sign)
    }

    /// Constructs a new `BetaBrite` directly from a communication stream with default options.
    ///
    /// # Arguments
    ///
    /// * `stream` - A boxed `Read + Write` object representing the communication stream.
    pub fn with_stream(stream: Box<T>) -> Result<BetaBrite<T>> {
        BetaBrite::with_stream_and_options(stream, SignOptions::default())
    }

    /// Constructs a new `BetaBrite` from a communication stream and explicit options.
    ///
    /// # Arguments
    ///
    /// * `stream` - A boxed `Read + Write` object representing the communication stream.
    /// * `options` - Connection options.
    pub fn with_stream_and_options(stream: Box<T>, options: SignOptions) -> Result<BetaBrite<T>> {
        trace!("Creating new BetaBrite with stream");
        BetaBrite::new(Channel::new(AlphaProtocol::new(), stream), options)
    }

    /// The options this device was created with.
    pub fn options(&self) -> &SignOptions {
        &self.options
    }

    /// The underlying channel.
    pub fn channel(&self) -> &Channel<AlphaProtocol, T> {
        &self.channel
    }

    /// Gives the stream back, closing nothing.
    pub fn into_stream(self) -> Box<T> {
        self.channel.into_stream()
    }

    /// Encodes and sends a single message.
    ///
    /// Transport errors are returned unchanged as `Error::IoError`.
    pub fn send(&mut self, msg: &Message) -> Result<()> {
        trace!(
            "Sending command {:02X} with {} payload bytes",
            msg.cmd,
            msg.data.len()
        );
        match self.channel.write(msg) {
            Ok(written) => {
                trace!("Command {:02X} sent ({} bytes)", msg.cmd, written);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send command {:02X}: {:?}", msg.cmd, e);
                Err(e)
            }
        }
    }

    /// Writes a text file that the sign shows with the given display mode.
    ///
    /// # Arguments
    ///
    /// * `label` - Text file label, e.g. `'A'` (or [`PRIORITY_FILE_LABEL`]).
    /// * `mode` - Display mode. Use [`DisplayMode::from_name`] for names; unknown names fall back to rotate.
    /// * `text` - The text; may contain formatting codes from [`text::TextBuilder`].
    pub fn write_text(&mut self, label: char, mode: DisplayMode, text: &str) -> Result<()> {
        debug!("Writing text file {:?} in mode {}", label, mode.name());
        let msg = requests::write_text(label, mode, text)?;
        self.send(&msg)
    }

    /// Writes a string file, which text files can embed with `CALL_STRING`.
    ///
    /// # Arguments
    ///
    /// * `label` - String file label, e.g. `'1'`.
    /// * `text` - The text.
    pub fn write_string(&mut self, label: char, text: &str) -> Result<()> {
        debug!("Writing string file {:?}", label);
        let msg = requests::write_string(label, text)?;
        self.send(&msg)
    }

    /// Sets the time of day on the sign.
    pub fn set_time(&mut self, time: NaiveTime) -> Result<()> {
        debug!("Setting time to {}", time.format("%H:%M"));
        self.send(&requests::set_time(time))
    }

    /// Sets the time of day on the sign to the local time.
    pub fn set_time_now(&mut self) -> Result<()> {
        self.set_time(Local::now().time())
    }

    /// Sets the day of the week on the sign.
    pub fn set_weekday(&mut self, day: Weekday) -> Result<()> {
        debug!("Setting weekday to {:?}", day);
        self.send(&requests::set_weekday(day))
    }

    /// Sets the date on the sign.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        debug!("Setting date to {}", date);
        self.send(&requests::set_date(date))
    }

    /// Sets the date on the sign to today's local date.
    pub fn set_date_today(&mut self) -> Result<()> {
        self.set_date(Local::now().date_naive())
    }

    /// Chooses between AM/PM (`true`) and 24 hour (`false`) clock display.
    pub fn set_time_format(&mut self, use_am_pm: bool) -> Result<()> {
        debug!("Setting time format (am/pm: {})", use_am_pm);
        self.send(&requests::set_time_format(use_am_pm))
    }

    /// Sets local time, weekday and 24 hour format in one go.
    pub fn sync_clock(&mut self) -> Result<()> {
        let now = Local::now();
        trace!("Syncing clock to {}", now);
        self.set_time(now.time())?;
        self.set_weekday(now.weekday())?;
        self.set_time_format(false)
    }

    /// Turns the speaker on or off.
    pub fn sound(&mut self, enabled: bool) -> Result<()> {
        debug!("Setting sound (enabled: {})", enabled);
        self.send(&requests::sound(enabled))
    }

    /// Restarts the sign without clearing its memory.
    pub fn soft_reset(&mut self) -> Result<()> {
        debug!("Sending soft reset");
        self.send(&requests::soft_reset())
    }

    /// Configures memory as 5 text files (`A`..=`E`, 256 bytes, always shown) and
    /// 10 string files (`1`..=`10`, 125 bytes).
    ///
    /// Reconfiguring memory erases every file on the sign.
    pub fn set_memory_map(&mut self) -> Result<()> {
        debug!("Configuring default memory map");
        self.send(&requests::set_memory_map())
    }

    /// Configures memory with a custom list of file slots.
    pub fn set_memory_map_with(&mut self, files: &[FileDescriptor]) -> Result<()> {
        debug!("Configuring memory map with {} files", files.len());
        self.send(&requests::set_memory_map_with(files))
    }

    /// Reads the serial error register. The reply is returned raw, up to and including EOT.
    /// Uses the read timeout from the device options.
    pub fn read_error_register(&mut self) -> Result<Vec<u8>> {
        let timeout = self.options.read_timeout;
        self.read_error_register_with_timeout(timeout)
    }

    /// Reads the serial error register with a specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - The maximum duration to wait for the reply.
    pub fn read_error_register_with_timeout(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        debug!("Reading error register");
        self.read_special(&requests::read_error_register(), timeout)
    }

    /// Reads the memory size of the sign. The reply is returned raw, up to and including EOT.
    /// Uses the read timeout from the device options.
    pub fn read_memory_size(&mut self) -> Result<Vec<u8>> {
        let timeout = self.options.read_timeout;
        self.read_memory_size_with_timeout(timeout)
    }

    /// Reads the memory size of the sign with a specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - The maximum duration to wait for the reply.
    pub fn read_memory_size_with_timeout(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        debug!("Reading memory size");
        self.read_special(&requests::read_memory_size(), timeout)
    }

    fn read_special(&mut self, msg: &Message, timeout: Duration) -> Result<Vec<u8>> {
        match self.channel.invoke(msg, EOT, timeout) {
            Ok(reply) => {
                trace!("Register {:02X?} replied with {:02X?}", msg.data, reply);
                Ok(reply)
            }
            Err(e) => {
                error!("Error reading register {:02X?}: {:?}", msg.data, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode_packet;
    use std::io::{self, Cursor};

    #[derive(Debug, Default)]
    struct MockStream {
        written: Vec<u8>,
        reply: Cursor<Vec<u8>>,
    }

    impl MockStream {
        fn with_reply(reply: &[u8]) -> MockStream {
            MockStream {
                written: Vec::new(),
                reply: Cursor::new(reply.to_vec()),
            }
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reply.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenStream;

    impl Read for BrokenStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::NotConnected, "unplugged"))
        }
    }

    impl Write for BrokenStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::NotConnected, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn quiet_sign(stream: MockStream) -> BetaBrite<MockStream> {
        BetaBrite::with_stream_and_options(Box::new(stream), SignOptions::without_clock_sync())
            .unwrap()
    }

    fn sent_messages(sign: &BetaBrite<MockStream>) -> Vec<Message> {
        sign.channel()
            .stream()
            .written
            .split_inclusive(|b| *b == EOT)
            .map(|packet| decode_packet(packet).unwrap())
            .collect()
    }

    #[test]
    fn connect_syncs_clock_by_default() {
        let sign = BetaBrite::with_stream(Box::new(MockStream::default())).unwrap();
        let sent = sent_messages(&sign);

        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|msg| msg.cmd == b'E'));
        assert_eq!(sent[0].data[0], 0x20);
        assert_eq!(sent[0].data.len(), 5);
        assert_eq!(sent[1].data[0], 0x26);
        assert!((b'1'..=b'7').contains(&sent[1].data[1]));
        assert_eq!(sent[2].data, vec![0x27, b'M']);
    }

    #[test]
    fn connect_without_sync_sends_nothing() {
        let sign = quiet_sign(MockStream::default());
        assert!(sign.channel().stream().written.is_empty());
    }

    #[test]
    fn write_text_puts_packet_on_wire() {
        let mut sign = quiet_sign(MockStream::default());
        sign.write_text('A', DisplayMode::Rotate, "Hello").unwrap();

        let written = &sign.channel().stream().written;
        assert_eq!(written, &protocol::encode(b'A', b"A\x1b aHello"));
    }

    #[test]
    fn unknown_mode_name_matches_rotate_on_wire() {
        let mut fallback = quiet_sign(MockStream::default());
        fallback
            .write_text('A', DisplayMode::from_name("unheard_of"), "Hi")
            .unwrap();
        let mut rotate = quiet_sign(MockStream::default());
        rotate.write_text('A', DisplayMode::Rotate, "Hi").unwrap();

        assert_eq!(
            fallback.channel().stream().written,
            rotate.channel().stream().written
        );
    }

    #[test]
    fn high_level_operations_send_one_packet_each() {
        let mut sign = quiet_sign(MockStream::default());
        sign.write_string('1', "value").unwrap();
        sign.set_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap()).unwrap();
        sign.set_weekday(Weekday::Wed).unwrap();
        sign.set_date(NaiveDate::from_ymd_opt(2031, 12, 1).unwrap())
            .unwrap();
        sign.set_time_format(true).unwrap();
        sign.sound(true).unwrap();
        sign.soft_reset().unwrap();
        sign.set_memory_map().unwrap();

        let sent = sent_messages(&sign);
        assert_eq!(sent.len(), 8);
        assert_eq!(sent[0], Message::with_data(b'G', b"1value"));
        assert_eq!(sent[1], Message::with_data(b'E', b"\x202359"));
        assert_eq!(sent[2], Message::with_data(b'E', b"\x264"));
        assert_eq!(sent[3], Message::with_data(b'E', b"\x3b120131"));
        assert_eq!(sent[4], Message::with_data(b'E', b"\x27S"));
        assert_eq!(sent[5], Message::with_data(b'E', b"\x21FF"));
        assert_eq!(sent[6], Message::with_data(b'E', &[0x2C]));
        assert_eq!(sent[7], requests::set_memory_map());
    }

    #[test]
    fn register_read_returns_raw_reply() {
        let reply = b"\0\0\0\0\0\x01000\x02E*00\x030123\x04";
        let mut sign = quiet_sign(MockStream::with_reply(reply));

        let received = sign.read_error_register().unwrap();
        assert_eq!(received, reply.to_vec());
        assert_eq!(sent_messages(&sign), vec![Message::with_data(b'F', &[0x2A])]);
    }

    #[test]
    fn register_read_stops_at_first_eot() {
        let reply = b"\x01000\x02E*00\x030123\x04TRAILING";
        let mut sign = quiet_sign(MockStream::with_reply(reply));

        let received = sign.read_error_register().unwrap();
        assert_eq!(received, b"\x01000\x02E*00\x030123\x04".to_vec());
        assert_eq!(received.last(), Some(&EOT));
    }

    #[test]
    fn register_read_without_reply_times_out() {
        let mut sign = quiet_sign(MockStream::default());
        assert!(matches!(
            sign.read_memory_size_with_timeout(Duration::from_millis(50)),
            Err(Error::OperationTimeout)
        ));
        assert_eq!(sent_messages(&sign), vec![Message::with_data(b'F', &[0x23])]);
    }

    #[test]
    fn transport_faults_propagate() {
        let result = BetaBrite::with_stream(Box::new(BrokenStream));
        match result {
            Err(Error::IoError(e)) => assert_eq!(e.kind(), io::ErrorKind::NotConnected),
            other => panic!("expected io error, got {:?}", other.map(|_| ())),
        }

        let mut sign = BetaBrite::with_stream_and_options(
            Box::new(BrokenStream),
            SignOptions::without_clock_sync(),
        )
        .unwrap();
        assert!(matches!(sign.soft_reset(), Err(Error::IoError(_))));
        assert!(matches!(sign.read_error_register(), Err(Error::IoError(_))));
    }

    #[test]
    fn invalid_label_writes_nothing() {
        let mut sign = quiet_sign(MockStream::default());
        assert!(matches!(
            sign.write_string('é', "x"),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(sign.channel().stream().written.is_empty());
    }
}
