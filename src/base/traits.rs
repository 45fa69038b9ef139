use crate::base::error::Result;
use crate::base::message::Message;
use std::io;

/// Defines the behavior for encoding `Message` objects into byte streams.
pub trait ProtocolEncoder {
    /// Encodes a `Message` into a freshly allocated, wire-ready packet.
    ///
    /// # Arguments
    ///
    /// * `msg` - The `Message` to encode.
    fn encode(&mut self, msg: &Message) -> Vec<u8>;

    /// Returns the exact number of bytes `encode` produces for the given `Message`.
    ///
    /// # Arguments
    ///
    /// * `msg` - The `Message` for which to compute the encoded size.
    fn encoded_size(&self, msg: &Message) -> usize;

    /// Encodes a `Message` and writes it directly to a `Write` target (e.g., a serial port).
    ///
    /// Returns the number of bytes successfully written to the destination.
    ///
    /// # Arguments
    ///
    /// * `msg` - The `Message` to encode and write.
    /// * `dest` - The `Write` target to write the encoded bytes to.
    fn write_to(&mut self, msg: &Message, dest: &mut impl io::Write) -> Result<usize>;
}
