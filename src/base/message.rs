/// A command sent to the sign: the command selector byte plus its payload.
///
/// The selector and the data together form the checksummed portion of a packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The command selector byte (e.g. `b'A'` for write text).
    pub cmd: u8,

    /// Command specific bytes following the selector.
    pub data: Vec<u8>,
}

impl Message {
    /// Creates a new message with a command selector and no payload.
    ///
    /// # Arguments
    ///
    /// * `cmd` - The command selector for the message.
    pub fn new(cmd: u8) -> Message {
        Message::with_data(cmd, &[])
    }

    /// Creates a new message with a command selector and payload data.
    ///
    /// # Arguments
    ///
    /// * `cmd` - The command selector for the message.
    /// * `data` - A slice containing the payload data.
    #[inline]
    pub fn with_data(cmd: u8, data: &[u8]) -> Message {
        Message {
            cmd,
            data: data.to_vec(),
        }
    }

    /// Returns the selector followed by the data, i.e. the bytes covered by the checksum.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(1 + self.data.len());
        payload.push(self.cmd);
        payload.extend_from_slice(&self.data);
        payload
    }
}
