use crate::base::{Error, Message, ProtocolEncoder, Result};
use crate::checksum::Checksum;
use crate::cmds::{BROADCAST_ADDRESS, EOT, ETX, NUL, PREAMBLE_NULS, SOH, STX};
use log::{error, trace};
use std::io::Write;

/// Size of the fixed packet header: preamble NULs, SOH, address, STX.
pub const HEADER_SIZE: usize = PREAMBLE_NULS + 1 + BROADCAST_ADDRESS.len() + 1;

/// Size of the trailer: ETX, four checksum digits, EOT.
pub const TRAILER_SIZE: usize = 1 + 4 + 1;

/// Returns the constant header that opens every packet.
///
/// Five NULs for baud-rate detection, SOH, the broadcast address `Z00`, then STX.
pub fn build_header() -> [u8; HEADER_SIZE] {
    let mut header = [NUL; HEADER_SIZE];
    header[PREAMBLE_NULS] = SOH;
    header[PREAMBLE_NULS + 1..PREAMBLE_NULS + 1 + BROADCAST_ADDRESS.len()]
        .copy_from_slice(BROADCAST_ADDRESS);
    header[HEADER_SIZE - 1] = STX;
    header
}

/// Computes the four uppercase hex digit checksum of `payload` (selector included).
pub fn checksum(payload: &[u8]) -> String {
    let mut checksum = Checksum::new();
    checksum.push_slice(payload);
    format!("{:04X}", checksum.checksum())
}

/// Builds the complete packet for a command selector and its payload.
///
/// `Header ++ selector ++ payload ++ ETX ++ checksum ++ EOT`
pub fn encode(command_selector: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_SIZE + 1 + payload.len() + TRAILER_SIZE);
    packet.extend_from_slice(&build_header());
    packet.push(command_selector);
    packet.extend_from_slice(payload);

    let mut checksum = Checksum::new();
    checksum.push_slice(&[command_selector]);
    checksum.push_slice(payload);

    packet.push(ETX);
    packet.extend_from_slice(&checksum.to_hex());
    packet.push(EOT);
    packet
}

fn protocol_error(description: &str) -> Error {
    error!("Packet decode failed: {}", description);
    Error::ProtocolError {
        description: description.to_owned(),
    }
}

/// Splits a packet produced by [`encode`] back into its `Message`, verifying framing and checksum.
///
/// Any number of leading NULs is accepted, as the sign itself does.
pub fn decode_packet(packet: &[u8]) -> Result<Message> {
    trace!("Decoding packet of {} bytes", packet.len());
    let start = packet
        .iter()
        .position(|b| *b != NUL)
        .ok_or_else(|| protocol_error("packet holds no data"))?;
    let rest = &packet[start..];

    let prefix_len = 1 + BROADCAST_ADDRESS.len() + 1;
    if rest.len() < prefix_len + 1 + TRAILER_SIZE {
        return Err(protocol_error("packet too short"));
    }
    if rest[0] != SOH {
        return Err(protocol_error("missing SOH"));
    }
    if &rest[1..1 + BROADCAST_ADDRESS.len()] != BROADCAST_ADDRESS {
        return Err(protocol_error("unexpected address"));
    }
    if rest[prefix_len - 1] != STX {
        return Err(protocol_error("missing STX"));
    }
    if rest[rest.len() - 1] != EOT {
        return Err(protocol_error("missing EOT"));
    }

    let body = &rest[prefix_len..rest.len() - 1];
    let etx_index = body.len() - TRAILER_SIZE + 1;
    if body[etx_index] != ETX {
        return Err(protocol_error("missing ETX"));
    }
    let payload = &body[..etx_index];
    let received = &body[etx_index + 1..];

    let mut checksum = Checksum::new();
    checksum.push_slice(payload);
    let calculated = checksum.to_hex();
    trace!(
        "Checksum: received {:?}, calculated {:?}",
        String::from_utf8_lossy(received),
        String::from_utf8_lossy(&calculated)
    );
    if received != calculated {
        return Err(protocol_error("checksum mismatch"));
    }

    trace!(
        "Decoded message: cmd={:02X}, data_len={}",
        payload[0],
        payload.len() - 1
    );
    Ok(Message::with_data(payload[0], &payload[1..]))
}

/// The Alpha sign protocol, as spoken by BetaBrite signs.
///
/// Encodes `Message`s into broadcast packets. The protocol has no encoder state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlphaProtocol;

impl AlphaProtocol {
    /// Creates a new `AlphaProtocol` encoder.
    pub fn new() -> AlphaProtocol {
        trace!("Creating new AlphaProtocol");
        AlphaProtocol
    }
}

impl ProtocolEncoder for AlphaProtocol {
    /// Encodes a command `Message` into a complete broadcast packet.
    fn encode(&mut self, msg: &Message) -> Vec<u8> {
        trace!(
            "Encoding message: cmd={:02X}, data_len={}",
            msg.cmd,
            msg.data.len()
        );
        let packet = encode(msg.cmd, &msg.data);
        trace!("Encoded packet: {:02X?}", packet);
        packet
    }

    fn encoded_size(&self, msg: &Message) -> usize {
        HEADER_SIZE + 1 + msg.data.len() + TRAILER_SIZE
    }

    /// Encodes a command `Message` and writes it directly to a `Write` target.
    fn write_to(&mut self, msg: &Message, dest: &mut impl Write) -> Result<usize> {
        trace!(
            "write_to called for message: cmd={:02X}, data_len={}",
            msg.cmd,
            msg.data.len()
        );
        let packet = self.encode(msg);
        trace!("Writing {} bytes to destination stream...", packet.len());
        match dest.write_all(&packet) {
            Ok(()) => {
                trace!("Successfully wrote {} bytes", packet.len());
                Ok(packet.len())
            }
            Err(err) => {
                error!("IO error during write_all: {}", err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn header_layout() {
        assert_eq!(
            build_header(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'Z', b'0', b'0', 0x02]
        );
    }

    #[test]
    fn checksum_of_empty_payload() {
        assert_eq!(checksum(&[]), "0005");
    }

    #[test]
    fn protocol_encode() {
        let mut protocol = AlphaProtocol::new();
        let msg = Message::with_data(b'E', &[0x27, b'M']);

        // 'E' + 0x27 + 'M' + STX + ETX = 0x45 + 0x27 + 0x4D + 5 = 0xBE
        assert_eq!(
            protocol.encode(&msg),
            [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x01, b'Z', b'0', b'0', 0x02, b'E', 0x27, b'M',
                0x03, b'0', b'0', b'B', b'E', 0x04
            ]
        );
        assert_eq!(protocol.encoded_size(&msg), 19);
    }

    #[test]
    fn write_to_reports_bytes_written() {
        let mut protocol = AlphaProtocol::new();
        let mut sink = Vec::new();
        let written = protocol
            .write_to(&Message::with_data(b'E', &[0x2C]), &mut sink)
            .unwrap();
        assert_eq!(written, sink.len());
        assert_eq!(sink, encode(b'E', &[0x2C]));
    }

    #[test]
    fn decode_rejects_corrupted_checksum() {
        let mut packet = encode(b'G', b"1hello");
        let last_digit = packet.len() - 2;
        packet[last_digit] = if packet[last_digit] == b'0' { b'1' } else { b'0' };
        assert!(matches!(
            decode_packet(&packet),
            Err(Error::ProtocolError { .. })
        ));
    }

    #[test]
    fn decode_rejects_truncated_packet() {
        let packet = encode(b'A', b"A\x1b a");
        assert!(decode_packet(&packet[..packet.len() - 1]).is_err());
        assert!(decode_packet(&[0, 0, 0]).is_err());
        assert!(decode_packet(&[]).is_err());
    }

    #[test]
    fn decode_accepts_longer_preamble() {
        let mut packet = vec![0u8; 5];
        packet.extend(encode(b'F', &[0x2A]));
        assert_eq!(
            decode_packet(&packet).unwrap(),
            Message::with_data(b'F', &[0x2A])
        );
    }

    proptest! {
        #[test]
        fn encoded_length(selector in any::<u8>(), payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(encode(selector, &payload).len(), HEADER_SIZE + 1 + payload.len() + 1 + 4 + 1);
        }

        #[test]
        fn embedded_checksum_is_recomputable(selector in b'A'..=b'M', payload in proptest::collection::vec(0x20u8..0x7f, 0..512)) {
            let packet = encode(selector, &payload);
            let decoded = decode_packet(&packet).unwrap();
            prop_assert_eq!(decoded.cmd, selector);
            prop_assert_eq!(&decoded.data, &payload);

            let embedded = &packet[packet.len() - 5..packet.len() - 1];
            let recomputed = checksum(&decoded.to_payload());
            prop_assert_eq!(embedded, recomputed.as_bytes());
        }
    }
}
