use crate::cmds::{ETX, STX};

/// Modulus of the running sum. The sign expects 65535, not a 16-bit wraparound at 65536.
const CHECKSUM_MODULUS: u32 = 65535;

/// Calculates the running 16-bit sum used by the Alpha sign protocol.
///
/// The sum covers the command selector and payload, plus the STX and ETX control codes
/// that frame them on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Checksum {
    current: u32,
}

impl Checksum {
    /// Creates a new `Checksum` instance, seeded with the STX and ETX framing bytes.
    #[inline]
    pub fn new() -> Checksum {
        Checksum {
            current: (STX as u32 + ETX as u32) % CHECKSUM_MODULUS,
        }
    }

    /// Includes a slice of bytes in the checksum calculation.
    ///
    /// # Arguments
    ///
    /// * `data` - The byte slice to add to the running sum.
    #[inline]
    pub fn push_slice(&mut self, data: &[u8]) {
        for d in data {
            self.current = (self.current + *d as u32) % CHECKSUM_MODULUS;
        }
    }

    /// Returns the calculated checksum value, in `0..=65534`.
    #[inline]
    pub fn checksum(&self) -> u16 {
        self.current as u16
    }

    /// Returns the checksum as the four uppercase hex digits sent on the wire.
    pub fn to_hex(&self) -> [u8; 4] {
        let mut digits = [0u8; 4];
        digits.copy_from_slice(format!("{:04X}", self.checksum()).as_bytes());
        digits
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hex_of(data: &[u8]) -> String {
        let mut checksum = Checksum::new();
        checksum.push_slice(data);
        String::from_utf8(checksum.to_hex().to_vec()).unwrap()
    }

    #[test]
    fn empty_payload_is_stx_plus_etx() {
        assert_eq!(hex_of(&[]), "0005");
    }

    #[test]
    fn sums_payload_bytes() {
        // 'E' (0x45) + ' ' (0x20) + "1230" + 2 + 3
        let expected = 0x45 + 0x20 + b'1' as u32 + b'2' as u32 + b'3' as u32 + b'0' as u32 + 5;
        assert_eq!(hex_of(b"E 1230"), format!("{:04X}", expected));
    }

    #[test]
    fn reduces_modulo_65535_not_65536() {
        // 257 * 0xFF + 5 = 65540, which is 5 past the modulus.
        let data = vec![0xFFu8; 257];
        assert_eq!(hex_of(&data), "0005");

        // 65535 exactly wraps to zero.
        let mut data = vec![0xFFu8; 256];
        data.push(0xFA);
        assert_eq!(hex_of(&data), "0000");
    }

    #[test]
    fn incremental_pushes_match_single_push() {
        let mut split = Checksum::new();
        split.push_slice(b"AA");
        split.push_slice(b"\x1b a");
        split.push_slice(b"Hello");

        let mut whole = Checksum::new();
        whole.push_slice(b"AA\x1b aHello");

        assert_eq!(split, whole);
    }

    proptest! {
        #[test]
        fn always_four_uppercase_hex_digits(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let hex = hex_of(&data);
            prop_assert_eq!(hex.len(), 4);
            prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
            prop_assert_eq!(&hex, &hex_of(&data));
        }

        #[test]
        fn matches_plain_sum_formula(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let sum: u64 = data.iter().map(|b| *b as u64).sum::<u64>() + 2 + 3;
            prop_assert_eq!(hex_of(&data), format!("{:04X}", sum % 65535));
        }
    }
}
