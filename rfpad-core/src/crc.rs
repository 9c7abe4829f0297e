//! Reader frame checksum
//!
//! Reflected CRC-16 with preset 0xFFFF and polynomial 0x8408 (the
//! CRC-16/MCRF4XX parametrization). Both directions use it the same way:
//! computed over every frame byte except the trailing two, which carry the
//! checksum itself, low byte first.

use tracing::trace;

/// CRC preset value
pub const PRESET: u16 = 0xFFFF;

/// Reflected CRC polynomial
pub const POLYNOMIAL: u16 = 0x8408;

/// Calculate the frame checksum over a byte buffer
///
/// # Algorithm
///
/// ```text
/// 1. crc = 0xFFFF
/// 2. For each byte: crc ^= byte, then 8 times:
///    low bit set -> crc = (crc >> 1) ^ 0x8408, else crc >>= 1
/// 3. Return crc
/// ```
///
/// # Examples
///
/// ```
/// use rfpad_core::crc;
///
/// // CRC-16/MCRF4XX check value
/// assert_eq!(crc::crc16(b"123456789"), 0x6F91);
/// ```
pub fn crc16(buf: &[u8]) -> u16 {
    let mut crc = PRESET;

    for &byte in buf {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
        }
    }

    trace!(
        len = buf.len(),
        crc = format!("0x{:04X}", crc),
        "Calculated checksum"
    );

    crc
}

/// Verify a buffer against an expected checksum
pub fn verify(buf: &[u8], expected: u16) -> bool {
    crc16(buf) == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc_check_value() {
        // Published check value for this parametrization
        assert_eq!(crc16(b"123456789"), 0x6F91);
    }

    #[test]
    fn test_crc_empty_buffer_is_preset() {
        assert_eq!(crc16(&[]), PRESET);
    }

    #[test]
    fn test_crc_deterministic() {
        let buf = [0x02, 0x00, 0x09, 0xFF, 0xB0, 0x01, 0x00];
        assert_eq!(crc16(&buf), crc16(&buf));
    }

    #[test]
    fn test_crc_verify() {
        let buf = [0xDE, 0xAD, 0xBE, 0xEF];
        let crc = crc16(&buf);

        assert!(verify(&buf, crc));
        assert!(!verify(&buf, crc.wrapping_add(1)));
    }

    proptest! {
        #[test]
        fn prop_crc_deterministic(buf in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(crc16(&buf), crc16(&buf));
        }

        #[test]
        fn prop_single_bit_flip_changes_crc(
            buf in proptest::collection::vec(any::<u8>(), 1..512),
            index in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let original = crc16(&buf);

            let mut flipped = buf.clone();
            let i = index.index(flipped.len());
            flipped[i] ^= 1 << bit;

            prop_assert_ne!(original, crc16(&flipped));
        }
    }
}
