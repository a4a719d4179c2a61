use crate::constants::{CHECKSUM_PAYLOAD_BYTES, FRAME_BYTES, NIBBLE_MASK, SUM_BYTE};
use crate::error::FrameError;

/// Sum of the high and low nibbles of every byte in `bytes`.
pub fn add_nibbles(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .map(|b| u32::from(b >> 4) + u32::from(b & NIBBLE_MASK))
        .sum()
}

/// Checksum nibble for a normalized frame: the nibble sum of the command/channel
/// and value bytes, truncated to 4 bits.
pub fn checksum_nibble(bytes: &[u8; FRAME_BYTES]) -> u8 {
    (add_nibbles(&bytes[..CHECKSUM_PAYLOAD_BYTES]) & u32::from(NIBBLE_MASK)) as u8
}

/// Compare the computed checksum against the low nibble of the sum byte.
pub fn verify_checksum(bytes: &[u8; FRAME_BYTES]) -> Result<(), FrameError> {
    let expected = bytes[SUM_BYTE] & NIBBLE_MASK;
    let calculated = checksum_nibble(bytes);

    if calculated == expected {
        Ok(())
    } else {
        Err(FrameError::ChecksumMismatch { expected, calculated })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_nibbles() {
        assert_eq!(add_nibbles(&[]), 0);
        assert_eq!(add_nibbles(&[0x12, 0x34]), 1 + 2 + 3 + 4);
        assert_eq!(add_nibbles(&[0xFF, 0xFF]), 60);
    }

    #[test]
    fn test_checksum_wraps_to_nibble() {
        // 15 + 15 + 15 + 15 = 60 = 0x3C
        assert_eq!(checksum_nibble(&[0xFF, 0xFF, 0x00]), 0x0C);
    }

    #[test]
    fn test_verify_checksum() {
        assert_eq!(verify_checksum(&[0x2A, 0x07, 0x03]), Ok(()));
        assert_eq!(
            verify_checksum(&[0x2A, 0x07, 0x04]),
            Err(FrameError::ChecksumMismatch {
                expected: 0x04,
                calculated: 0x03
            })
        );
    }

    #[test]
    fn test_verify_ignores_high_nibble_of_sum_byte() {
        assert_eq!(verify_checksum(&[0x2A, 0x07, 0xF3]), Ok(()));
    }
}
