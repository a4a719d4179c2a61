use modular_bitfield::prelude::*;

use crate::bitrow::BitRow;
use crate::checksum::checksum_nibble;
use crate::constants::{FRAME_BITS, FRAME_BYTES, NIBBLE_MASK, SUM_BYTE};
use crate::error::FrameError;

/// Field layout of a normalized frame.
///
/// Byte 0 carries the command code in its high nibble and the channel in its low
/// nibble, complemented. Byte 1 is the command argument. Byte 2 carries the
/// checksum nibble in its low 4 bits.
#[bitfield(bytes = 3)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFields {
    pub channel_code: B4,
    pub command_code: B4,
    pub value: u8,
    pub checksum: B4,
    #[skip]
    unused: B4,
}

impl FrameFields {
    /// Channel number, undoing the on-air complement.
    pub fn channel(&self) -> u8 {
        !self.channel_code() & NIBBLE_MASK
    }

    /// Build normalized frame bytes for a button press, checksum included.
    pub fn encode(command: u8, channel: u8, value: u8) -> [u8; FRAME_BYTES] {
        let mut bytes = FrameFields::new()
            .with_command_code(command & NIBBLE_MASK)
            .with_channel_code(!channel & NIBBLE_MASK)
            .with_value(value)
            .into_bytes();
        bytes[SUM_BYTE] = checksum_nibble(&bytes);
        bytes
    }
}

/// Reverse the bit order of one byte.
pub fn reflect_byte(b: u8) -> u8 {
    b.reverse_bits()
}

/// Reverse the bit order of every byte in place.
///
/// The remote sends each byte least significant bit first while the field layout
/// and checksum are defined most significant bit first.
pub fn reflect_bytes(bytes: &mut [u8]) {
    for b in bytes.iter_mut() {
        *b = reflect_byte(*b);
    }
}

/// Accept only rows with exactly [`FRAME_BITS`] bits.
pub fn validate_length(row: &BitRow) -> Result<(), FrameError> {
    if row.num_bits() == FRAME_BITS {
        Ok(())
    } else {
        Err(FrameError::LengthMismatch {
            expected: FRAME_BITS,
            actual: row.num_bits(),
        })
    }
}

/// Pack the first [`FRAME_BITS`] bits of `row` into bytes and reflect each byte.
pub fn normalize_row(row: &BitRow) -> [u8; FRAME_BYTES] {
    let mut bytes = [0u8; FRAME_BYTES];
    for (dst, src) in bytes.iter_mut().zip(row.extract_bytes(0, FRAME_BITS)) {
        *dst = src;
    }
    reflect_bytes(&mut bytes);
    bytes
}

/// Turn normalized frame bytes back into the row a receiver would demodulate.
pub fn frame_to_row(bytes: &[u8; FRAME_BYTES]) -> BitRow {
    let mut wire = *bytes;
    reflect_bytes(&mut wire);
    BitRow::from_frame_bytes(wire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_byte() {
        assert_eq!(reflect_byte(0x01), 0x80);
        assert_eq!(reflect_byte(0x2A), 0x54);
        assert_eq!(reflect_byte(0xF0), 0x0F);
        assert_eq!(reflect_byte(0xFF), 0xFF);
        for b in 0..=u8::MAX {
            assert_eq!(reflect_byte(reflect_byte(b)), b);
        }
    }

    #[test]
    fn test_reflect_bytes() {
        let mut bytes = [0x01, 0x80, 0xA0];
        reflect_bytes(&mut bytes);
        assert_eq!(bytes, [0x80, 0x01, 0x05]);
    }

    #[test]
    fn test_field_layout() {
        let fields = FrameFields::from_bytes([0x2A, 0x07, 0x03]);
        assert_eq!(fields.command_code(), 2);
        assert_eq!(fields.channel_code(), 0x0A);
        assert_eq!(fields.channel(), 5);
        assert_eq!(fields.value(), 7);
        assert_eq!(fields.checksum(), 3);
    }

    #[test]
    fn test_encode() {
        assert_eq!(FrameFields::encode(2, 5, 7), [0x2A, 0x07, 0x03]);
    }

    #[test]
    fn test_normalize_reflects_wire_order() {
        // 0x2A -> 0x54, 0x07 -> 0xE0, 0x03 -> 0xC0 (only the top nibble is on air)
        let row: BitRow = "{20}54e0c".parse().unwrap();
        assert_eq!(normalize_row(&row), [0x2A, 0x07, 0x03]);
        assert_eq!(frame_to_row(&[0x2A, 0x07, 0x03]), row);
    }

    #[test]
    fn test_validate_length() {
        let row: BitRow = "{20}54e0c".parse().unwrap();
        assert_eq!(validate_length(&row), Ok(()));

        let short: BitRow = "{19}54e0c".parse().unwrap();
        assert_eq!(
            validate_length(&short),
            Err(FrameError::LengthMismatch { expected: 20, actual: 19 })
        );
    }
}
