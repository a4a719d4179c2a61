//! Containers for demodulated bit rows.
//!
//! A [`BitRow`] is what the demodulator hands over for one transmission unit:
//! packed bits (MSB-first) plus the number of valid bits. Rows from one capture
//! window are grouped into a [`BitBatch`].
//!
//! Both types use the usual rtl_433 row notation for text I/O: `{20}a5c30` is a
//! 20 bit row whose bits are the hex digits `a5c30`, and rows of one batch are
//! separated by `/`.

use bytes::{Bytes, BytesMut};
use std::fmt;
use std::str::FromStr;

use crate::constants::{FRAME_BITS, FRAME_BYTES};
use crate::error::FanError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitRow {
    bits: Bytes,
    num_bits: usize,
}

/// Mask for the valid bits of the last packed byte of a `num_bits` long row.
fn tail_mask(num_bits: usize) -> u8 {
    match num_bits % 8 {
        0 => 0xFF,
        r => 0xFF << (8 - r),
    }
}

impl BitRow {
    /// Create a row from packed MSB-first bytes.
    ///
    /// Extra trailing bytes are dropped and unused bits of the last byte are cleared.
    pub fn new(bits: impl Into<Bytes>, num_bits: usize) -> Result<Self, FanError> {
        let bits: Bytes = bits.into();
        let needed = num_bits.div_ceil(8);
        if bits.len() < needed {
            return Err(FanError::InsufficientData {
                expected: needed,
                actual: bits.len(),
            });
        }

        let mut packed = BytesMut::from(&bits[..needed]);
        if let Some(last) = packed.last_mut() {
            *last &= tail_mask(num_bits);
        }

        Ok(Self {
            bits: packed.freeze(),
            num_bits,
        })
    }

    /// Row holding exactly one frame's worth of packed bits.
    pub(crate) fn from_frame_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        let mut packed = BytesMut::from(&bytes[..]);
        packed[FRAME_BYTES - 1] &= tail_mask(FRAME_BITS);
        Self {
            bits: packed.freeze(),
            num_bits: FRAME_BITS,
        }
    }

    /// Parse a plain string of `0` and `1` characters.
    pub fn from_bit_str(s: &str) -> Result<Self, FanError> {
        let mut packed = vec![0u8; s.len().div_ceil(8)];
        let mut num_bits = 0;
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => packed[position / 8] |= 0x80 >> (position % 8),
                found => return Err(FanError::InvalidBitCharacter { found, position }),
            }
            num_bits += 1;
        }
        Self::new(packed, num_bits)
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Packed bits, MSB-first. Unused bits of the last byte are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Bit at `index`, or `None` past the end of the row.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.num_bits {
            return None;
        }
        Some(self.bits[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Copy `len` bits starting at `bit_offset` into MSB-first bytes.
    ///
    /// Bits past the end of the row read as zero, so the result is always
    /// `len.div_ceil(8)` bytes long.
    pub fn extract_bytes(&self, bit_offset: usize, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len.div_ceil(8)];
        for i in 0..len {
            if self.bit(bit_offset + i) == Some(true) {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        out
    }

    /// The same row with every bit flipped.
    pub fn inverted(&self) -> Self {
        let mut flipped: BytesMut = self.bits.iter().map(|b| !b).collect();
        if let Some(last) = flipped.last_mut() {
            *last &= tail_mask(self.num_bits);
        }
        Self {
            bits: flipped.freeze(),
            num_bits: self.num_bits,
        }
    }
}

impl fmt::Display for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = hex::encode(&self.bits);
        digits.truncate(self.num_bits.div_ceil(4));
        write!(f, "{{{}}}{}", self.num_bits, digits)
    }
}

impl FromStr for BitRow {
    type Err = FanError;

    /// Accepts `{N}hex`, or bare hex digits meaning four bits per digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (num_bits, digits) = match s.strip_prefix('{') {
            Some(rest) => {
                let (count, digits) = rest
                    .split_once('}')
                    .ok_or_else(|| FanError::InvalidRowNotation(format!("missing '}}' in {s:?}")))?;
                let count = count
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| FanError::InvalidRowNotation(format!("bad bit count {count:?}: {e}")))?;
                (Some(count), digits.trim())
            }
            None => (None, s),
        };

        let mut digits = digits.to_string();
        let hex_digits = digits.len();
        if hex_digits % 2 == 1 {
            digits.push('0');
        }
        let bytes = hex::decode(&digits)?;

        Self::new(bytes, num_bits.unwrap_or(hex_digits * 4))
    }
}

/// All rows demodulated from one capture window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBatch {
    rows: Vec<BitRow>,
}

impl BitBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: BitRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BitRow> {
        self.rows.iter()
    }
}

impl From<Vec<BitRow>> for BitBatch {
    fn from(rows: Vec<BitRow>) -> Self {
        Self { rows }
    }
}

impl FromIterator<BitRow> for BitBatch {
    fn from_iter<I: IntoIterator<Item = BitRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BitBatch {
    type Item = &'a BitRow;
    type IntoIter = std::slice::Iter<'a, BitRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for BitBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl FromStr for BitBatch {
    type Err = FanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(BitRow::from_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_notation_roundtrip() {
        let row: BitRow = "{20}a5c30".parse().unwrap();
        assert_eq!(row.num_bits(), 20);
        assert_eq!(row.as_bytes(), &[0xa5, 0xc3, 0x00]);
        assert_eq!(row.to_string(), "{20}a5c30");
    }

    #[test]
    fn test_bare_hex_uses_four_bits_per_digit() {
        let row: BitRow = "abc".parse().unwrap();
        assert_eq!(row.num_bits(), 12);
        assert_eq!(row.as_bytes(), &[0xab, 0xc0]);
    }

    #[test]
    fn test_new_masks_unused_tail_bits() {
        let row = BitRow::new(vec![0xFF, 0xFF, 0xFF, 0xFF], 20).unwrap();
        assert_eq!(row.as_bytes(), &[0xFF, 0xFF, 0xF0]);
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        assert!(matches!(
            BitRow::new(vec![0x00], 20),
            Err(FanError::InsufficientData { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_bit_string() {
        let row = BitRow::from_bit_str("1010").unwrap();
        assert_eq!(row.num_bits(), 4);
        assert_eq!(row.bit(0), Some(true));
        assert_eq!(row.bit(1), Some(false));
        assert_eq!(row.bit(4), None);

        assert!(matches!(
            BitRow::from_bit_str("10x1"),
            Err(FanError::InvalidBitCharacter { found: 'x', position: 2 })
        ));
    }

    #[test]
    fn test_extract_bytes_pads_with_zero() {
        let row: BitRow = "{12}fff".parse().unwrap();
        assert_eq!(row.extract_bytes(4, 16), vec![0xFF, 0x00]);
    }

    #[test]
    fn test_inverted_keeps_tail_clear() {
        let row: BitRow = "{20}00000".parse().unwrap();
        assert_eq!(row.inverted().as_bytes(), &[0xFF, 0xFF, 0xF0]);
        assert_eq!(row.inverted().inverted(), row);
    }

    #[test]
    fn test_bad_notation() {
        assert!(matches!("{20a5c30".parse::<BitRow>(), Err(FanError::InvalidRowNotation(_))));
        assert!(matches!("{x}a5".parse::<BitRow>(), Err(FanError::InvalidRowNotation(_))));
        assert!(matches!("{8}zz".parse::<BitRow>(), Err(FanError::InvalidHex(_))));
        assert!(matches!("{24}ab".parse::<BitRow>(), Err(FanError::InsufficientData { .. })));
    }

    #[test]
    fn test_batch_notation() {
        let batch: BitBatch = "{20}a5c30 / {8}ff /".parse().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.to_string(), "{20}a5c30/{8}ff");
        assert!("".parse::<BitBatch>().unwrap().is_empty());
    }
}
