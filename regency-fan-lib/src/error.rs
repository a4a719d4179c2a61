use thiserror::Error;

/// The primary error type for the `regency-fan-lib` library.
#[derive(Error, Debug)]
pub enum FanError {
    #[error("Invalid row notation: {0}")]
    InvalidRowNotation(String),

    #[error("Invalid hex in row: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid bit character {found:?} at position {position}")]
    InvalidBitCharacter { found: char, position: usize },

    #[error("Insufficient data: expected at least {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}

/// Reasons a single row is dropped during decoding.
///
/// None of these are fatal. The radio shares airtime with unrelated traffic, so
/// most rows handed to the decoder are expected to land here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("Expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Checksum failure: expected {expected:#x}, calculated {calculated:#x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    #[error("Unknown command: {0}")]
    UnknownCommand(u8),
}
