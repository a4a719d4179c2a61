//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use regency_fan_lib::bitrow::{BitBatch, BitRow};
#[allow(unused_imports)]
pub use regency_fan_lib::command::{Command, CommandCategory, CommandCode};
#[allow(unused_imports)]
pub use regency_fan_lib::constants::*;
#[allow(unused_imports)]
pub use regency_fan_lib::decoder::{BatchReport, DecoderConfig, RegencyFanDecoder, RowPolarity};
#[allow(unused_imports)]
pub use regency_fan_lib::error::{FanError, FrameError};
#[allow(unused_imports)]
pub use regency_fan_lib::frame::{FrameFields, frame_to_row, normalize_row};
#[allow(unused_imports)]
pub use regency_fan_lib::record::{DecodedRecord, RecordSink};

/// Build the on-air row for a button press with a correct checksum
#[allow(dead_code)]
pub fn wire_row(command: u8, channel: u8, value: u8) -> BitRow {
    frame_to_row(&FrameFields::encode(command, channel, value))
}

/// Same as `wire_row` but with the checksum nibble off by one
#[allow(dead_code)]
pub fn corrupted_row(command: u8, channel: u8, value: u8) -> BitRow {
    let mut bytes = FrameFields::encode(command, channel, value);
    bytes[SUM_BYTE] = (bytes[SUM_BYTE] + 1) & NIBBLE_MASK;
    frame_to_row(&bytes)
}

/// Decode a single row with the default decoder
#[allow(dead_code)]
pub fn decode(row: &BitRow) -> Result<DecodedRecord, FrameError> {
    RegencyFanDecoder::default().decode_row(row)
}

/// Fan speed 7 on channel 5, as captured
#[allow(dead_code)]
pub const FAN_SPEED_CH5: &str = "{20}54e0c";

/// Light intensity 50 % on channel 3, as captured
#[allow(dead_code)]
pub const LIGHT_50_CH3: &str = "{20}324ca";

/// Fan speed 7 on channel 5 with a broken checksum
#[allow(dead_code)]
pub const BAD_CHECKSUM: &str = "{20}54e02";

/// A 24 bit row from some unrelated sensor sharing the band
#[allow(dead_code)]
pub const FOREIGN_ROW: &str = "{24}a1b2c3";
