// Protocol constants for Regency-compatible fan remotes

/// Number of bits in one valid frame
pub const FRAME_BITS: usize = 20;

/// Number of bytes a frame occupies once packed (last byte zero padded)
pub const FRAME_BYTES: usize = 3;

/// Byte holding the checksum nibble in its low 4 bits
pub const SUM_BYTE: usize = 2;

/// Number of leading bytes covered by the nibble sum
pub const CHECKSUM_PAYLOAD_BYTES: usize = 2;

/// Mask applied to the nibble sum and to the checksum byte
pub const NIBBLE_MASK: u8 = 0x0F;

/// Fan direction value meaning clockwise rotation. Anything else is counter-clockwise.
pub const FAN_DIR_CLOCKWISE: u8 = 0x07;

/// Light delay value meaning off. Anything else is on.
pub const LIGHT_DELAY_OFF: u8 = 0x00;

/// Model name reported in every record
pub const MODEL: &str = "Regency-compatible Remote";

/// Device type reported in every record
pub const DEVICE_TYPE: &str = "Ceiling Fan";

/// Integrity check method reported in every record
pub const MIC: &str = "nibble_sum";

/// Fields that may appear in a record, in output order.
///
/// Column-oriented sinks (CSV) must write their header in this order.
pub const OUTPUT_FIELDS: [&str; 6] = ["model", "type", "channel", "command", "value", "mic"];
