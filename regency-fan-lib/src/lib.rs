pub mod bitrow;
pub mod checksum;
pub mod command;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod record;
pub mod timing;


// Re-export the decoder and its inputs/outputs for easy access
pub use bitrow::{BitBatch, BitRow};
pub use decoder::{BatchReport, DecoderConfig, RegencyFanDecoder, RowPolarity};
pub use error::{FanError, FrameError};
pub use record::{DecodedRecord, RecordSink};
