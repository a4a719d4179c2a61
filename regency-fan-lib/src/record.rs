use serde::Serialize;
use std::convert::Infallible;
use std::fmt;

use crate::command::{Command, CommandCategory};
use crate::constants::{DEVICE_TYPE, MIC, MODEL, OUTPUT_FIELDS};

/// One decoded button press, ready for an output sink.
///
/// Serializes with the keys and order of [`OUTPUT_FIELDS`]. Records only come
/// out of [`RegencyFanDecoder`](crate::RegencyFanDecoder), after a row has passed
/// the length and checksum checks:
///
/// ```compile_fail
/// use regency_fan_lib::DecodedRecord;
/// use regency_fan_lib::command::CommandCategory;
///
/// let forged = DecodedRecord {
///     model: "Regency-compatible Remote",
///     device_type: "Ceiling Fan",
///     channel: 42,
///     command: CommandCategory::FanSpeed,
///     value: "speed 7".to_string(),
///     mic: "nibble_sum",
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct DecodedRecord {
    pub model: &'static str,
    #[serde(rename = "type")]
    pub device_type: &'static str,
    pub channel: u8,
    pub command: CommandCategory,
    pub value: String,
    pub mic: &'static str,
}

impl DecodedRecord {
    pub(crate) fn new(channel: u8, command: &Command) -> Self {
        Self {
            model: MODEL,
            device_type: DEVICE_TYPE,
            channel,
            command: command.category(),
            value: command.to_string(),
            mic: MIC,
        }
    }

    /// Field values as text, aligned with [`OUTPUT_FIELDS`].
    pub fn field_values(&self) -> [String; OUTPUT_FIELDS.len()] {
        [
            self.model.to_string(),
            self.device_type.to_string(),
            self.channel.to_string(),
            self.command.to_string(),
            self.value.clone(),
            self.mic.to_string(),
        ]
    }
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [channel {}] {}: {}",
            self.model, self.channel, self.command, self.value
        )
    }
}

/// Destination for decoded records.
pub trait RecordSink {
    type Error;

    fn emit(&mut self, record: DecodedRecord) -> Result<(), Self::Error>;
}

impl RecordSink for Vec<DecodedRecord> {
    type Error = Infallible;

    fn emit(&mut self, record: DecodedRecord) -> Result<(), Self::Error> {
        self.push(record);
        Ok(())
    }
}
