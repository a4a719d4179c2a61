use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bitrow::{BitBatch, BitRow};
use crate::checksum::verify_checksum;
use crate::command::Command;
use crate::error::FrameError;
use crate::frame::{FrameFields, normalize_row, validate_length};
use crate::record::{DecodedRecord, RecordSink};

/// Bit polarity of incoming rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolarity {
    /// Rows already carry the remote's bit values.
    #[default]
    AsReceived,
    /// Rows come straight from a PPM slicer that reads a narrow gap as `0`.
    Inverted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub polarity: RowPolarity,
}

/// A row that did not produce a record, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRejection {
    pub row: usize,
    pub reason: FrameError,
}

/// Outcome of decoding one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub records: Vec<DecodedRecord>,
    pub rejections: Vec<RowRejection>,
}

impl BatchReport {
    /// True when at least one row produced a record.
    pub fn is_success(&self) -> bool {
        !self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegencyFanDecoder {
    config: DecoderConfig,
}

impl RegencyFanDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Run one row through length check, normalization, checksum and field decoding.
    pub fn decode_row(&self, row: &BitRow) -> Result<DecodedRecord, FrameError> {
        validate_length(row)?;

        let bytes = match self.config.polarity {
            RowPolarity::AsReceived => normalize_row(row),
            RowPolarity::Inverted => normalize_row(&row.inverted()),
        };
        verify_checksum(&bytes)?;

        let fields = FrameFields::from_bytes(bytes);
        let command = Command::decode(fields.command_code(), fields.value())?;

        Ok(DecodedRecord::new(fields.channel(), &command))
    }

    /// Decode every row of a batch, keeping the reason for each dropped row.
    pub fn decode_batch(&self, batch: &BitBatch) -> BatchReport {
        let mut report = BatchReport::default();
        self.log_batch(batch);

        for (index, row) in batch.iter().enumerate() {
            match self.decode_logged(index, row) {
                Ok(record) => report.records.push(record),
                Err(reason) => report.rejections.push(RowRejection { row: index, reason }),
            }
        }

        report
    }

    /// Decode a batch straight into `sink`.
    ///
    /// Returns whether any row produced a record. Only a failing sink is an error.
    pub fn decode_into<S: RecordSink>(&self, batch: &BitBatch, sink: &mut S) -> Result<bool, S::Error> {
        let mut decoded = false;
        self.log_batch(batch);

        for (index, row) in batch.iter().enumerate() {
            if let Ok(record) = self.decode_logged(index, row) {
                sink.emit(record)?;
                decoded = true;
            }
        }

        Ok(decoded)
    }

    fn log_batch(&self, batch: &BitBatch) {
        if batch.is_empty() {
            debug!("No rows.");
        } else {
            trace!(rows = batch.len(), "Decoding batch: {}", batch);
        }
    }

    fn decode_logged(&self, index: usize, row: &BitRow) -> Result<DecodedRecord, FrameError> {
        let result = self.decode_row(row);
        match &result {
            Ok(record) => debug!(row = index, "Decoded {}", record),
            Err(reason) => debug!(row = index, bits = %row, "Skipping row: {}", reason),
        }
        result
    }
}
