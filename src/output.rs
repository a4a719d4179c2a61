use clap::ValueEnum;
use regency_fan_lib::constants::OUTPUT_FIELDS;
use regency_fan_lib::{DecodedRecord, RecordSink};
use serde::Serialize;
use std::io::Write;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Header line followed by one row per record
    Csv,
    /// Aligned `key: value` blocks
    Kv,
}

#[derive(Serialize)]
struct Stamped<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<&'a str>,
    #[serde(flatten)]
    record: &'a DecodedRecord,
}

enum Target<W: Write> {
    Plain(W),
    Csv(csv::Writer<W>),
}

/// Writes decoded records to `W` in the selected format.
pub struct RecordWriter<W: Write> {
    target: Target<W>,
    format: OutputFormat,
    timestamps: bool,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer. CSV output gets its header line immediately.
    pub fn new(out: W, format: OutputFormat, timestamps: bool) -> Result<Self, CliError> {
        let target = match format {
            OutputFormat::Csv => {
                let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
                let mut header: Vec<&str> = Vec::with_capacity(OUTPUT_FIELDS.len() + 1);
                if timestamps {
                    header.push("time");
                }
                header.extend(OUTPUT_FIELDS);
                writer.write_record(&header)?;
                Target::Csv(writer)
            }
            OutputFormat::Json | OutputFormat::Kv => Target::Plain(out),
        };

        Ok(Self {
            target,
            format,
            timestamps,
            written: 0,
        })
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, CliError> {
        match self.target {
            Target::Plain(mut out) => {
                out.flush()?;
                Ok(out)
            }
            Target::Csv(writer) => writer.into_inner().map_err(|e| CliError::Io(e.into_error())),
        }
    }

    fn write_record(&mut self, record: &DecodedRecord, time: Option<&str>) -> Result<(), CliError> {
        match (&mut self.target, self.format) {
            (Target::Csv(writer), _) => {
                let mut row: Vec<String> = Vec::with_capacity(OUTPUT_FIELDS.len() + 1);
                row.extend(time.map(str::to_string));
                row.extend(record.field_values());
                writer.write_record(&row)?;
            }
            (Target::Plain(out), OutputFormat::Kv) => {
                if let Some(time) = time {
                    writeln!(out, "{:<12}: {}", "time", time)?;
                }
                for (name, value) in OUTPUT_FIELDS.iter().zip(record.field_values()) {
                    writeln!(out, "{:<12}: {}", name, value)?;
                }
                writeln!(out, "{}", "_ ".repeat(20).trim_end())?;
            }
            (Target::Plain(out), _) => {
                serde_json::to_writer(&mut *out, &Stamped { time, record })?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for RecordWriter<W> {
    type Error = CliError;

    fn emit(&mut self, record: DecodedRecord) -> Result<(), Self::Error> {
        let time = self
            .timestamps
            .then(|| chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        self.write_record(&record, time.as_deref())?;
        self.written += 1;
        Ok(())
    }
}
