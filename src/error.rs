// src/error.rs

use regency_fan_lib::FanError;
use std::io;
use thiserror::Error;

/// Errors raised by the `regency-fan` host tool.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Line {line}: {source}")]
    InvalidCapture {
        line: usize,
        #[source]
        source: FanError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
