pub mod config;
pub use config::{BinningConfig, Config, ExportConfig, LabelConfig};

use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinlensError {
    #[error("parse error in '{input}': {reason}")]
    Parse {
        input: String,
        reason: String,
        #[source]
        source: Option<ParseFloatError>,
    },
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("bin edges not strictly ascending at index {index} ({previous} then {current})")]
    UnsortedEdges {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("formatter failed for boundary {value}: {source}")]
    Format {
        value: f64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("{0}")]
    Other(String),
}

impl BinlensError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BinlensError::Parse { input: input.into(), reason: reason.into(), source: None }
    }
}

pub type Result<T> = std::result::Result<T, BinlensError>;
