// src/error.rs
use thiserror::Error;

/// Why a single input batch could not be turned into records.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch has no header row")]
    NoHeader,

    #[error("CSV parse error at record {record}: {source}")]
    Csv {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("record {record} has {found} fields but the header has {expected}")]
    RowTooLong {
        record: usize,
        found: usize,
        expected: usize,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON batch must be an array of objects")]
    NotRecords,
}

/// Run-level conditions that stop the pipeline before any sheet is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("no readable TRANSACTION batch was provided")]
    MissingTransactions,

    #[error("no readable CONTACT batch was provided")]
    MissingContacts,
}
