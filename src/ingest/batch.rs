// src/ingest/batch.rs
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::io::Cursor;
use tracing::trace;

use super::utils::{csv_cell, json_cell};
use super::RecordSet;
use crate::error::BatchError;

/// How a batch's bytes are encoded, decided from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFormat {
    Csv,
    Json,
}

impl BatchFormat {
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".json") {
            BatchFormat::Json
        } else {
            BatchFormat::Csv
        }
    }
}

/// One uploaded file, held in memory.
#[derive(Debug, Clone)]
pub struct Batch {
    pub name: String,
    pub data: Vec<u8>,
}

impl Batch {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn format(&self) -> BatchFormat {
        BatchFormat::from_name(&self.name)
    }
}

/// Parse a batch into a `RecordSet` according to its format.
pub fn parse_batch(batch: &Batch) -> Result<RecordSet, BatchError> {
    match batch.format() {
        BatchFormat::Csv => parse_csv(&batch.data),
        BatchFormat::Json => parse_json(&batch.data),
    }
}

fn parse_csv(data: &[u8]) -> Result<RecordSet, BatchError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are padded below
        .from_reader(Cursor::new(data));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| BatchError::Csv { record: 0, source })?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(BatchError::NoHeader);
    }

    let mut table = RecordSet::new(headers);
    let width = table.headers.len();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|source| BatchError::Csv {
            record: idx + 1,
            source,
        })?;
        if record.len() > width {
            return Err(BatchError::RowTooLong {
                record: idx + 1,
                found: record.len(),
                expected: width,
            });
        }
        let mut row: Vec<Value> = record.iter().map(csv_cell).collect();
        row.resize(width, Value::Null);
        trace!(record = idx + 1, "csv row");
        table.rows.push(row);
    }

    Ok(table)
}

fn parse_json(data: &[u8]) -> Result<RecordSet, BatchError> {
    let value: Value = serde_json::from_slice(data)?;
    let Value::Array(items) = value else {
        return Err(BatchError::NotRecords);
    };

    let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => objects.push(map),
            _ => return Err(BatchError::NotRecords),
        }
    }

    let mut headers: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut table = RecordSet::new(headers);
    for mut obj in objects {
        let row = table
            .headers
            .iter()
            .map(|h| obj.remove(h).map(json_cell).unwrap_or(Value::Null))
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}
