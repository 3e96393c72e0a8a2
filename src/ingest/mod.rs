// src/ingest/mod.rs
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub mod batch;
pub mod source;
pub mod utils;

pub use batch::{parse_batch, Batch, BatchFormat};
pub use source::load_batches;

static MISSING: Value = Value::Null;

/// One logical table: column names plus row-major cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    /// Column names, in the order the batch declared them.
    pub headers: Vec<String>,
    /// Each row has exactly `headers.len()` cells; `Null` is a missing value.
    pub rows: Vec<Vec<Value>>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (`row`, `column`); absent columns read as missing.
    pub fn get(&self, row: usize, column: &str) -> &Value {
        self.column_index(column)
            .and_then(|c| self.rows.get(row).and_then(|r| r.get(c)))
            .unwrap_or(&MISSING)
    }

    /// Concatenate tables in order. Columns are unioned in first-seen order and
    /// cells a table does not have are filled with missing.
    pub fn concat(sets: Vec<RecordSet>) -> RecordSet {
        let mut headers: Vec<String> = Vec::new();
        for set in &sets {
            for h in &set.headers {
                if !headers.contains(h) {
                    headers.push(h.clone());
                }
            }
        }

        let mut out = RecordSet::new(headers);
        for set in sets {
            let positions: Vec<Option<usize>> =
                out.headers.iter().map(|h| set.column_index(h)).collect();
            for row in set.rows {
                let aligned = positions
                    .iter()
                    .map(|p| p.and_then(|i| row.get(i).cloned()).unwrap_or(Value::Null))
                    .collect();
                out.rows.push(aligned);
            }
        }
        out
    }

    /// Project onto exactly `columns`: absent ones are filled with missing,
    /// extra ones are dropped.
    pub fn reindex(&self, columns: &[&str]) -> RecordSet {
        let positions: Vec<Option<usize>> = columns.iter().map(|c| self.column_index(c)).collect();
        let dropped = self
            .headers
            .iter()
            .filter(|h| !columns.contains(&h.as_str()))
            .count();
        let filled = positions.iter().filter(|p| p.is_none()).count();
        if dropped > 0 || filled > 0 {
            debug!(dropped, filled, "reindexed to expected columns");
        }

        RecordSet {
            headers: columns.iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    positions
                        .iter()
                        .map(|p| p.and_then(|i| row.get(i).cloned()).unwrap_or(Value::Null))
                        .collect()
                })
                .collect(),
        }
    }
}

/// A batch that was dropped, and why.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedBatch {
    pub name: String,
    pub error: String,
}

/// Result of merging every batch of one entity type.
#[derive(Debug, Clone, Default)]
pub struct Combined {
    /// `None` when no batch could be parsed.
    pub records: Option<RecordSet>,
    pub parsed: usize,
    pub skipped: Vec<SkippedBatch>,
}

impl Combined {
    pub fn total_rows(&self) -> usize {
        self.records.as_ref().map_or(0, RecordSet::len)
    }
}

/// Parse each batch, skip the unreadable ones with a warning, and
/// concatenate the rest in the order given.
#[instrument(level = "info", skip(batches), fields(batches = batches.len()))]
pub fn combine_batches(entity: &str, batches: &[Batch]) -> Combined {
    let mut tables = Vec::with_capacity(batches.len());
    let mut skipped = Vec::new();

    for batch in batches {
        match parse_batch(batch) {
            Ok(table) => {
                debug!(batch = %batch.name, rows = table.len(), "parsed batch");
                tables.push(table);
            }
            Err(e) => {
                warn!(batch = %batch.name, error = %e, "could not read {} batch, skipping", entity);
                skipped.push(SkippedBatch {
                    name: batch.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if tables.is_empty() {
        warn!(entity, skipped = skipped.len(), "no readable batches");
        return Combined {
            records: None,
            parsed: 0,
            skipped,
        };
    }

    let parsed = tables.len();
    let records = RecordSet::concat(tables);
    info!(
        entity,
        parsed,
        rows = records.len(),
        "combined {} files ({} total rows)",
        parsed,
        records.len()
    );

    Combined {
        records: Some(records),
        parsed,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,investran_upload=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn csv_batch(name: &str, text: &str) -> Batch {
        Batch::new(name, text.as_bytes().to_vec())
    }

    #[test]
    fn combine_preserves_batch_and_row_order() {
        let batches = vec![
            csv_batch("a.csv", "investorName,fundName\nA1,F\nA2,F\n"),
            csv_batch("b.csv", "investorName,fundName\nB1,G\n"),
        ];
        let combined = combine_batches("transaction", &batches);
        let records = combined.records.expect("records");
        assert_eq!(combined.parsed, 2);
        assert_eq!(records.len(), 3);
        let names: Vec<&Value> = (0..3).map(|i| records.get(i, "investorName")).collect();
        assert_eq!(names, vec![&json!("A1"), &json!("A2"), &json!("B1")]);
    }

    #[test]
    fn unreadable_batch_is_skipped_not_fatal() {
        init_test_logging();
        let batches = vec![
            csv_batch("bad.csv", ""),
            csv_batch("good.csv", "investorName\nX\n"),
        ];
        let combined = combine_batches("transaction", &batches);
        assert_eq!(combined.parsed, 1);
        assert_eq!(combined.skipped.len(), 1);
        assert_eq!(combined.skipped[0].name, "bad.csv");
        assert_eq!(combined.total_rows(), 1);
    }

    #[test]
    fn all_batches_unreadable_is_absent() {
        let batches = vec![csv_batch("bad.json", "{not json")];
        let combined = combine_batches("contact", &batches);
        assert!(combined.records.is_none());
        assert_eq!(combine_batches("contact", &[]).records, None);
    }

    #[test]
    fn concat_unions_columns() {
        let mut a = RecordSet::new(vec!["x".into()]);
        a.rows.push(vec![json!("1")]);
        let mut b = RecordSet::new(vec!["y".into(), "x".into()]);
        b.rows.push(vec![json!("2"), json!("3")]);

        let c = RecordSet::concat(vec![a, b]);
        assert_eq!(c.headers, vec!["x", "y"]);
        assert_eq!(c.rows[0], vec![json!("1"), Value::Null]);
        assert_eq!(c.rows[1], vec![json!("3"), json!("2")]);
    }

    #[test]
    fn reindex_fills_and_drops() {
        let mut t = RecordSet::new(vec!["extra".into(), "b".into()]);
        t.rows.push(vec![json!("e"), json!("bee")]);
        let r = t.reindex(&["a", "b"]);
        assert_eq!(r.headers, vec!["a", "b"]);
        assert_eq!(r.rows[0], vec![Value::Null, json!("bee")]);
        assert_eq!(r.get(0, "extra"), &Value::Null);
    }
}
