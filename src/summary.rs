// src/summary.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::warn;

use crate::ingest::{Combined, SkippedBatch};
use crate::mapping::investor_upload::TAX_ID_ERROR;
use crate::mapping::vocab::UNRECOGNIZED;
use crate::mapping::InvestorUploadRow;

/// How one entity's batches fared in the combiner.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BatchStats {
    pub parsed: usize,
    pub rows: usize,
    pub skipped: Vec<SkippedBatch>,
}

impl From<&Combined> for BatchStats {
    fn from(c: &Combined) -> Self {
        Self {
            parsed: c.parsed,
            rows: c.total_rows(),
            skipped: c.skipped.clone(),
        }
    }
}

/// Counts describing a finished run, written alongside the sheets.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RunSummary {
    pub transactions: BatchStats,
    pub contacts: BatchStats,
    pub filtered_contacts: usize,
    pub linked_transactions: usize,
    pub aligned_rows: usize,
    /// Column header → number of rows carrying a sentinel value.
    pub sentinels: BTreeMap<String, usize>,
}

impl RunSummary {
    /// Count sentinel values per column in the investor sheet.
    pub fn count_sentinels(&mut self, rows: &[InvestorUploadRow]) {
        let tax_error = TAX_ID_ERROR.replace('-', "");
        let is_unrecognized = |v: &Option<String>| v.as_deref() == Some(UNRECOGNIZED);

        let counts = [
            ("Investor SubType", rows.iter().filter(|r| is_unrecognized(&r.sub_type)).count()),
            ("Domicile", rows.iter().filter(|r| is_unrecognized(&r.domicile)).count()),
            (
                "Accredited Investor",
                rows.iter()
                    .filter(|r| is_unrecognized(&r.accredited_investor))
                    .count(),
            ),
            ("Investor Tax ID", rows.iter().filter(|r| r.tax_id == tax_error).count()),
        ];
        for (column, n) in counts {
            if n > 0 {
                warn!(column, rows = n, "rows need manual review");
                self.sentinels.insert(column.to_string(), n);
            }
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing run summary")?;
        fs::write(path, text + "\n")
            .with_context(|| format!("writing summary {}", path.display()))
    }
}
