// src/config.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

/// Date layout the target platform's upload templates expect.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// The four free-text values broadcast across the output sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    /// "Contact Domain" (sheets 1–3).
    pub contact_domain: String,
    /// "Vehicle" (sheets 4–5).
    pub vehicle: String,
    /// "Specific Vehicle Close Date" (sheet 5).
    pub vehicle_close_date: String,
    /// "Investor Commitment Closing Date" and "... Commitment Date" (sheet 5).
    pub commitment_date: String,
}

impl RunParams {
    /// Load defaults from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Replace each field for which `overrides` carries a value.
    pub fn merge(mut self, overrides: ParamOverrides) -> Self {
        if let Some(v) = overrides.contact_domain {
            self.contact_domain = v;
        }
        if let Some(v) = overrides.vehicle {
            self.vehicle = v;
        }
        if let Some(v) = overrides.vehicle_close_date {
            self.vehicle_close_date = v;
        }
        if let Some(v) = overrides.commitment_date {
            self.commitment_date = v;
        }
        self
    }

    /// Names of date parameters that are non-empty but not `MM/DD/YYYY`.
    /// The pipeline never rejects them; callers decide whether to warn.
    pub fn malformed_dates(&self) -> Vec<&'static str> {
        [
            ("vehicle_close_date", &self.vehicle_close_date),
            ("commitment_date", &self.commitment_date),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty() && NaiveDate::parse_from_str(v, DATE_FORMAT).is_err())
        .map(|(name, _)| name)
        .collect()
    }

    /// Log a warning for every empty or malformed parameter.
    pub fn warn_suspicious(&self) {
        for (name, v) in [
            ("contact_domain", &self.contact_domain),
            ("vehicle", &self.vehicle),
            ("vehicle_close_date", &self.vehicle_close_date),
            ("commitment_date", &self.commitment_date),
        ] {
            if v.is_empty() {
                warn!(param = name, "parameter is empty");
            }
        }
        for name in self.malformed_dates() {
            warn!(param = name, expected = "MM/DD/YYYY", "date parameter is not in the expected format");
        }
    }
}

/// Per-field overrides, typically from the command line.
#[derive(Debug, Clone, Default)]
pub struct ParamOverrides {
    pub contact_domain: Option<String>,
    pub vehicle: Option<String>,
    pub vehicle_close_date: Option<String>,
    pub commitment_date: Option<String>,
}

/// How contact rows are paired with transaction rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Match `transactionContactId` against each transaction's first signer.
    #[default]
    Explicit,
    /// Contact row *i* of the filtered set goes with transaction row *i*.
    /// Transactions past the last contact get none; sheets keep one row per
    /// transaction.
    Positional,
}

/// Everything a single run needs besides its input batches.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub params: RunParams,
    pub link_mode: LinkMode,
}

impl RunContext {
    pub fn new(params: RunParams) -> Self {
        Self {
            params,
            link_mode: LinkMode::default(),
        }
    }

    pub fn with_link_mode(mut self, link_mode: LinkMode) -> Self {
        self.link_mode = link_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn yaml_defaults_then_overrides() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "contact_domain: Fund A Contacts")?;
        writeln!(f, "vehicle: Fund A Feeder")?;
        writeln!(f, "commitment_date: 01/15/2025")?;

        let params = RunParams::from_yaml_file(f.path())?.merge(ParamOverrides {
            vehicle: Some("Fund A Parallel".into()),
            vehicle_close_date: Some("02/01/2025".into()),
            ..Default::default()
        });
        assert_eq!(params.contact_domain, "Fund A Contacts");
        assert_eq!(params.vehicle, "Fund A Parallel");
        assert_eq!(params.vehicle_close_date, "02/01/2025");
        assert_eq!(params.commitment_date, "01/15/2025");
        Ok(())
    }

    #[test]
    fn malformed_dates_are_reported_not_rejected() {
        let params = RunParams {
            vehicle_close_date: "2025-02-01".into(),
            commitment_date: "01/15/2025".into(),
            ..Default::default()
        };
        assert_eq!(params.malformed_dates(), vec!["vehicle_close_date"]);
        assert!(RunParams::default().malformed_dates().is_empty());
    }

    #[test]
    fn explicit_linking_is_the_default() {
        assert_eq!(RunContext::default().link_mode, LinkMode::Explicit);
    }
}
