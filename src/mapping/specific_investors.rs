// src/mapping/specific_investors.rs
use serde::Serialize;

use super::{InvestorUploadRow, LinkedRow, SheetRow};
use crate::config::RunParams;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificInvestorRow {
    #[serde(rename = "Legal Entity")]
    pub legal_entity: Option<String>,
    #[serde(rename = "Vehicle")]
    pub vehicle: String,
    #[serde(rename = "Investor")]
    pub investor: Option<String>,
}

impl SheetRow for SpecificInvestorRow {
    const SHEET: &'static str = "4 - Investran Specific Investors";
    const HEADERS: &'static [&'static str] = &["Legal Entity", "Vehicle", "Investor"];
}

pub fn specific_investors(
    rows: &[LinkedRow],
    investors: &[InvestorUploadRow],
    params: &RunParams,
) -> Vec<SpecificInvestorRow> {
    rows.iter()
        .zip(investors)
        .map(|(r, inv)| SpecificInvestorRow {
            legal_entity: r.transaction.fund_name.clone(),
            vehicle: params.vehicle.clone(),
            investor: inv.investor_name.clone(),
        })
        .collect()
}
