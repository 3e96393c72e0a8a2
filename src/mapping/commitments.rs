// src/mapping/commitments.rs
use serde::Serialize;

use super::{InvestorUploadRow, LinkedRow, SheetRow, SpecificInvestorRow};
use crate::config::RunParams;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitmentRow {
    #[serde(rename = "Legal Entity")]
    pub legal_entity: Option<String>,
    #[serde(rename = "Vehicle")]
    pub vehicle: String,
    #[serde(rename = "Specific Vehicle Close Date")]
    pub vehicle_close_date: String,
    #[serde(rename = "Investor")]
    pub investor: Option<String>,
    #[serde(rename = "Investor Commitment Amount")]
    pub amount: Option<String>,
    #[serde(rename = "Investor Commitment Closing Date")]
    pub closing_date: String,
    #[serde(rename = "Investor Commitment Commitment Date")]
    pub commitment_date: String,
}

impl SheetRow for CommitmentRow {
    const SHEET: &'static str = "5 - Investran Commitments";
    const HEADERS: &'static [&'static str] = &[
        "Legal Entity",
        "Vehicle",
        "Specific Vehicle Close Date",
        "Investor",
        "Investor Commitment Amount",
        "Investor Commitment Closing Date",
        "Investor Commitment Commitment Date",
    ];
}

pub fn commitments(
    rows: &[LinkedRow],
    investors: &[InvestorUploadRow],
    specific: &[SpecificInvestorRow],
    params: &RunParams,
) -> Vec<CommitmentRow> {
    rows.iter()
        .zip(investors)
        .zip(specific)
        .map(|((r, inv), specific_row)| CommitmentRow {
            legal_entity: r.transaction.fund_name.clone(),
            vehicle: specific_row.vehicle.clone(),
            vehicle_close_date: params.vehicle_close_date.clone(),
            investor: inv.investor_name.clone(),
            amount: r.transaction.commitment.clone(),
            closing_date: params.commitment_date.clone(),
            commitment_date: params.commitment_date.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{contact_details, contact_upload, investor_upload, specific_investors};
    use crate::records::Transaction;

    #[test]
    fn scalars_are_broadcast_to_every_row() {
        let txs = [
            Transaction {
                investor_name: Some("Acme LLC".into()),
                investor_source_id: Some("SRC1".into()),
                fund_name: Some("Fund A".into()),
                commitment: Some("2500000".into()),
                ..Default::default()
            },
            Transaction {
                investor_name: Some("Beta LP".into()),
                investor_source_id: Some("SRC2".into()),
                fund_name: Some("Fund A".into()),
                commitment: Some("1000000".into()),
                ..Default::default()
            },
        ];
        let rows: Vec<LinkedRow> = txs
            .iter()
            .map(|t| LinkedRow {
                transaction: t,
                contact: None,
            })
            .collect();
        let params = RunParams {
            contact_domain: "Fund A".into(),
            vehicle: "Fund A Feeder".into(),
            vehicle_close_date: "03/31/2025".into(),
            commitment_date: "03/15/2025".into(),
        };

        let upload = contact_upload(&rows, &params);
        let details = contact_details(&rows, &upload);
        let investors = investor_upload(&rows, &details, &params);
        let specific = specific_investors(&rows, &investors, &params);
        let sheet = commitments(&rows, &investors, &specific, &params);

        assert_eq!(specific[1].investor.as_deref(), Some("Beta LP:  SRC2"));
        assert_eq!(specific[0].legal_entity.as_deref(), Some("Fund A"));
        for row in &sheet {
            assert_eq!(row.vehicle, "Fund A Feeder");
            assert_eq!(row.vehicle_close_date, "03/31/2025");
            assert_eq!(row.closing_date, "03/15/2025");
            assert_eq!(row.commitment_date, "03/15/2025");
        }
        assert_eq!(sheet[0].amount.as_deref(), Some("2500000"));
        assert_eq!(sheet[1].investor.as_deref(), Some("Beta LP:  SRC2"));
    }
}
