// src/pipeline/align.rs
use tracing::{debug, warn};

use super::UploadSheets;
use crate::mapping::SheetRow;
use crate::records::Transaction;

/// Number of transactions that carry an investor name.
pub fn investor_count(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|t| t.investor_name.is_some())
        .count()
}

fn truncate_sheet<T: SheetRow>(rows: &mut Vec<T>, count: usize) {
    if rows.len() < count {
        warn!(
            sheet = T::SHEET,
            rows = rows.len(),
            expected = count,
            "sheet is shorter than the investor count; left as is"
        );
        return;
    }
    debug!(sheet = T::SHEET, from = rows.len(), to = count, "truncating");
    rows.truncate(count);
}

/// Cut every sheet to the first `count` rows. Sheets are never padded.
pub fn align_sheets(mut sheets: UploadSheets, count: usize) -> UploadSheets {
    truncate_sheet(&mut sheets.contact_upload, count);
    truncate_sheet(&mut sheets.contact_details, count);
    truncate_sheet(&mut sheets.investor_upload, count);
    truncate_sheet(&mut sheets.specific_investors, count);
    truncate_sheet(&mut sheets.commitments, count);
    sheets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::SpecificInvestorRow;

    fn specific_rows(n: usize) -> Vec<SpecificInvestorRow> {
        (0..n)
            .map(|i| SpecificInvestorRow {
                legal_entity: None,
                vehicle: "V".into(),
                investor: Some(format!("I{}", i)),
            })
            .collect()
    }

    #[test]
    fn truncates_from_the_start_and_never_pads() {
        let sheets = UploadSheets {
            specific_investors: specific_rows(4),
            ..Default::default()
        };
        let aligned = align_sheets(sheets, 2);
        let names: Vec<_> = aligned
            .specific_investors
            .iter()
            .map(|r| r.investor.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["I0", "I1"]);
        // the empty sheets stay empty
        assert!(aligned.contact_upload.is_empty());
    }

    #[test]
    fn counts_named_investors_only() {
        let txs = vec![
            Transaction {
                investor_name: Some("A".into()),
                ..Default::default()
            },
            Transaction::default(),
            Transaction {
                investor_name: Some("C".into()),
                ..Default::default()
            },
        ];
        assert_eq!(investor_count(&txs), 2);
    }
}
