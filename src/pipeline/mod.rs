// src/pipeline/mod.rs
//! The conversion run: combine → resolve signers → filter contacts → map →
//! align. Every stage takes its inputs by reference and returns new data.

use tracing::{info, instrument};

use crate::config::RunContext;
use crate::contacts::{filter_contacts, first_signer_ids, link_contacts};
use crate::error::PipelineError;
use crate::ingest::{combine_batches, Batch, Combined};
use crate::mapping::{
    commitments, contact_details, contact_upload, investor_upload, specific_investors,
    CommitmentRow, ContactDetailRow, ContactUploadRow, InvestorUploadRow, LinkedRow,
    SpecificInvestorRow,
};
use crate::records::{self, Contact, Transaction};
use crate::signers::{resolve_signers, Signers};
use crate::summary::RunSummary;

pub mod align;

pub use align::{align_sheets, investor_count};

/// The five upload sheets of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSheets {
    pub contact_upload: Vec<ContactUploadRow>,
    pub contact_details: Vec<ContactDetailRow>,
    pub investor_upload: Vec<InvestorUploadRow>,
    pub specific_investors: Vec<SpecificInvestorRow>,
    pub commitments: Vec<CommitmentRow>,
}

impl UploadSheets {
    /// Row counts in sheet order.
    pub fn row_counts(&self) -> [usize; 5] {
        [
            self.contact_upload.len(),
            self.contact_details.len(),
            self.investor_upload.len(),
            self.specific_investors.len(),
            self.commitments.len(),
        ]
    }
}

/// Sheets plus the bookkeeping of how they were produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub sheets: UploadSheets,
    pub summary: RunSummary,
}

/// How many contacts survived filtering and how many transactions found one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub filtered_contacts: usize,
    pub linked_transactions: usize,
}

/// Derive all five sheets from already-typed records. Sheets are full length
/// (one row per transaction) and not yet aligned.
pub fn map_sheets(
    ctx: &RunContext,
    transactions: &[Transaction],
    contacts: &[Contact],
) -> (UploadSheets, LinkStats) {
    let signers: Vec<Signers> = transactions
        .iter()
        .map(|t| resolve_signers(&t.signers))
        .collect();
    let filtered = filter_contacts(contacts, &first_signer_ids(&signers));
    let links = link_contacts(&signers, &filtered, ctx.link_mode);

    let rows: Vec<LinkedRow> = transactions
        .iter()
        .zip(links)
        .map(|(transaction, contact)| LinkedRow {
            transaction,
            contact,
        })
        .collect();
    let linked = rows.iter().filter(|r| r.contact.is_some()).count();

    let params = &ctx.params;
    let sheet1 = contact_upload(&rows, params);
    let sheet2 = contact_details(&rows, &sheet1);
    let sheet3 = investor_upload(&rows, &sheet2, params);
    let sheet4 = specific_investors(&rows, &sheet3, params);
    let sheet5 = commitments(&rows, &sheet3, &sheet4, params);

    (
        UploadSheets {
            contact_upload: sheet1,
            contact_details: sheet2,
            investor_upload: sheet3,
            specific_investors: sheet4,
            commitments: sheet5,
        },
        LinkStats {
            filtered_contacts: filtered.len(),
            linked_transactions: linked,
        },
    )
}

/// Run the pipeline over already-combined record sets.
///
/// Fails without producing anything if either record set is absent.
#[instrument(level = "info", skip_all, fields(link_mode = ?ctx.link_mode))]
pub fn run_combined(
    ctx: &RunContext,
    transactions: &Combined,
    contacts: &Combined,
) -> Result<RunOutput, PipelineError> {
    let tx_set = transactions
        .records
        .as_ref()
        .ok_or(PipelineError::MissingTransactions)?;
    let contact_set = contacts
        .records
        .as_ref()
        .ok_or(PipelineError::MissingContacts)?;

    let txs = records::transactions(tx_set);
    let cts = records::contacts(contact_set);

    let (sheets, stats) = map_sheets(ctx, &txs, &cts);
    let count = investor_count(&txs);
    let sheets = align_sheets(sheets, count);

    let mut summary = RunSummary {
        transactions: transactions.into(),
        contacts: contacts.into(),
        filtered_contacts: stats.filtered_contacts,
        linked_transactions: stats.linked_transactions,
        aligned_rows: count,
        ..Default::default()
    };
    summary.count_sentinels(&sheets.investor_upload);

    info!(
        transactions = txs.len(),
        contacts = cts.len(),
        linked = stats.linked_transactions,
        rows = count,
        "converted"
    );
    Ok(RunOutput { sheets, summary })
}

/// Combine raw batches and run the pipeline.
pub fn run(
    ctx: &RunContext,
    transaction_batches: &[Batch],
    contact_batches: &[Batch],
) -> Result<RunOutput, PipelineError> {
    let transactions = combine_batches("transaction", transaction_batches);
    let contacts = combine_batches("contact", contact_batches);
    run_combined(ctx, &transactions, &contacts)
}
