// src/mapping/mod.rs
//! Derivation of the five upload sheets from linked transaction rows.

use serde::Serialize;

use crate::records::{Contact, Transaction};

pub mod commitments;
pub mod contact_details;
pub mod contact_upload;
pub mod investor_upload;
pub mod specific_investors;
pub mod vocab;

pub use commitments::{commitments, CommitmentRow};
pub use contact_details::{contact_details, ContactDetailRow};
pub use contact_upload::{contact_upload, ContactUploadRow};
pub use investor_upload::{investor_upload, InvestorUploadRow};
pub use specific_investors::{specific_investors, SpecificInvestorRow};

/// A row type of one output sheet.
pub trait SheetRow: Serialize {
    /// File stem of the sheet, e.g. `"1 - Investran Contact Upload"`.
    const SHEET: &'static str;
    /// Column headers, in the order the fields serialize.
    const HEADERS: &'static [&'static str];
}

/// A transaction together with the contact it was linked to.
#[derive(Debug, Clone, Copy)]
pub struct LinkedRow<'a> {
    pub transaction: &'a Transaction,
    pub contact: Option<&'a Contact>,
}

impl<'a> LinkedRow<'a> {
    pub fn contact_field(&self, f: impl Fn(&'a Contact) -> &'a Option<String>) -> Option<String> {
        self.contact.and_then(|c| f(c).clone())
    }
}

/// `"yes"` when `value` is present, otherwise missing (never `"no"`).
pub(crate) fn yes_if_present(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|_| "yes".to_string())
}
