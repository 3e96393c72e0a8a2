// src/records.rs
//! Typed views over the combined TRANSACTION and CONTACT record sets.

use serde_json::Value;

use crate::ingest::utils::{cell_text, parse_int_key};
use crate::ingest::RecordSet;

/// Columns a TRANSACTION export is expected to carry, in order.
pub const TRANSACTION_COLUMNS: &[&str] = &[
    "investorName",
    "investorSourceId",
    "fundName",
    "commitment",
    "authorizedInvestor",
    "domicile",
    "formPfInvestorType",
    "investorType",
    "isDisregardedEntity",
    "isUsTaxExempt",
    "qpAssets25",
    "qpAssets5",
    "signers",
    "ssn",
    "ein",
    "personOrEntity",
    "state",
    "street",
    "city",
    "zip",
    "nomineeName",
    "nomineeAccountNo",
    "erisaVehicle",
    "benefitPlanPercent",
];

/// Columns a CONTACT export is expected to carry, in order.
pub const CONTACT_COLUMNS: &[&str] = &[
    "transactionContactId",
    "investmentId",
    "relationship",
    "email",
    "firstName",
    "lastName",
    "fullName",
    "contactPhone",
];

/// One investor commitment event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub investor_name: Option<String>,
    pub investor_source_id: Option<String>,
    pub fund_name: Option<String>,
    pub commitment: Option<String>,
    pub authorized_investor: Option<String>,
    pub domicile: Option<String>,
    pub form_pf_investor_type: Option<String>,
    pub investor_type: Option<String>,
    pub is_disregarded_entity: Option<String>,
    pub is_us_tax_exempt: Option<String>,
    pub qp_assets_25: Option<String>,
    pub qp_assets_5: Option<String>,
    /// Raw signer field; may be missing, a native list, or text.
    pub signers: Value,
    pub ssn: Option<String>,
    pub ein: Option<String>,
    pub person_or_entity: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub nominee_name: Option<String>,
    pub nominee_account_no: Option<String>,
    pub erisa_vehicle: Option<String>,
    pub benefit_plan_percent: Option<String>,
}

/// One contact attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub transaction_contact_id: Option<String>,
    pub investment_id: Option<String>,
    pub relationship: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub contact_phone: Option<String>,
}

impl Contact {
    /// Join key against a transaction's first signer.
    pub fn contact_id(&self) -> Option<i64> {
        self.transaction_contact_id.as_deref().and_then(parse_int_key)
    }
}

/// Reindex `set` to `TRANSACTION_COLUMNS` and read each row.
pub fn transactions(set: &RecordSet) -> Vec<Transaction> {
    let t = set.reindex(TRANSACTION_COLUMNS);
    (0..t.len())
        .map(|i| {
            let text = |c: &str| cell_text(t.get(i, c));
            Transaction {
                investor_name: text("investorName"),
                investor_source_id: text("investorSourceId"),
                fund_name: text("fundName"),
                commitment: text("commitment"),
                authorized_investor: text("authorizedInvestor"),
                domicile: text("domicile"),
                form_pf_investor_type: text("formPfInvestorType"),
                investor_type: text("investorType"),
                is_disregarded_entity: text("isDisregardedEntity"),
                is_us_tax_exempt: text("isUsTaxExempt"),
                qp_assets_25: text("qpAssets25"),
                qp_assets_5: text("qpAssets5"),
                signers: t.get(i, "signers").clone(),
                ssn: text("ssn"),
                ein: text("ein"),
                person_or_entity: text("personOrEntity"),
                state: text("state"),
                street: text("street"),
                city: text("city"),
                zip: text("zip"),
                nominee_name: text("nomineeName"),
                nominee_account_no: text("nomineeAccountNo"),
                erisa_vehicle: text("erisaVehicle"),
                benefit_plan_percent: text("benefitPlanPercent"),
            }
        })
        .collect()
}

/// Reindex `set` to `CONTACT_COLUMNS` and read each row.
pub fn contacts(set: &RecordSet) -> Vec<Contact> {
    let c = set.reindex(CONTACT_COLUMNS);
    (0..c.len())
        .map(|i| {
            let text = |col: &str| cell_text(c.get(i, col));
            Contact {
                transaction_contact_id: text("transactionContactId"),
                investment_id: text("investmentId"),
                relationship: text("relationship"),
                email: text("email"),
                first_name: text("firstName"),
                last_name: text("lastName"),
                full_name: text("fullName"),
                contact_phone: text("contactPhone"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transactions_tolerate_missing_and_extra_columns() {
        let mut set = RecordSet::new(vec![
            "unused".into(),
            "investorName".into(),
            "signers".into(),
        ]);
        set.rows
            .push(vec![json!("x"), json!("Acme LLC"), json!([1234567])]);

        let rows = transactions(&set);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].investor_name.as_deref(), Some("Acme LLC"));
        assert_eq!(rows[0].signers, json!([1234567]));
        assert_eq!(rows[0].ssn, None);
    }

    #[test]
    fn contact_ids_parse_from_text() {
        let mut set = RecordSet::new(vec!["transactionContactId".into(), "fullName".into()]);
        set.rows.push(vec![json!("555.0"), json!("Jane Doe")]);
        set.rows.push(vec![json!(556), Value::Null]);
        set.rows.push(vec![Value::Null, json!("Nobody")]);

        let rows = contacts(&set);
        assert_eq!(rows[0].contact_id(), Some(555));
        assert_eq!(rows[1].contact_id(), Some(556));
        assert_eq!(rows[2].contact_id(), None);
        assert_eq!(rows[0].full_name.as_deref(), Some("Jane Doe"));
    }
}
