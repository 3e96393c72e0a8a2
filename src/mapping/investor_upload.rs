// src/mapping/investor_upload.rs
use serde::Serialize;
use tracing::warn;

use super::vocab::{
    ACCREDITED_INVESTOR, DISREGARDED_ENTITY, DOMICILES, ERISA, FORM_PF_INVESTOR_TYPES,
    INVESTOR_SUBTYPES, QUALIFIED_PURCHASER, TAX_EXEMPT,
};
use super::{ContactDetailRow, LinkedRow, SheetRow};
use crate::config::RunParams;
use crate::records::Transaction;

/// Written to "Investor Tax ID" when SSN/EIN are both present or both missing.
pub const TAX_ID_ERROR: &str = "Error: Exactly one of SSN or EIN must be populated";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvestorUploadRow {
    #[serde(rename = "Investor Domain")]
    pub investor_domain: String,
    #[serde(rename = "Investor Socium ID")]
    pub socium_id: Option<String>,
    #[serde(rename = "Investor Name")]
    pub investor_name: Option<String>,
    #[serde(rename = "Linked Contact")]
    pub linked_contact: Option<String>,
    #[serde(rename = "Linked Contact ID")]
    pub linked_contact_id: Option<String>,
    #[serde(rename = "Linked Contact Type")]
    pub linked_contact_type: String,
    #[serde(rename = "Linked Contact Domain")]
    pub linked_contact_domain: String,
    #[serde(rename = "Client GL Investor Name")]
    pub gl_investor_name: Option<String>,
    #[serde(rename = "Investor Legal Name")]
    pub legal_name: Option<String>,
    #[serde(rename = "Investor Classification")]
    pub classification: String,
    #[serde(rename = "Individual or Organization")]
    pub individual_or_organization: String,
    #[serde(rename = "Investor SubType")]
    pub sub_type: Option<String>,
    #[serde(rename = "Investor Tax ID")]
    pub tax_id: String,
    #[serde(rename = "Qualified Purchaser")]
    pub qualified_purchaser: Option<String>,
    #[serde(rename = "Accredited Investor")]
    pub accredited_investor: Option<String>,
    #[serde(rename = "Is IRA")]
    pub is_ira: String,
    #[serde(rename = "Domicile")]
    pub domicile: Option<String>,
    #[serde(rename = "Domestic/Foreign")]
    pub domestic_foreign: String,
    #[serde(rename = "Relationship")]
    pub relationship: Option<String>,
    #[serde(rename = "Client GL Investor ID")]
    pub gl_investor_id: Option<String>,
    #[serde(rename = "Tax Exempt")]
    pub tax_exempt: Option<String>,
    #[serde(rename = "Disregarded Entity")]
    pub disregarded_entity: Option<String>,
    #[serde(rename = "ERISA")]
    pub erisa: Option<String>,
    #[serde(rename = "ERISA %")]
    pub erisa_percent: Option<f64>,
    #[serde(rename = "Form PF Investor Type")]
    pub form_pf_investor_type: Option<String>,
}

impl SheetRow for InvestorUploadRow {
    const SHEET: &'static str = "3 - Investran Investor Upload";
    const HEADERS: &'static [&'static str] = &[
        "Investor Domain",
        "Investor Socium ID",
        "Investor Name",
        "Linked Contact",
        "Linked Contact ID",
        "Linked Contact Type",
        "Linked Contact Domain",
        "Client GL Investor Name",
        "Investor Legal Name",
        "Investor Classification",
        "Individual or Organization",
        "Investor SubType",
        "Investor Tax ID",
        "Qualified Purchaser",
        "Accredited Investor",
        "Is IRA",
        "Domicile",
        "Domestic/Foreign",
        "Relationship",
        "Client GL Investor ID",
        "Tax Exempt",
        "Disregarded Entity",
        "ERISA",
        "ERISA %",
        "Form PF Investor Type",
    ];
}

/// `"<investorName>:  <investorSourceId>"`; missing if either part is.
pub fn investor_name(tx: &Transaction) -> Option<String> {
    match (&tx.investor_name, &tx.investor_source_id) {
        (Some(name), Some(id)) => Some(format!("{}:  {}", name, id)),
        _ => None,
    }
}

pub fn classification(tx: &Transaction) -> &'static str {
    if tx.person_or_entity.as_deref() == Some("entity") {
        "Organization"
    } else {
        "Individual"
    }
}

/// The one populated identifier of SSN/EIN with hyphens removed, or the
/// error literal when the pair does not hold exactly one value.
pub fn tax_id(tx: &Transaction) -> String {
    let chosen = match (&tx.ssn, &tx.ein) {
        (Some(ssn), None) => ssn.as_str(),
        (None, Some(ein)) => ein.as_str(),
        _ => TAX_ID_ERROR,
    };
    chosen.replace('-', "")
}

/// Accredited status, forced to `"Y"` for qualified purchasers.
pub fn accredited_investor(tx: &Transaction, qualified_purchaser: Option<&str>) -> Option<String> {
    if qualified_purchaser == Some("Y") {
        return Some("Y".to_string());
    }
    ACCREDITED_INVESTOR.translate(tx.authorized_investor.as_deref())
}

/// `"25%"` → 0.25. A value that is not a number after stripping the
/// trailing `%` is treated as missing.
pub fn erisa_fraction(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let number = raw.strip_suffix('%').unwrap_or(raw).trim();
    match number.parse::<f64>() {
        Ok(v) => Some(v / 100.0),
        Err(_) => {
            warn!(value = raw, "benefitPlanPercent is not a number");
            None
        }
    }
}

pub fn investor_upload(
    rows: &[LinkedRow],
    details: &[ContactDetailRow],
    params: &RunParams,
) -> Vec<InvestorUploadRow> {
    rows.iter()
        .zip(details)
        .map(|(r, detail)| {
            let tx = r.transaction;
            let class = classification(tx);
            let qualified_purchaser = QUALIFIED_PURCHASER.translate(tx.qp_assets_5.as_deref());
            let domicile = DOMICILES.translate(tx.domicile.as_deref());
            let domestic_foreign = if domicile.as_deref() == Some("USA") {
                "Domestic"
            } else {
                "Foreign"
            };

            InvestorUploadRow {
                investor_domain: params.contact_domain.clone(),
                socium_id: tx.investor_source_id.clone(),
                investor_name: investor_name(tx),
                linked_contact: detail.contact_file_as.clone(),
                linked_contact_id: detail.contact_id.clone(),
                linked_contact_type: detail.contact_type.clone(),
                linked_contact_domain: detail.contact_domain.clone(),
                gl_investor_name: tx.investor_name.clone(),
                legal_name: tx.investor_name.clone(),
                classification: class.to_string(),
                individual_or_organization: class.to_string(),
                sub_type: INVESTOR_SUBTYPES.translate(tx.investor_type.as_deref()),
                tax_id: tax_id(tx),
                accredited_investor: accredited_investor(tx, qualified_purchaser.as_deref()),
                qualified_purchaser,
                is_ira: if tx.investor_type.as_deref() == Some("ira") {
                    "Y"
                } else {
                    "N"
                }
                .to_string(),
                domicile,
                domestic_foreign: domestic_foreign.to_string(),
                relationship: tx.nominee_name.clone(),
                gl_investor_id: tx.nominee_account_no.clone(),
                tax_exempt: TAX_EXEMPT.translate(tx.is_us_tax_exempt.as_deref()),
                disregarded_entity: DISREGARDED_ENTITY.translate(tx.is_disregarded_entity.as_deref()),
                erisa: ERISA.translate(tx.erisa_vehicle.as_deref()),
                erisa_percent: erisa_fraction(tx.benefit_plan_percent.as_deref()),
                form_pf_investor_type: FORM_PF_INVESTOR_TYPES
                    .translate(tx.form_pf_investor_type.as_deref()),
            }
        })
        .collect()
}
