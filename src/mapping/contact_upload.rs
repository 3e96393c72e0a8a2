// src/mapping/contact_upload.rs
use serde::Serialize;

use super::{LinkedRow, SheetRow};
use crate::config::RunParams;

pub const CONTACT_TYPE: &str = "Individual";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactUploadRow {
    #[serde(rename = "Contact Domain")]
    pub contact_domain: String,
    #[serde(rename = "Contact File As")]
    pub contact_file_as: Option<String>,
    #[serde(rename = "Contact Type")]
    pub contact_type: String,
    #[serde(rename = "Individual First Name")]
    pub first_name: Option<String>,
    #[serde(rename = "Individual Last Name")]
    pub last_name: Option<String>,
}

impl SheetRow for ContactUploadRow {
    const SHEET: &'static str = "1 - Investran Contact Upload";
    const HEADERS: &'static [&'static str] = &[
        "Contact Domain",
        "Contact File As",
        "Contact Type",
        "Individual First Name",
        "Individual Last Name",
    ];
}

pub fn contact_upload(rows: &[LinkedRow], params: &RunParams) -> Vec<ContactUploadRow> {
    rows.iter()
        .map(|r| ContactUploadRow {
            contact_domain: params.contact_domain.clone(),
            contact_file_as: r.contact_field(|c| &c.full_name),
            contact_type: CONTACT_TYPE.to_string(),
            first_name: r.contact_field(|c| &c.first_name),
            last_name: r.contact_field(|c| &c.last_name),
        })
        .collect()
}
