// src/mapping/contact_details.rs
use serde::Serialize;

use super::vocab::STATE_NAMES;
use super::{yes_if_present, ContactUploadRow, LinkedRow, SheetRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetailRow {
    /// Filled in by hand once the contacts exist on the target platform.
    #[serde(rename = "Contact ID")]
    pub contact_id: Option<String>,
    #[serde(rename = "Contact Type")]
    pub contact_type: String,
    #[serde(rename = "Contact Domain")]
    pub contact_domain: String,
    #[serde(rename = "Contact File As")]
    pub contact_file_as: Option<String>,
    #[serde(rename = "Email Email")]
    pub email: Option<String>,
    #[serde(rename = "Email Email is Default")]
    pub email_is_default: Option<String>,
    #[serde(rename = "Business Address is Default")]
    pub address_is_default: Option<String>,
    #[serde(rename = "Business Address Street")]
    pub street: Option<String>,
    #[serde(rename = "Business Address City")]
    pub city: Option<String>,
    #[serde(rename = "Business Address State")]
    pub state: Option<String>,
    #[serde(rename = "Business Address Zip/Postal Code")]
    pub zip: Option<String>,
    #[serde(rename = "Home Phone")]
    pub home_phone: Option<String>,
    #[serde(rename = "Primary Phone")]
    pub primary_phone: Option<String>,
}

impl SheetRow for ContactDetailRow {
    const SHEET: &'static str = "2 - Investran Contact Details";
    const HEADERS: &'static [&'static str] = &[
        "Contact ID",
        "Contact Type",
        "Contact Domain",
        "Contact File As",
        "Email Email",
        "Email Email is Default",
        "Business Address is Default",
        "Business Address Street",
        "Business Address City",
        "Business Address State",
        "Business Address Zip/Postal Code",
        "Home Phone",
        "Primary Phone",
    ];
}

pub fn contact_details(rows: &[LinkedRow], upload: &[ContactUploadRow]) -> Vec<ContactDetailRow> {
    rows.iter()
        .zip(upload)
        .map(|(r, up)| {
            let tx = r.transaction;
            let email = r.contact_field(|c| &c.email);
            let home_phone = r.contact_field(|c| &c.contact_phone);
            ContactDetailRow {
                contact_id: None,
                contact_type: up.contact_type.clone(),
                contact_domain: up.contact_domain.clone(),
                contact_file_as: up.contact_file_as.clone(),
                email_is_default: yes_if_present(&email),
                email,
                address_is_default: yes_if_present(&tx.street),
                street: tx.street.clone(),
                city: tx.city.clone(),
                state: STATE_NAMES.translate(tx.state.as_deref()),
                zip: tx.zip.clone(),
                primary_phone: yes_if_present(&home_phone),
                home_phone,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunParams;
    use crate::mapping::contact_upload;
    use crate::records::{Contact, Transaction};

    #[test]
    fn default_flags_are_yes_or_blank() {
        let with_address = Transaction {
            street: Some("1 Main St".into()),
            city: Some("Austin".into()),
            state: Some("TX".into()),
            zip: Some("78701".into()),
            ..Default::default()
        };
        let abroad = Transaction {
            state: Some("ON".into()),
            ..Default::default()
        };
        let jane = Contact {
            email: Some("jane@example.com".into()),
            contact_phone: Some("555-0100".into()),
            ..Default::default()
        };
        let rows = [
            LinkedRow {
                transaction: &with_address,
                contact: Some(&jane),
            },
            LinkedRow {
                transaction: &abroad,
                contact: None,
            },
        ];
        let upload = contact_upload(&rows, &RunParams::default());
        let sheet = contact_details(&rows, &upload);

        assert_eq!(sheet[0].email_is_default.as_deref(), Some("yes"));
        assert_eq!(sheet[0].address_is_default.as_deref(), Some("yes"));
        assert_eq!(sheet[0].primary_phone.as_deref(), Some("yes"));
        assert_eq!(sheet[0].state.as_deref(), Some("Texas"));
        assert_eq!(sheet[0].contact_id, None);

        assert_eq!(sheet[1].email_is_default, None);
        assert_eq!(sheet[1].address_is_default, None);
        assert_eq!(sheet[1].primary_phone, None);
        assert_eq!(sheet[1].state.as_deref(), Some("ON"));
        assert_eq!(sheet[1].contact_type, "Individual");
    }
}
