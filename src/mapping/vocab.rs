// src/mapping/vocab.rs
//! Controlled vocabularies of the target platform.
//!
//! Every table carries its own policy for codes it does not know. The
//! policies differ on purpose and must stay per table.

/// Literal written for a code a sentinel table does not recognise.
pub const UNRECOGNIZED: &str = "Unrecognized value";

/// What a lookup yields for an unknown or missing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Always this literal, for unknown and missing codes alike.
    Value(&'static str),
    /// Unknown codes are returned unchanged; missing stays missing.
    PassThrough,
    /// Unknown and missing codes are both missing.
    Missing,
}

#[derive(Debug)]
pub struct Vocabulary {
    pub name: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
    pub fallback: Fallback,
}

impl Vocabulary {
    /// Exact, case-sensitive lookup.
    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == code)
            .map(|(_, v)| *v)
    }

    /// Translate `code` applying this table's fallback.
    pub fn translate(&self, code: Option<&str>) -> Option<String> {
        match (code.and_then(|c| self.get(c)), self.fallback) {
            (Some(v), _) => Some(v.to_string()),
            (None, Fallback::Value(v)) => Some(v.to_string()),
            (None, Fallback::PassThrough) => code.map(str::to_string),
            (None, Fallback::Missing) => None,
        }
    }
}

const YES_NO: &[(&str, &str)] = &[("yes", "Y"), ("no", "N")];

pub static STATE_NAMES: Vocabulary = Vocabulary {
    name: "Business Address State",
    fallback: Fallback::PassThrough,
    entries: &[
        ("AL", "Alabama"),
        ("AK", "Alaska"),
        ("AZ", "Arizona"),
        ("AR", "Arkansas"),
        ("AS", "American Samoa"),
        ("CA", "California"),
        ("CO", "Colorado"),
        ("CT", "Connecticut"),
        ("DE", "Delaware"),
        ("DC", "District of Columbia"),
        ("FL", "Florida"),
        ("GA", "Georgia"),
        ("GU", "Guam"),
        ("HI", "Hawaii"),
        ("ID", "Idaho"),
        ("IL", "Illinois"),
        ("IN", "Indiana"),
        ("IA", "Iowa"),
        ("KS", "Kansas"),
        ("KY", "Kentucky"),
        ("LA", "Louisiana"),
        ("ME", "Maine"),
        ("MD", "Maryland"),
        ("MA", "Massachusetts"),
        ("MI", "Michigan"),
        ("MN", "Minnesota"),
        ("MS", "Mississippi"),
        ("MO", "Missouri"),
        ("MT", "Montana"),
        ("NE", "Nebraska"),
        ("NV", "Nevada"),
        ("NH", "New Hampshire"),
        ("NJ", "New Jersey"),
        ("NM", "New Mexico"),
        ("NY", "New York"),
        ("NC", "North Carolina"),
        ("ND", "North Dakota"),
        ("MP", "Northern Mariana Islands"),
        ("OH", "Ohio"),
        ("OK", "Oklahoma"),
        ("OR", "Oregon"),
        ("PA", "Pennsylvania"),
        ("PR", "Puerto Rico"),
        ("RI", "Rhode Island"),
        ("SC", "South Carolina"),
        ("SD", "South Dakota"),
        ("TN", "Tennessee"),
        ("TX", "Texas"),
        ("TT", "Trust Territories"),
        ("UT", "Utah"),
        ("VT", "Vermont"),
        ("VA", "Virginia"),
        ("VI", "Virgin Islands"),
        ("WA", "Washington"),
        ("WV", "West Virginia"),
        ("WI", "Wisconsin"),
        ("WY", "Wyoming"),
    ],
};

pub static INVESTOR_SUBTYPES: Vocabulary = Vocabulary {
    name: "Investor SubType",
    fallback: Fallback::Value(UNRECOGNIZED),
    entries: &[
        ("trust", "Trust"),
        ("revocableTrust", "Revocable Trust"),
        ("jointTenants", "Joint TIC"),
        ("tenantsInCommon", "Joint TIC"),
        ("nonRetirement", "Natural Person"),
        ("partnership", "Limited Partnership"),
        ("llc", "Limited Liability Company"),
        ("corporation", "Corporation"),
        ("ira", "IRA"),
        ("privatePension", "Pension Plan"),
        ("foundation", "Foundation"),
        ("governmentNonPension", "Government Entity"),
    ],
};

// blank means qualified
pub static QUALIFIED_PURCHASER: Vocabulary = Vocabulary {
    name: "Qualified Purchaser",
    fallback: Fallback::Value("Y"),
    entries: YES_NO,
};

pub static ACCREDITED_INVESTOR: Vocabulary = Vocabulary {
    name: "Accredited Investor",
    fallback: Fallback::Value(UNRECOGNIZED),
    entries: &[("Yes", "Y"), ("No", "N")],
};

pub static DOMICILES: Vocabulary = Vocabulary {
    name: "Domicile",
    fallback: Fallback::Value(UNRECOGNIZED),
    entries: &[
        ("CA", "Canada"),
        ("KY", "Cayman Islands"),
        ("JE", "Jersey"),
        ("LU", "Luxembourg"),
        ("MC", "Monaco"),
        ("PA", "Republic of Panama"),
        ("GB", "Scotland"),
        ("SG", "Singapore"),
        ("KR", "South Korea"),
        ("ES", "Spain"),
        ("CH", "Switzerland"),
        ("US", "USA"),
    ],
};

pub static TAX_EXEMPT: Vocabulary = Vocabulary {
    name: "Tax Exempt",
    fallback: Fallback::Missing,
    entries: YES_NO,
};

pub static DISREGARDED_ENTITY: Vocabulary = Vocabulary {
    name: "Disregarded Entity",
    fallback: Fallback::Missing,
    entries: YES_NO,
};

pub static ERISA: Vocabulary = Vocabulary {
    name: "ERISA",
    fallback: Fallback::Missing,
    entries: YES_NO,
};

pub static FORM_PF_INVESTOR_TYPES: Vocabulary = Vocabulary {
    name: "Form PF Investor Type",
    fallback: Fallback::Missing,
    entries: &[
        ("formPfBankThirft", "Bank or Thrift Institution (proprietary)"),
        ("formPfBrokerDealer", "Broker-Dealer"),
        ("formPfInsurance", "Insurance Company"),
        ("formPfNonProfit", "Investment Company registered with the SEC"),
        ("formPfNonUsMultiple", "Non-Profit"),
        ("formPfNonUsPerson", "Non-US Individual or Trust"),
        (
            "formPfOther",
            "Non-US Investor beneficial ownership unknown & held through a chain of intermediaries",
        ),
        ("formPfPension", "Other"),
        ("formPfPrivateFund", "Pension Plan (Government)"),
        ("formPfRegInvCo", "Pension plan (Non-Government)"),
        ("formPfSwf", "Private Fund"),
        ("formPfUsGov", "Sovereign Wealth Fund / Foreign Official Institution"),
        (
            "formPfUsPension",
            "State or Municipal Government entity (not pension plan)",
        ),
        ("formPfUsPerson", "United States Individual or Trust"),
    ],
};
