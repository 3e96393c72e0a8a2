// src/ingest/utils.rs
use serde_json::Value;

/// Tokens that spreadsheet/CSV exports use for "no value".
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True if `raw` is one of the not-available tokens.
pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

/// Turn one raw CSV field into a cell: NA tokens become `Null`, everything
/// else is kept verbatim as a string.
pub fn csv_cell(raw: &str) -> Value {
    if is_na_token(raw) {
        Value::Null
    } else {
        Value::String(raw.to_string())
    }
}

/// Normalise a JSON field: strings that are NA tokens become `Null`,
/// arrays keep their elements untouched.
pub fn json_cell(v: Value) -> Value {
    match v {
        Value::String(s) if is_na_token(&s) => Value::Null,
        other => other,
    }
}

/// Scalar text view of a cell. `Null` is missing; numbers and bools are
/// rendered; sequences and objects are rendered as compact JSON.
pub fn cell_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parse an integer key that may have been rendered as `"555"`, `" 555 "` or
/// `"555.0"` by an upstream export.
pub fn parse_int_key(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn na_tokens_become_null() {
        assert_eq!(csv_cell(""), Value::Null);
        assert_eq!(csv_cell("NaN"), Value::Null);
        assert_eq!(csv_cell("N/A"), Value::Null);
        assert_eq!(csv_cell(" x "), json!(" x "));
        assert_eq!(csv_cell("none"), json!("none"));
    }

    #[test]
    fn cell_text_renders_scalars() {
        assert_eq!(cell_text(&Value::Null), None);
        assert_eq!(cell_text(&json!("abc")), Some("abc".into()));
        assert_eq!(cell_text(&json!(1500000)), Some("1500000".into()));
        assert_eq!(cell_text(&json!([1, 2])), Some("[1,2]".into()));
    }

    #[test]
    fn int_keys_tolerate_float_rendering() {
        assert_eq!(parse_int_key("555"), Some(555));
        assert_eq!(parse_int_key(" 555 "), Some(555));
        assert_eq!(parse_int_key("555.0"), Some(555));
        assert_eq!(parse_int_key("555.5"), None);
        assert_eq!(parse_int_key("abc"), None);
    }
}
