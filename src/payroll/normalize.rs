//! Coercion of raw spreadsheet/JSON cell values into amounts.
//!
//! Policy: absent, blank, and unparseable values all collapse to `0.0`.
//! A missing column therefore contributes zero to every total instead of
//! poisoning the computation. Both entry points are total; they never
//! panic and never return a non-finite number.

use serde_json::Value;

/// Coerce a raw cell string into an amount.
pub fn normalize_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Same policy for JSON payloads, where an amount may arrive as a number,
/// a numeric string, `null`, or be absent entirely (callers pass
/// `Value::Null` for absent fields).
pub fn normalize_json(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => normalize_str(s),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_and_absent_default_to_zero() {
        assert_eq!(normalize_str(""), 0.0);
        assert_eq!(normalize_str("   "), 0.0);
        assert_eq!(normalize_json(&Value::Null), 0.0);
    }

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(normalize_str("13456"), 13456.0);
        assert_eq!(normalize_str(" 12.5 "), 12.5);
        assert_eq!(normalize_str("-320"), -320.0);
        assert_eq!(normalize_json(&json!(9208)), 9208.0);
        assert_eq!(normalize_json(&json!("471")), 471.0);
    }

    #[test]
    fn garbage_never_escapes_as_nan() {
        for raw in ["abc", "12,000", "NaN", "inf", "-inf", "1e999"] {
            let n = normalize_str(raw);
            assert!(n.is_finite(), "{raw:?} produced a non-finite value");
        }
        assert_eq!(normalize_str("NaN"), 0.0);
        assert_eq!(normalize_json(&json!(true)), 0.0);
        assert_eq!(normalize_json(&json!(["5"])), 0.0);
    }
}
