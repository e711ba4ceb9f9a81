//! Lenient coercion of arbitrary JSON values into `f64` amounts.
//!
//! Intake documents come from upstream form builders and OCR pipelines, so an
//! amount can arrive as a plain number, or as a string in Spanish notation
//! (`"1.234.567,89"`), English notation (`"1,234,567.89"`), with currency or
//! percent symbols (`"$ 1.500,75"`, `"45%"`), or buried inside free text
//! (`"aprox 1.234,56 mensuales"`). Coercion never fails: anything that cannot
//! be read as a number collapses to `0.0`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Spanish grouping: thousands with `.`, optional decimals with `,`.
static ES_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(\.\d{3})*(,\d+)?$").unwrap());

/// English grouping: thousands with `,`, optional decimals with `.`.
static EN_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})*(\.\d+)?$").unwrap());

/// First numeric fragment embedded in free text.
static FRAGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d[\d.,]*").unwrap());

/// Coerces an arbitrary JSON value into an amount.
///
/// - `null` is `0.0`, booleans count as `0`/`1`.
/// - Numbers pass through unchanged.
/// - Strings go through [`parse_amount`].
/// - Anything else is rendered to text first and then parsed, which mostly
///   matters for single-element arrays produced by form widgets.
pub fn to_amount(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_amount(s),
        other => parse_amount(&other.to_string()),
    }
}

/// Parses a textual amount, tolerating symbols, grouping and surrounding text.
///
/// Resolution order:
/// 1. strip `$`/`%` and whitespace; empty means `0.0`,
/// 2. full-match Spanish grouping (`1.234.567,89`),
/// 3. full-match English grouping (`1,234,567.89`),
/// 4. plain number after normalizing a decimal comma,
/// 5. first numeric fragment found anywhere in the text.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim().replace(['$', '%'], "");
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    if ES_GROUPED.is_match(s) {
        return finite_or_zero(s.replace('.', "").replace(',', ".").parse());
    }
    if EN_GROUPED.is_match(s) {
        return finite_or_zero(s.replace(',', "").parse());
    }

    let normalized = s.replace(',', ".");
    if let Ok(v) = normalized.parse::<f64>() {
        if v.is_finite() {
            return v;
        }
    }

    match FRAGMENT.find(s) {
        Some(m) => parse_fragment(m.as_str()),
        None => 0.0,
    }
}

/// Parses a numeric fragment that may mix thousands separators and a decimal
/// mark. The separator appearing last wins as the decimal mark; when several
/// dots remain, the last one is kept and the rest fold into the integer part.
fn parse_fragment(fragment: &str) -> f64 {
    let mut candidate = fragment.trim_end_matches(['.', ',']).to_string();

    let last_dot = candidate.rfind('.');
    let last_comma = candidate.rfind(',');
    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                candidate = candidate.replace('.', "").replace(',', ".");
            } else {
                candidate = candidate.replace(',', "");
            }
        }
        _ => candidate = candidate.replace(',', "."),
    }

    if candidate.matches('.').count() > 1 {
        let rebuilt = {
            let (head, decimal_part) = candidate.rsplit_once('.').unwrap();
            let sign = if head.starts_with('-') { "-" } else { "" };
            let head_digits: String = head.chars().filter(char::is_ascii_digit).collect();
            let integer_part = if head_digits.is_empty() {
                "0".to_string()
            } else {
                head_digits
            };
            format!("{sign}{integer_part}.{decimal_part}")
        };
        candidate = rebuilt;
    }

    finite_or_zero(candidate.parse())
}

fn finite_or_zero(parsed: Result<f64, std::num::ParseFloatError>) -> f64 {
    match parsed {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Reads the first present key of `keys` from a JSON object and coerces it.
///
/// Missing keys, a non-object `section`, or unreadable values all yield `0.0`.
/// The first *present* key wins even when its value is null, which keeps
/// legacy aliases from shadowing an explicit newer field.
pub fn field(section: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        if let Some(value) = section.get(key) {
            return to_amount(value);
        }
    }
    0.0
}

/// Truthiness of a JSON value: `true`, non-zero numbers and non-empty
/// strings/arrays/objects count as set.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
