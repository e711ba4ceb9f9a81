//! Spanish-locale rendering of amounts for the final report JSON.
//!
//! Monetary values use `.` for thousands and `,` for decimals, always with
//! two decimal places: `1234567.89` becomes `"1.234.567,89"`.

/// Formats a monetary amount: grouped thousands, decimal comma, 2 decimals.
/// Non-finite values render as zero.
pub fn money_es(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let sign = if value < 0.0 { "-" } else { "" };
    let s = format!("{:.2}", value.abs());
    let (int_part, dec_part) = s.split_once('.').expect("formatted with 2 decimals");
    format!("{}{},{}", sign, group_thousands(int_part), dec_part)
}

/// Formats a percentage with two decimals and a decimal comma: `"12,34%"`.
pub fn percent_es(value: f64) -> String {
    format!("{}%", number_es(value, 2))
}

/// Formats a plain number with a decimal comma and the given precision.
pub fn number_es(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.*}", decimals, value).replace('.', ",")
}

/// Inserts a `.` every 3 digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money_es(1_234_567.89), "1.234.567,89");
        assert_eq!(money_es(1_000.0), "1.000,00");
        assert_eq!(money_es(999.0), "999,00");
        assert_eq!(money_es(0.0), "0,00");
    }

    #[test]
    fn money_keeps_sign() {
        assert_eq!(money_es(-1_234.5), "-1.234,50");
        assert_eq!(money_es(-0.4), "-0,40");
    }

    #[test]
    fn money_non_finite_is_zero() {
        assert_eq!(money_es(f64::NAN), "0,00");
        assert_eq!(money_es(f64::INFINITY), "0,00");
    }

    #[test]
    fn percent_uses_decimal_comma() {
        assert_eq!(percent_es(32.057), "32,06%");
        assert_eq!(percent_es(0.0), "0,00%");
    }

    #[test]
    fn number_respects_precision() {
        assert_eq!(number_es(3.14159, 2), "3,14");
        assert_eq!(number_es(3.0, 0), "3");
        assert_eq!(number_es(f64::NAN, 2), "0,00");
    }
}
