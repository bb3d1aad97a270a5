//! Display formatting for money, percentages and compact figures
//!
//! Output is locale independent: thousands are always grouped with `,` and the
//! decimal separator is always `.`.

use crate::aggregate::round_half_up;

/// Shown in place of a figure whose derivation failed
pub const PLACEHOLDER: &str = "—";

/// Normalize -0.0 to 0.0 for cleaner display
fn normalize_zero(val: f64) -> f64 {
    if val == 0.0 { 0.0 } else { val }
}

/// Insert `,` between every group of three digits of an unsigned digit string
fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Insert `,` between every group of three digits
pub fn group_thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 { format!("-{grouped}") } else { grouped }
}

/// Round half up and render with `decimals` places and grouped thousands
///
/// `None` for NaN and infinities, which have no honest rendering.
fn grouped_number(value: f64, decimals: u32) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let rounded = normalize_zero(round_half_up(value, decimals));
    let fixed = format!("{:.prec$}", rounded.abs(), prec = decimals as usize);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// Currency codes ("EGP") are followed by a space, symbols ("$") are not
fn currency_prefix(currency: &str) -> String {
    if !currency.is_empty() && currency.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{currency} ")
    } else {
        currency.to_string()
    }
}

/// Plain grouped number, e.g. `(1240.5, 1) -> "1,240.5"`
pub fn format_number(value: f64, decimals: u32) -> String {
    grouped_number(value, decimals).unwrap_or_else(placeholder)
}

/// Whole currency units, e.g. `format_money(1240000.0, "EGP") == "EGP 1,240,000"`
pub fn format_money(value: f64, currency: &str) -> String {
    format_money_with_decimals(value, currency, 0)
}

/// Currency amount with a fixed number of decimals, e.g. "$3.80"
///
/// A non-finite amount renders as [`PLACEHOLDER`] without the currency marker.
pub fn format_money_with_decimals(value: f64, currency: &str, decimals: u32) -> String {
    grouped_number(value, decimals)
        .map(|number| format!("{}{}", currency_prefix(currency), number))
        .unwrap_or_else(placeholder)
}

/// Fraction as a whole percentage, e.g. `0.186 -> "19%"`
pub fn format_percent(ratio: f64) -> String {
    format_percent_value(ratio * 100.0, 0)
}

/// Value already in percent, e.g. `(58.5, 1) -> "58.5%"`
pub fn format_percent_value(value: f64, decimals: u32) -> String {
    grouped_number(value, decimals)
        .map(|number| format!("{number}%"))
        .unwrap_or_else(placeholder)
}

/// Percent change with an explicit sign, e.g. "+10.5%"
pub fn format_signed_percent(change: f64, decimals: u32) -> String {
    if !change.is_finite() {
        return placeholder();
    }
    let rounded = normalize_zero(round_half_up(change, decimals));
    if rounded > 0.0 {
        format!("+{}", format_percent_value(rounded, decimals))
    } else {
        format_percent_value(rounded, decimals)
    }
}

/// Ratio shown as a multiple, e.g. "4.19x"
pub fn format_multiple(value: f64) -> String {
    grouped_number(value, 2)
        .map(|number| format!("{number}x"))
        .unwrap_or_else(placeholder)
}

/// Short axis label: "1.2M", "5.0K" or the plain number below a thousand
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let compact = if magnitude >= 1_000_000.0 {
        grouped_number(value / 1_000_000.0, 1).map(|n| format!("{n}M"))
    } else if magnitude >= 1_000.0 {
        grouped_number(value / 1_000.0, 1).map(|n| format!("{n}K"))
    } else {
        grouped_number(value, 0)
    };
    compact.unwrap_or_else(placeholder)
}

/// Formatted figure, or [`PLACEHOLDER`] when the derivation failed
pub fn or_placeholder<E>(result: Result<String, E>) -> String {
    result.unwrap_or_else(|_| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(5014), "5,014");
        assert_eq!(group_thousands(1_240_000), "1,240,000");
        assert_eq!(group_thousands(-38_420), "-38,420");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1_240_000.0, "EGP"), "EGP 1,240,000");
        let usd = format_money(5014.0, "USD");
        assert!(usd.contains("5,014"));
        assert!(usd.contains("USD"));
        assert_eq!(format_money(5014.0, "$"), "$5,014");
        assert_eq!(format_money(2205.71, "EGP"), "EGP 2,206");
    }

    #[test]
    fn test_format_money_with_decimals() {
        assert_eq!(format_money_with_decimals(3.804, "$", 2), "$3.80");
        assert_eq!(format_money_with_decimals(12_400.5, "$", 2), "$12,400.50");
        assert_eq!(format_money_with_decimals(-1500.0, "EGP", 0), "EGP -1,500");
        assert_eq!(format_money(4882.0, ""), "4,882");
    }

    #[test]
    fn test_non_finite_values_render_placeholder() {
        assert_eq!(format_money(f64::NAN, "USD"), PLACEHOLDER);
        assert_eq!(format_money(f64::INFINITY, "USD"), PLACEHOLDER);
        assert_eq!(format_percent(f64::NAN), PLACEHOLDER);
        assert_eq!(format_signed_percent(f64::NEG_INFINITY, 1), PLACEHOLDER);
        assert_eq!(format_multiple(f64::INFINITY), PLACEHOLDER);
        assert_eq!(format_compact(f64::NAN), PLACEHOLDER);
        assert_eq!(format_number(f64::NAN, 2), PLACEHOLDER);
    }

    #[test]
    fn test_amounts_beyond_i64_keep_their_digits() {
        assert_eq!(format_money(1e20, "USD"), "USD 100,000,000,000,000,000,000");
        assert_eq!(format_money(-1e19, "$"), "$-10,000,000,000,000,000,000");
        assert_eq!(format_number(1e300, 0).len(), 301 + 100);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(9.125, 1), "9.1");
        assert_eq!(format_number(1240.5, 1), "1,240.5");
        assert_eq!(format_number(0.0083, 2), "0.01");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.186), "19%");
        assert_eq!(format_percent(0.125), "13%");
        assert_eq!(format_percent(0.285), "29%");
        assert_eq!(format_percent(0.145), "15%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent_value(58.5, 1), "58.5%");
    }

    #[test]
    fn test_format_signed_percent() {
        assert_eq!(format_signed_percent(10.526, 1), "+10.5%");
        assert_eq!(format_signed_percent(-2.0, 1), "-2.0%");
        assert_eq!(format_signed_percent(0.0, 0), "0%");
    }

    #[test]
    fn test_format_multiple() {
        assert_eq!(format_multiple(2_600_000.0 / 620_000.0), "4.19x");
        assert_eq!(format_multiple(34.0), "34.00x");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1_240_000.0), "1.2M");
        assert_eq!(format_compact(5014.0), "5.0K");
        assert_eq!(format_compact(950.0), "950");
    }

    #[test]
    fn test_or_placeholder() {
        let failed: Result<String, MetricsError> = Err(MetricsError::divide_by_zero("return_on_spend"));
        assert_eq!(or_placeholder(failed), "—");
        assert_eq!(or_placeholder::<MetricsError>(Ok("4.19x".to_string())), "4.19x");
    }
}
