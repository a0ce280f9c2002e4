//! Locale normalizers for Brazilian bank exports.
//!
//! Both functions are total: third-party files routinely contain garbage,
//! so malformed input maps to `None`, never a panic or an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount as Brazilian exports write it.
///
/// Accepts an optional `R$` prefix and either separator convention:
/// `"1.234,56"` (decimal comma, dot grouping), `"1234.56"` (decimal dot),
/// `"1,234.56"` (comma grouping). A comma or dot followed by exactly 1-2
/// trailing digits is the decimal separator; separators that fit neither
/// pattern are treated as grouping and stripped (`"1.234"` -> `1234`).
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let mut s = text.trim();
    if let Some(prefix) = s.get(..2) {
        if prefix.eq_ignore_ascii_case("r$") {
            s = s[2..].trim_start();
        }
    }

    let cleaned = if ends_in_decimal(s, ',') {
        s.replace('.', "").replace(',', ".")
    } else if ends_in_decimal(s, '.') {
        s.replace(',', "")
    } else {
        s.replace(['.', ','], "")
    };

    Decimal::from_str(&cleaned).ok()
}

/// True when the last `sep` in `s` is followed by exactly 1-2 digits,
/// i.e. it is acting as the decimal separator.
fn ends_in_decimal(s: &str, sep: char) -> bool {
    match s.rfind(sep) {
        Some(i) => {
            let tail = &s[i + sep.len_utf8()..];
            (1..=2).contains(&tail.len()) && tail.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Parse a date in `D/M/Y`, `D-M-Y` or `D.M.Y` form (2- or 4-digit year,
/// 2-digit years assumed 2000+) or ISO `Y-M-D`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.trim().split(['/', '-', '.']).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !is_digits(p)) {
        return None;
    }

    if parts[0].len() == 4 {
        // ISO year first
        let y: i32 = parts[0].parse().ok()?;
        let m: u32 = parts[1].parse().ok()?;
        let d: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    let d: u32 = parts[0].parse().ok()?;
    let m: u32 = parts[1].parse().ok()?;
    let y: i32 = match parts[2].len() {
        2 => 2000 + parts[2].parse::<i32>().ok()?,
        4 => parts[2].parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(y, m, d)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_brazilian_convention() {
        assert_eq!(parse_amount("1.234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount("-89,90"), Some(dec!(-89.90)));
        assert_eq!(parse_amount("R$ 10,00"), Some(dec!(10.00)));
        assert_eq!(parse_amount("r$10,00"), Some(dec!(10.00)));
    }

    #[test]
    fn test_parse_amount_dot_decimal() {
        assert_eq!(parse_amount("1234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount("3.5"), Some(dec!(3.5)));
    }

    #[test]
    fn test_parse_amount_grouping_only() {
        assert_eq!(parse_amount("1.234"), Some(dec!(1234)));
        assert_eq!(parse_amount("42"), Some(dec!(42)));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("R$"), None);
    }

    #[test]
    fn test_parse_date_brazilian_forms() {
        let jan31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(parse_date("31/01/2026"), Some(jan31));
        assert_eq!(parse_date("31-01-2026"), Some(jan31));
        assert_eq!(parse_date("31.01.2026"), Some(jan31));
        assert_eq!(
            parse_date("1-2-26"),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date("2026-01-31"),
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date("13/13/2026"), None);
        assert_eq!(parse_date("2026-01"), None);
        assert_eq!(parse_date("hoje"), None);
        assert_eq!(parse_date("31/01/026"), None);
    }
}
