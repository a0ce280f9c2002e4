//! Canonical records exchanged between the ingestion pipeline and callers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money moved into or out of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

/// Normalized output of statement parsers (bank-agnostic).
///
/// `amount` is always non-negative; `direction` carries the sign semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
}

impl ParsedTransaction {
    /// Build from a signed amount as it appears in the export:
    /// negative becomes an `Expense`, zero or positive an `Income`.
    pub fn from_signed(date: NaiveDate, description: impl Into<String>, signed: Decimal) -> Self {
        let direction = if signed.is_sign_negative() && !signed.is_zero() {
            Direction::Expense
        } else {
            Direction::Income
        };
        Self {
            date,
            description: description.into(),
            amount: signed.abs(),
            direction,
        }
    }

    /// Amount with the sign restored (expenses negative).
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        }
    }
}

/// What one statement file parsed into: the extracted transactions plus one
/// human-readable warning per row that could not be parsed.
///
/// A row contributes either a transaction or a warning, never both. File-level
/// problems (empty file, unrecognized header) yield zero transactions and a
/// single warning; parsing never hard-fails on partially-bad data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub bank_label: String,
    pub transactions: Vec<ParsedTransaction>,
    pub warnings: Vec<String>,
}

impl ParseResult {
    pub fn new(bank_label: impl Into<String>) -> Self {
        Self {
            bank_label: bank_label.into(),
            transactions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A file-level failure: no transactions, one explanatory warning.
    pub fn empty(bank_label: impl Into<String>, warning: impl Into<String>) -> Self {
        let mut result = Self::new(bank_label);
        result.warnings.push(warning.into());
        result
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// A user-owned spending category, supplied by the caller for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_signed_negative_is_expense() {
        let t = ParsedTransaction::from_signed(date(2026, 1, 5), "PADARIA", dec!(-12.50));
        assert_eq!(t.direction, Direction::Expense);
        assert_eq!(t.amount, dec!(12.50));
        assert_eq!(t.signed_amount(), dec!(-12.50));
    }

    #[test]
    fn test_from_signed_positive_is_income() {
        let t = ParsedTransaction::from_signed(date(2026, 1, 5), "PIX RECEBIDO", dec!(1500));
        assert_eq!(t.direction, Direction::Income);
        assert_eq!(t.signed_amount(), dec!(1500));
    }

    #[test]
    fn test_empty_result_has_single_warning() {
        let r = ParseResult::empty("Nubank", "empty file");
        assert!(r.is_empty());
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_parse_result_serde_round_trip() {
        let mut result = ParseResult::new("Nubank");
        result
            .transactions
            .push(ParsedTransaction::from_signed(
                date(2026, 3, 5),
                "PADARIA",
                dec!(-12.50),
            ));
        result.warn("line 3: could not parse date 'ontem'");

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"expense\""));
        assert!(json.contains("\"2026-03-05\""));
        let back: ParseResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.transactions[0].amount, dec!(12.50));
    }
}
