//! Banco Inter PDF statements, parsed from extracted plain text.
//!
//! Two line grammars coexist in the wild:
//! - strict: `2026-03-05  PIX RECEBIDO MARIA  1.250,00`
//! - legacy: `05 mar  COMPRA CARTAO PADARIA  -18,90`, where the year is
//!   not on the line and must be inferred from surrounding text.
//!
//! Candidate lines (starting with a digit) that match neither grammar, or
//! that resolve to a zero amount, produce one warning each and are skipped;
//! zero-amount rows are statement noise, not zero-value transactions.
//! Prose lines (headers, footers, totals) are ignored silently.

use caixa_core::locale::{parse_amount, parse_date};
use caixa_core::model::{ParseResult, ParsedTransaction};
use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use crate::tokenize::split_lines;

pub const LABEL: &str = "Banco Inter";

pub fn parse_pdf_text(content: &str) -> ParseResult {
    let lines = split_lines(content);
    if lines.len() < 2 {
        return ParseResult::empty(LABEL, "file has no data rows");
    }

    // Compiled per call; statement files are small and this keeps the
    // parser free of global state.
    let strict = Regex::new(
        r"^(?P<date>\d{4}-\d{2}-\d{2})\s+(?P<desc>.+?)\s+(?:R\$\s*)?(?P<amount>-?[\d.,]+)$",
    )
    .expect("static regex");
    let legacy = Regex::new(
        r"(?i)^(?P<day>\d{1,2})\s+(?P<month>jan|fev|mar|abr|mai|jun|jul|ago|set|out|nov|dez)\.?\s+(?P<desc>.+?)\s+(?:R\$\s*)?(?P<amount>-?[\d.,]+)$",
    )
    .expect("static regex");

    let statement_year = infer_statement_year(content);
    debug!(statement_year, "inter pdf statement year");

    let mut result = ParseResult::new(LABEL);
    for (i, line) in lines.iter().enumerate() {
        // Transaction rows always start with a digit; everything else is
        // surrounding prose and carries no row semantics.
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let parsed = parse_strict(&strict, line)
            .or_else(|| parse_legacy(&legacy, line, statement_year));
        match parsed {
            Some(txn) if txn.amount.is_zero() => {
                result.warn(format!("line {}: ignoring zero-amount row", i + 1));
            }
            Some(txn) => result.transactions.push(txn),
            None => result.warn(format!("line {}: unrecognized statement row '{line}'", i + 1)),
        }
    }
    result
}

fn parse_strict(re: &Regex, line: &str) -> Option<ParsedTransaction> {
    let caps = re.captures(line)?;
    let date = parse_date(&caps["date"])?;
    let signed = parse_amount(&caps["amount"])?;
    Some(ParsedTransaction::from_signed(
        date,
        caps["desc"].trim(),
        signed,
    ))
}

fn parse_legacy(re: &Regex, line: &str, year: i32) -> Option<ParsedTransaction> {
    let caps = re.captures(line)?;
    let day: u32 = caps["day"].parse().ok()?;
    let month = month_number(&caps["month"])?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let signed = parse_amount(&caps["amount"])?;
    Some(ParsedTransaction::from_signed(
        date,
        caps["desc"].trim(),
        signed,
    ))
}

fn month_number(abbr: &str) -> Option<u32> {
    match abbr.to_lowercase().as_str() {
        "jan" => Some(1),
        "fev" => Some(2),
        "mar" => Some(3),
        "abr" => Some(4),
        "mai" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "ago" => Some(8),
        "set" => Some(9),
        "out" => Some(10),
        "nov" => Some(11),
        "dez" => Some(12),
        _ => None,
    }
}

/// Year for legacy rows: a 4-digit year near "extrato"/"período"/
/// "statement"/"period" wins, then any plausible 4-digit token, then the
/// current year.
fn infer_statement_year(text: &str) -> i32 {
    let near = Regex::new(r"(?i)(?:extrato|per[íi]odo|statement|period)\D{0,40}((?:19|20)\d{2})")
        .expect("static regex");
    if let Some(caps) = near.captures(text) {
        if let Ok(year) = caps[1].parse() {
            return year;
        }
    }

    let any = Regex::new(r"\b((?:19|20)\d{2})\b").expect("static regex");
    if let Some(caps) = any.captures(text) {
        if let Ok(year) = caps[1].parse() {
            return year;
        }
    }

    Utc::now().year()
}
