//! Banco Inter account-statement CSV.
//!
//! Inter prepends a preamble (account holder, period, balance lines) before
//! the real header, so the header row is located by probing rather than
//! assumed to be line 1. Preamble rows are not data rows and produce no
//! warnings.

use caixa_core::locale::{parse_amount, parse_date};
use caixa_core::model::{ParseResult, ParsedTransaction};
use csv::StringRecord;
use tracing::debug;

use super::{MIN_DATA_LINES, find_column};
use crate::tokenize::read_rows;

pub const LABEL: &str = "Banco Inter";

const DATE_SYNONYMS: &[&str] = &["datalancamento", "data"];
const DESCRIPTION_SYNONYMS: &[&str] = &["descricao", "historico"];
const AMOUNT_SYNONYMS: &[&str] = &["valor"];

pub fn parse_csv(content: &str) -> ParseResult {
    let rows = read_rows(content);
    if rows.len() < MIN_DATA_LINES {
        return ParseResult::empty(LABEL, "file has no data rows");
    }

    let Some((header_idx, columns)) = locate_header(&rows) else {
        return ParseResult::empty(LABEL, "unrecognized header for a Banco Inter export");
    };
    debug!(header_idx, "inter header located");

    let mut result = ParseResult::new(LABEL);
    for (i, row) in rows.iter().enumerate().skip(header_idx + 1) {
        match parse_row(row, &columns) {
            Ok(txn) => result.transactions.push(txn),
            Err(problem) => result.warn(format!("line {}: {problem}", i + 1)),
        }
    }
    result
}

struct Columns {
    date: usize,
    description: usize,
    amount: usize,
}

/// Scan for the first row where date, description and amount columns all
/// resolve. Everything above it is preamble.
fn locate_header(rows: &[StringRecord]) -> Option<(usize, Columns)> {
    rows.iter().enumerate().find_map(|(i, row)| {
        let date = find_column(row, DATE_SYNONYMS, &[])?;
        let description = find_column(row, DESCRIPTION_SYNONYMS, &[date])?;
        let amount = find_column(row, AMOUNT_SYNONYMS, &[date, description])?;
        Some((
            i,
            Columns {
                date,
                description,
                amount,
            },
        ))
    })
}

fn parse_row(row: &StringRecord, columns: &Columns) -> Result<ParsedTransaction, String> {
    let date_field = row.get(columns.date).unwrap_or("");
    let date = parse_date(date_field)
        .ok_or_else(|| format!("could not parse date '{date_field}'"))?;

    let amount_field = row.get(columns.amount).unwrap_or("");
    let signed = parse_amount(amount_field)
        .ok_or_else(|| format!("could not parse amount '{amount_field}'"))?;

    let description = row.get(columns.description).unwrap_or("").to_string();
    Ok(ParsedTransaction::from_signed(date, description, signed))
}
