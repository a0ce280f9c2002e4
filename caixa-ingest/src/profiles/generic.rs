//! Generic CSV fallback: header-synonym matching with a positional
//! last-resort. Heuristic by design — unknown bank exports land here.

use caixa_core::locale::{parse_amount, parse_date};
use caixa_core::model::{ParseResult, ParsedTransaction};
use csv::StringRecord;
use tracing::debug;

use super::{MIN_DATA_LINES, find_column};
use crate::tokenize::read_rows;

pub const LABEL: &str = "Generic CSV";

const DATE_SYNONYMS: &[&str] = &["data", "date", "dia"];
const DESCRIPTION_SYNONYMS: &[&str] = &[
    "descricao",
    "description",
    "historico",
    "lancamento",
    "memo",
    "detalhe",
    "titulo",
    "title",
    "estabelecimento",
];
const AMOUNT_SYNONYMS: &[&str] = &["valor", "amount", "montante", "quantia", "value"];

/// Column plan for one file: either resolved from the header, or the
/// positional fallback (date 0, description 1, amount last).
enum Columns {
    Header { date: usize, description: usize, amount: usize },
    Positional,
}

pub fn parse_csv(content: &str) -> ParseResult {
    let rows = read_rows(content);
    if rows.len() < MIN_DATA_LINES {
        return ParseResult::empty(LABEL, "file has no data rows");
    }

    let header = &rows[0];
    let (columns, first_data_row) = match resolve_columns(header) {
        Some(cols) => (cols, 1),
        None => {
            debug!("no header column recognized, using positional fallback");
            // Without a recognized header every line is a data row; a real
            // header line will fail date parsing and surface as a warning.
            (Columns::Positional, 0)
        }
    };

    let mut result = ParseResult::new(LABEL);
    for (i, row) in rows.iter().enumerate().skip(first_data_row) {
        match parse_row(row, &columns) {
            Ok(txn) => result.transactions.push(txn),
            Err(problem) => result.warn(format!("line {}: {problem}", i + 1)),
        }
    }
    result
}

fn resolve_columns(header: &StringRecord) -> Option<Columns> {
    let date = find_column(header, DATE_SYNONYMS, &[]);
    let claimed: Vec<usize> = date.into_iter().collect();
    let description = find_column(header, DESCRIPTION_SYNONYMS, &claimed);
    let amount = find_column(header, AMOUNT_SYNONYMS, &[]);
    match (date, description, amount) {
        (Some(date), Some(description), Some(amount)) => Some(Columns::Header {
            date,
            description,
            amount,
        }),
        _ => None,
    }
}

fn parse_row(row: &StringRecord, columns: &Columns) -> Result<ParsedTransaction, String> {
    let (date_idx, desc_idx, amount_idx) = match columns {
        Columns::Header {
            date,
            description,
            amount,
        } => (*date, *description, *amount),
        Columns::Positional => (0, 1, row.len().saturating_sub(1)),
    };

    let date_field = row.get(date_idx).unwrap_or("");
    let date = parse_date(date_field)
        .ok_or_else(|| format!("could not parse date '{date_field}'"))?;

    let amount_field = row.get(amount_idx).unwrap_or("");
    let signed = parse_amount(amount_field)
        .ok_or_else(|| format!("could not parse amount '{amount_field}'"))?;

    let description = row.get(desc_idx).unwrap_or("").to_string();
    Ok(ParsedTransaction::from_signed(date, description, signed))
}
