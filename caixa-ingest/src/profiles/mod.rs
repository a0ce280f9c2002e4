//! Bank-specific format profiles.
//!
//! Every profile honors the same row-level contract: each data row yields
//! exactly one `ParsedTransaction` or exactly one warning — never both,
//! never neither. Only whole-file problems (no data, unrecognizable
//! header) short-circuit, and even those come back as a `ParseResult`
//! with a single warning, not an error.

pub mod generic;
pub mod inter;
pub mod inter_pdf;
pub mod nubank;

use caixa_core::text::normalize_token;
use csv::StringRecord;

/// Minimum number of non-empty lines for a CSV to count as having data
/// (header + at least one row).
pub(crate) const MIN_DATA_LINES: usize = 2;

/// Index of the first header field whose normalized token contains one of
/// the synonyms, skipping columns already claimed.
pub(crate) fn find_column(
    header: &StringRecord,
    synonyms: &[&str],
    claimed: &[usize],
) -> Option<usize> {
    header.iter().enumerate().position(|(i, field)| {
        if claimed.contains(&i) {
            return false;
        }
        let token = normalize_token(field);
        !token.is_empty() && synonyms.iter().any(|s| token.contains(s))
    })
}

/// True when any header field's normalized token contains the synonym.
pub(crate) fn header_has(header: &StringRecord, synonym: &str) -> bool {
    header
        .iter()
        .any(|field| normalize_token(field).contains(synonym))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_column_normalizes_and_skips_claimed() {
        let header = StringRecord::from(vec!["Data Lançamento", "Descrição", "Valor"]);
        let date = find_column(&header, &["data"], &[]).unwrap();
        assert_eq!(date, 0);
        // "Data Lançamento" also contains "lancamento"; claiming the date
        // column keeps the description probe off it.
        let desc = find_column(&header, &["descricao", "lancamento"], &[date]).unwrap();
        assert_eq!(desc, 1);
    }

    #[test]
    fn test_header_has() {
        let header = StringRecord::from(vec!["date", "title", "amount"]);
        assert!(header_has(&header, "title"));
        assert!(!header_has(&header, "identificador"));
    }
}
