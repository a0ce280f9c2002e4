//! Delimited-text tokenization: separator auto-detection and row reading.
//!
//! Actual field splitting (RFC4180 quoting, `""` escapes, trimming) is done
//! by the csv crate; what the bank exports *don't* standardize — which
//! separator they use — is detected here.

use csv::{ReaderBuilder, StringRecord, Trim};

/// Pick the column separator by counting `;`, `,` and tab occurrences in
/// the first 5 non-empty lines. Ties (including all-zero) fall back to `,`.
pub fn detect_separator(content: &str) -> u8 {
    let sample: Vec<&str> = split_lines(content).into_iter().take(5).collect();
    let count = |sep: u8| -> usize {
        sample
            .iter()
            .map(|line| line.bytes().filter(|b| *b == sep).count())
            .sum()
    };

    let semicolons = count(b';');
    let commas = count(b',');
    let tabs = count(b'\t');

    // Comma wins unless another separator holds the maximum alone.
    if semicolons > commas && semicolons > tabs {
        b';'
    } else if tabs > commas && tabs > semicolons {
        b'\t'
    } else {
        b','
    }
}

/// Logical lines: split on `\r?\n`, trimmed, empties dropped.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Read the whole file into trimmed records using the detected separator.
/// Ragged rows are allowed; blank lines are skipped by the reader.
pub fn read_rows(content: &str) -> Vec<StringRecord> {
    let separator = detect_separator(content);
    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .flexible(true)
        .trim(Trim::All)
        .has_headers(false)
        .from_reader(content.as_bytes());

    reader.records().filter_map(Result::ok).collect()
}
