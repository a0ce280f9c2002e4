//! caixa-ingest: statement ingestion — separator detection, bank format
//! profiles (CSV and extracted PDF text), and the parse entry point.

pub mod error;
pub mod profile;
pub mod profiles;
pub mod tokenize;

pub use error::IngestError;
pub use profile::{BankProfile, StatementFormat};

use caixa_core::model::ParseResult;
use tracing::{debug, warn};

/// Parse one uploaded statement with the user-selected bank profile.
///
/// Returns `Err` only for operator mistakes (unknown bank id, format the
/// profile cannot read). Everything about the file's *content* — malformed
/// rows, empty files, unrecognized headers — comes back as warnings inside
/// the `ParseResult` so the caller can always show a preview.
pub fn parse_statement(
    bank_id: &str,
    format: StatementFormat,
    content: &str,
) -> Result<ParseResult, IngestError> {
    let profile = BankProfile::from_id(bank_id)
        .ok_or_else(|| IngestError::UnknownBank(bank_id.to_string()))?;
    if !profile.supports(format) {
        return Err(IngestError::UnsupportedFormat {
            bank: profile.display_name(),
            format,
        });
    }

    debug!(bank = profile.id(), %format, "parsing statement");
    let result = match format {
        StatementFormat::Csv => profile.parse_csv(content),
        StatementFormat::Pdf => profile.parse_pdf(content),
    };

    if result.transactions.is_empty() {
        // Likely the wrong bank was selected; the caller should treat this
        // as retryable, not as a fault.
        warn!(
            bank = profile.id(),
            warnings = result.warnings.len(),
            "statement produced no transactions"
        );
    }
    Ok(result)
}
