//! The bank-profile registry: a closed set of known formats dispatched
//! through one parse surface. Compiled in, immutable, nothing to
//! initialize at runtime.

use std::fmt;

use caixa_core::model::ParseResult;
use serde::{Deserialize, Serialize};

use crate::profiles::{generic, inter, inter_pdf, nubank};

/// Which physical representation the caller uploaded. PDF means the
/// *extracted text* of a PDF — text extraction happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    Csv,
    Pdf,
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementFormat::Csv => write!(f, "csv"),
            StatementFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// Every bank format this pipeline understands, plus the generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankProfile {
    Generic,
    Nubank,
    Inter,
}

impl BankProfile {
    pub const ALL: [BankProfile; 3] = [BankProfile::Generic, BankProfile::Nubank, BankProfile::Inter];

    pub fn id(self) -> &'static str {
        match self {
            BankProfile::Generic => "generic",
            BankProfile::Nubank => "nubank",
            BankProfile::Inter => "inter",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BankProfile::Generic => generic::LABEL,
            BankProfile::Nubank => nubank::LABEL,
            BankProfile::Inter => inter::LABEL,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn supports_csv(self) -> bool {
        true
    }

    pub fn supports_pdf(self) -> bool {
        matches!(self, BankProfile::Inter)
    }

    pub fn supports(self, format: StatementFormat) -> bool {
        match format {
            StatementFormat::Csv => self.supports_csv(),
            StatementFormat::Pdf => self.supports_pdf(),
        }
    }

    /// Parse CSV content with this profile's column heuristics.
    pub fn parse_csv(self, content: &str) -> ParseResult {
        match self {
            BankProfile::Generic => generic::parse_csv(content),
            BankProfile::Nubank => nubank::parse_csv(content),
            BankProfile::Inter => inter::parse_csv(content),
        }
    }

    /// Parse extracted PDF text with this profile's line grammars.
    /// Callers must check `supports_pdf` first; unsupported profiles
    /// return an empty result with a warning rather than panicking.
    pub fn parse_pdf(self, content: &str) -> ParseResult {
        match self {
            BankProfile::Inter => inter_pdf::parse_pdf_text(content),
            other => ParseResult::empty(
                other.display_name(),
                format!("{} does not support PDF statements", other.display_name()),
            ),
        }
    }
}
