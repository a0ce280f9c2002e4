//! Caller-level errors. Row- and file-level problems are *data*
//! (warnings inside `ParseResult`), not errors; only clearly wrong
//! operator choices surface here.

use thiserror::Error;

use crate::profile::StatementFormat;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("unknown bank '{0}'")]
    UnknownBank(String),

    #[error("{bank} does not support {format} statements")]
    UnsupportedFormat {
        bank: &'static str,
        format: StatementFormat,
    },
}
