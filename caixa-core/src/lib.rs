//! caixa-core: domain types and pure calculators for the caixa ledger.
//!
//! Everything here is synchronous and side-effect free: locale-aware
//! normalizers for Brazilian bank exports, the category matcher, the
//! credit-card billing calendar, and the installment/recurrence expander.
//! Persistence, HTTP, and file handling live with the callers.

pub mod billing;
pub mod category;
pub mod locale;
pub mod model;
pub mod recurrence;
pub mod text;

pub use billing::{
    ClosingDayRule, InvoicePeriod, billing_month_offset, calendar_month_period,
    effective_closing_day, invoice_period,
};
pub use category::{match_category, suggest_categories};
pub use locale::{parse_amount, parse_date};
pub use model::{Category, Direction, ParseResult, ParsedTransaction};
pub use recurrence::{
    RecurrenceSeries, TransactionDraft, billed_purchase_date, expand_fixed, expand_installments,
};
