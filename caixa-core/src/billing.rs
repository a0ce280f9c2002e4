//! Credit-card billing calendar: effective closing days, invoice windows,
//! and the month offset a purchase is billed under.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// How a card's closing day is configured.
///
/// `Fixed(d)` closes on day `d`, clamped to the month's length.
/// `BeforeMonthEnd(n)` closes `n` days before the end of the month,
/// floored at day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ClosingDayRule {
    Fixed(u32),
    BeforeMonthEnd(u32),
}

/// One invoice window. `end` is inclusive (end of the closing day);
/// `start` opens the day after the previous month's closing day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub closing_day: u32,
}

/// Number of days in a civil month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Both dates exist for any valid month input.
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = NaiveDate::from_ymd_opt(next_y, next_m, 1).expect("valid month");
    (next - first).num_days() as u32
}

/// The actual day-of-month the invoice closes in `month`/`year`, after
/// resolving the rule against that month's length.
pub fn effective_closing_day(rule: ClosingDayRule, year: i32, month: u32) -> u32 {
    let days = days_in_month(year, month);
    match rule {
        ClosingDayRule::Fixed(day) => day.min(days),
        ClosingDayRule::BeforeMonthEnd(n) => days.saturating_sub(n).max(1),
    }
}

/// Invoice window for the invoice that closes in `month`/`year`.
pub fn invoice_period(rule: ClosingDayRule, year: i32, month: u32) -> InvoicePeriod {
    let closing_day = effective_closing_day(rule, year, month);
    let closing_date =
        NaiveDate::from_ymd_opt(year, month, closing_day).expect("closing day within month");

    let (prev_y, prev_m) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let prev_closing_day = effective_closing_day(rule, prev_y, prev_m);
    let prev_closing =
        NaiveDate::from_ymd_opt(prev_y, prev_m, prev_closing_day).expect("closing day within month");
    let start_date = prev_closing.succ_opt().expect("not at calendar bounds");

    InvoicePeriod {
        start: start_date.and_time(NaiveTime::MIN),
        end: closing_date
            .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time")),
        closing_day,
    }
}

/// Plain calendar-month window, used for cards without a configured closing
/// day. Callers branch on configuration presence.
pub fn calendar_month_period(year: i32, month: u32) -> InvoicePeriod {
    let last = days_in_month(year, month);
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let end = NaiveDate::from_ymd_opt(year, month, last).expect("valid month");
    InvoicePeriod {
        start: first.and_time(NaiveTime::MIN),
        end: end.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time")),
        closing_day: last,
    }
}

/// How many months ahead a purchase is billed: `1` when the purchase lands
/// on or before that month's effective closing day ("bills next cycle"),
/// `2` after it ("bills the cycle after").
pub fn billing_month_offset(purchase: NaiveDate, rule: ClosingDayRule) -> u32 {
    use chrono::Datelike;
    let closing = effective_closing_day(rule, purchase.year(), purchase.month());
    if purchase.day() <= closing { 1 } else { 2 }
}
