//! Expansion of a single user-entered purchase into a dated series:
//! credit-card installments or a fixed monthly recurrence.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Direction;

/// One member of a series, ready for the caller to persist as a
/// transaction row. `installment_index` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub group_id: Uuid,
    pub installment_index: u32,
    pub total_installments: u32,
}

/// An ordered series of drafts sharing one group id.
///
/// For installments the amounts sum exactly to the requested total; for a
/// fixed recurrence the amount repeats unchanged. Callers must persist the
/// whole series atomically — a partially applied series breaks the sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceSeries {
    pub group_id: Uuid,
    pub entries: Vec<TransactionDraft>,
}

impl RecurrenceSeries {
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

/// Advance a date by whole months, clamping the day to the target month's
/// last valid day (Jan 31 + 1 month = Feb 28).
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    // chrono's Months addition clamps; it only fails past year ±262143.
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// A purchase already placed in its billing month: the date shifted by the
/// card's month offset, day clamped. Not a series.
pub fn billed_purchase_date(date: NaiveDate, credit_month_offset: u32) -> NaiveDate {
    add_months_clamped(date, credit_month_offset)
}

/// Split `amount` into `count` monthly installments.
///
/// Each installment is `round2(amount / count)` except the last, which
/// absorbs the rounding remainder so the series sums exactly to `amount`.
/// Entry *i* (1-based) is dated `date + (i - 1 + credit_month_offset)`
/// months; pass `credit_month_offset = 0` for purchases not on a card.
pub fn expand_installments(
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    direction: Direction,
    count: u32,
    credit_month_offset: u32,
) -> RecurrenceSeries {
    let count = count.max(1);
    let group_id = Uuid::new_v4();
    let n = Decimal::from(count);
    let per = (amount / n).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let last = amount - per * Decimal::from(count - 1);

    let entries = (1..=count)
        .map(|index| TransactionDraft {
            date: add_months_clamped(date, index - 1 + credit_month_offset),
            description: format!("{description} ({index}/{count})"),
            amount: if index == count { last } else { per },
            direction,
            group_id,
            installment_index: index,
            total_installments: count,
        })
        .collect();

    RecurrenceSeries { group_id, entries }
}

/// Repeat `amount` unchanged for `months` consecutive months.
///
/// Fixed expenses are not assumed to be card purchases, so no billing
/// offset is applied; dates advance with the same day-clamping rule.
pub fn expand_fixed(
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    direction: Direction,
    months: u32,
) -> RecurrenceSeries {
    let months = months.max(1);
    let group_id = Uuid::new_v4();

    let entries = (1..=months)
        .map(|index| TransactionDraft {
            date: add_months_clamped(date, index - 1),
            description: description.to_string(),
            amount,
            direction,
            group_id,
            installment_index: index,
            total_installments: months,
        })
        .collect();

    RecurrenceSeries { group_id, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_installment_split_reconciles_exactly() {
        let series = expand_installments(
            date(2026, 1, 31),
            "Notebook",
            dec!(100.00),
            Direction::Expense,
            3,
            0,
        );
        let amounts: Vec<Decimal> = series.entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(series.total(), dec!(100.00));
    }

    #[test]
    fn test_installment_dates_clamp_to_month_end() {
        let series = expand_installments(
            date(2026, 1, 31),
            "Notebook",
            dec!(100.00),
            Direction::Expense,
            3,
            0,
        );
        let dates: Vec<NaiveDate> = series.entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)]
        );
    }

    #[test]
    fn test_installment_credit_offset_shifts_whole_series() {
        let series = expand_installments(
            date(2026, 6, 20),
            "Geladeira",
            dec!(1200.00),
            Direction::Expense,
            2,
            2,
        );
        assert_eq!(series.entries[0].date, date(2026, 8, 20));
        assert_eq!(series.entries[1].date, date(2026, 9, 20));
    }

    #[test]
    fn test_installment_metadata() {
        let series = expand_installments(
            date(2026, 3, 10),
            "Sofa",
            dec!(900.00),
            Direction::Expense,
            3,
            0,
        );
        for (i, entry) in series.entries.iter().enumerate() {
            assert_eq!(entry.group_id, series.group_id);
            assert_eq!(entry.installment_index, i as u32 + 1);
            assert_eq!(entry.total_installments, 3);
        }
        assert_eq!(series.entries[0].description, "Sofa (1/3)");
    }

    #[test]
    fn test_uneven_cents_go_to_last_installment() {
        let series = expand_installments(
            date(2026, 5, 1),
            "Curso",
            dec!(250.00),
            Direction::Expense,
            7,
            0,
        );
        let per = dec!(35.71); // 250 / 7 = 35.714...
        for entry in &series.entries[..6] {
            assert_eq!(entry.amount, per);
        }
        assert_eq!(series.entries[6].amount, dec!(35.74));
        assert_eq!(series.total(), dec!(250.00));
    }

    #[test]
    fn test_fixed_recurrence_repeats_amount() {
        let series = expand_fixed(
            date(2026, 1, 31),
            "Aluguel",
            dec!(1800.00),
            Direction::Expense,
            4,
        );
        assert_eq!(series.entries.len(), 4);
        assert!(series.entries.iter().all(|e| e.amount == dec!(1800.00)));
        assert_eq!(series.entries[0].description, "Aluguel");
        let dates: Vec<NaiveDate> = series.entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2026, 1, 31),
                date(2026, 2, 28),
                date(2026, 3, 31),
                date(2026, 4, 30),
            ]
        );
    }

    #[test]
    fn test_billed_purchase_date_clamps() {
        assert_eq!(billed_purchase_date(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(billed_purchase_date(date(2026, 6, 5), 2), date(2026, 8, 5));
    }
}
