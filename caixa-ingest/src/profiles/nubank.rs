//! Nubank CSV exports.
//!
//! Nubank ships two distinct shapes: the account statement
//! (`Data,Valor,Identificador,Descrição`) and the credit-card export
//! (`date,title,amount`). The same real-world direction is encoded with
//! *opposite* signs in the two shapes: the account statement uses
//! positive-for-money-in, while the card export uses positive-for-charge
//! (so `amount < 0` means a refund or payment received). The inversion is
//! intentional and must stay per-shape; do not unify it.

use caixa_core::locale::{parse_amount, parse_date};
use caixa_core::model::{ParseResult, ParsedTransaction};
use csv::StringRecord;
use tracing::debug;

use super::{MIN_DATA_LINES, find_column, header_has};
use crate::tokenize::read_rows;

pub const LABEL: &str = "Nubank";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Account statement: positive amount = money in.
    Account,
    /// Credit-card export: positive amount = charge (money out).
    Card,
}

pub fn parse_csv(content: &str) -> ParseResult {
    let rows = read_rows(content);
    if rows.len() < MIN_DATA_LINES {
        return ParseResult::empty(LABEL, "file has no data rows");
    }

    let header = &rows[0];
    let shape = if header_has(header, "title") {
        Shape::Card
    } else if header_has(header, "identificador") {
        Shape::Account
    } else {
        return ParseResult::empty(LABEL, "unrecognized header for a Nubank export");
    };
    debug!(?shape, "nubank export shape detected");

    let columns = match resolve_columns(header, shape) {
        Some(cols) => cols,
        None => return ParseResult::empty(LABEL, "unrecognized header for a Nubank export"),
    };

    let mut result = ParseResult::new(LABEL);
    for (i, row) in rows.iter().enumerate().skip(1) {
        match parse_row(row, &columns, shape) {
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

fn resolve_columns(header: &StringRecord, shape: Shape) -> Option<Columns> {
    let (date_syn, desc_syn, amount_syn): (&[&str], &[&str], &[&str]) = match shape {
        Shape::Account => (&["data"], &["descricao"], &["valor"]),
        Shape::Card => (&["date"], &["title"], &["amount"]),
    };
    let date = find_column(header, date_syn, &[])?;
    let description = find_column(header, desc_syn, &[date])?;
    let amount = find_column(header, amount_syn, &[date, description])?;
    Some(Columns {
        date,
        description,
        amount,
    })
}

fn parse_row(row: &StringRecord, columns: &Columns, shape: Shape) -> Result<ParsedTransaction, String> {
    let date_field = row.get(columns.date).unwrap_or("");
    let date = parse_date(date_field)
        .ok_or_else(|| format!("could not parse date '{date_field}'"))?;

    let amount_field = row.get(columns.amount).unwrap_or("");
    let raw = parse_amount(amount_field)
        .ok_or_else(|| format!("could not parse amount '{amount_field}'"))?;

    // Card exports flip the sign convention relative to every other profile.
    let signed = match shape {
        Shape::Account => raw,
        Shape::Card => -raw,
    };

    let description = row.get(columns.description).unwrap_or("").to_string();
    Ok(ParsedTransaction::from_signed(date, description, signed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_core::model::Direction;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_shape_positive_is_income() {
        let content = "Data,Valor,Identificador,Descrição\n\
            05/03/2026,150.00,abc-123,Transferência recebida pelo Pix\n\
            06/03/2026,-42.90,def-456,Compra no débito\n";
        let result = parse_csv(content);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].direction, Direction::Income);
        assert_eq!(result.transactions[0].amount, dec!(150.00));
        assert_eq!(result.transactions[1].direction, Direction::Expense);
    }

    #[test]
    fn test_card_shape_sign_is_inverted() {
        let content = "date,title,amount\n\
            2026-03-05,Estorno de compra,-89.90\n\
            2026-03-06,Ifood,56.70\n";
        let result = parse_csv(content);
        assert_eq!(result.transactions.len(), 2);
        // Negative raw amount on the card means money received.
        assert_eq!(result.transactions[0].direction, Direction::Income);
        assert_eq!(result.transactions[0].amount, dec!(89.90));
        assert_eq!(result.transactions[1].direction, Direction::Expense);
    }

    #[test]
    fn test_same_event_yields_income_in_both_shapes() {
        // "I received R$ 100" — positive in the account export…
        let account = parse_csv(
            "Data,Valor,Identificador,Descrição\n10/03/2026,100.00,x,Pix recebido\n",
        );
        // …and negative in the card export (a credit on the invoice).
        let card = parse_csv("date,title,amount\n2026-03-10,Pagamento recebido,-100.00\n");
        assert_eq!(account.transactions[0].direction, Direction::Income);
        assert_eq!(card.transactions[0].direction, Direction::Income);
        assert_eq!(account.transactions[0].amount, card.transactions[0].amount);
    }

    #[test]
    fn test_unrecognized_header_is_file_level_warning() {
        let result = parse_csv("foo,bar,baz\n1,2,3\n");
        assert!(result.transactions.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Nubank"));
    }

    #[test]
    fn test_bad_rows_warn_and_continue() {
        let content = "date,title,amount\n\
            2026-03-05,Ok,10.00\n\
            garbage,Bad date,10.00\n\
            2026-03-07,Bad amount,??\n";
        let result = parse_csv(content);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.transactions.len() + result.warnings.len(), 3);
    }
}
