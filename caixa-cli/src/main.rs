use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use caixa_core::billing::{ClosingDayRule, invoice_period};
use caixa_core::model::{Category, Direction};
use caixa_core::recurrence::{expand_fixed, expand_installments};
use caixa_core::suggest_categories;
use caixa_ingest::{BankProfile, StatementFormat, parse_statement};

#[derive(Parser, Debug)]
#[command(name = "caixa", version, about = "caixa ledger ingestion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported bank profiles and formats
    Banks,

    /// Parse a statement file and preview the extracted transactions
    Preview {
        /// Statement file (CSV, or extracted text for --format pdf)
        file: PathBuf,

        /// Bank profile id (see `caixa banks`)
        #[arg(long, default_value = "generic")]
        bank: String,

        /// Statement format (default: csv)
        #[arg(long, default_value = "csv")]
        format: String,

        /// JSON file with the user's categories: [{"id":1,"name":"Transporte"}]
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Emit the full ParseResult as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Expand a purchase into monthly installments
    Installments {
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        count: u32,

        /// Purchase date (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "Compra parcelada")]
        description: String,

        /// Billing month offset for card purchases (0 = not on a card)
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Expand a fixed monthly recurrence
    Recurring {
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        months: u32,

        /// First occurrence date (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "Despesa fixa")]
        description: String,
    },

    /// Show the invoice window for a card in a given month
    Invoice {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        /// Fixed closing day (1-31)
        #[arg(long, conflicts_with = "before_month_end")]
        closing_day: Option<u32>,

        /// Closing day N days before month end
        #[arg(long)]
        before_month_end: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    match Cli::parse().command {
        Command::Banks => banks(),
        Command::Preview {
            file,
            bank,
            format,
            categories,
            json,
        } => preview(file, &bank, &format, categories, json),
        Command::Installments {
            amount,
            count,
            date,
            description,
            offset,
        } => {
            let date = parse_cli_date(&date)?;
            let series =
                expand_installments(date, &description, amount, Direction::Expense, count, offset);
            print_series(&series);
            Ok(())
        }
        Command::Recurring {
            amount,
            months,
            date,
            description,
        } => {
            let date = parse_cli_date(&date)?;
            let series = expand_fixed(date, &description, amount, Direction::Expense, months);
            print_series(&series);
            Ok(())
        }
        Command::Invoice {
            year,
            month,
            closing_day,
            before_month_end,
        } => invoice(year, month, closing_day, before_month_end),
    }
}

fn banks() -> Result<()> {
    for profile in BankProfile::ALL {
        let mut formats = vec!["csv"];
        if profile.supports_pdf() {
            formats.push("pdf");
        }
        println!(
            "{:<10} {:<14} [{}]",
            profile.id(),
            profile.display_name(),
            formats.join(", ")
        );
    }
    Ok(())
}

fn preview(
    file: PathBuf,
    bank: &str,
    format: &str,
    categories: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let format = match format {
        "csv" => StatementFormat::Csv,
        "pdf" => StatementFormat::Pdf,
        other => bail!("unknown format '{other}' (expected csv or pdf)"),
    };
    let content = fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;

    let result = parse_statement(bank, format, &content)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{}: {} transactions, {} warnings\n",
        result.bank_label,
        result.transactions.len(),
        result.warnings.len()
    );

    let user_categories = match categories {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<Vec<Category>>(&raw)
                .with_context(|| format!("parsing categories from {}", path.display()))?
        }
        None => Vec::new(),
    };
    let suggestions = suggest_categories(&result.transactions, &user_categories);

    for (i, txn) in result.transactions.iter().enumerate() {
        let sign = match txn.direction {
            Direction::Income => '+',
            Direction::Expense => '-',
        };
        let category = suggestions
            .get(&i)
            .and_then(|id| user_categories.iter().find(|c| c.id == *id))
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        println!(
            "{}  {sign}{:>12}  {:<12}  {}",
            txn.date, txn.amount, category, txn.description
        );
    }

    if !result.warnings.is_empty() {
        println!();
        for warning in &result.warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

fn invoice(
    year: i32,
    month: u32,
    closing_day: Option<u32>,
    before_month_end: Option<u32>,
) -> Result<()> {
    if !(1..=12).contains(&month) {
        bail!("month must be 1-12");
    }
    let rule = match (closing_day, before_month_end) {
        (Some(day), None) if (1..=31).contains(&day) => ClosingDayRule::Fixed(day),
        (None, Some(n)) if (1..=31).contains(&n) => ClosingDayRule::BeforeMonthEnd(n),
        _ => bail!("pass exactly one of --closing-day or --before-month-end (1-31)"),
    };
    let period = invoice_period(rule, year, month);
    println!("closing day: {}", period.closing_day);
    println!("start:       {}", period.start);
    println!("end:         {}", period.end);
    Ok(())
}

fn print_series(series: &caixa_core::RecurrenceSeries) {
    println!("group: {}", series.group_id);
    for entry in &series.entries {
        println!(
            "{}  {:>12}  ({}/{})  {}",
            entry.date,
            entry.amount,
            entry.installment_index,
            entry.total_installments,
            entry.description
        );
    }
    println!("total: {}", series.total());
}

fn parse_cli_date(text: &str) -> Result<NaiveDate> {
    caixa_core::parse_date(text)
        .with_context(|| format!("could not parse date '{text}' (use DD/MM/YYYY or YYYY-MM-DD)"))
}
