use clap::{Parser, ValueEnum};
use debtplan::application::engine::PayoffEngine;
use debtplan::application::timeline::balance_timeline;
use debtplan::domain::calendar::YearMonth;
use debtplan::domain::debt::Debt;
use debtplan::domain::ports::ClockBox;
use debtplan::domain::strategy::Strategy;
use debtplan::infrastructure::clock::{FixedClock, SystemClock};
use debtplan::interfaces::csv::debt_reader::DebtReader;
use debtplan::interfaces::csv::plan_writer::PlanWriter;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Amortization table, one row per payment
    Schedule,
    /// Single-row plan summary
    Summary,
    /// Month-by-month balances per debt
    Timeline,
    /// The full result as JSON
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input debts CSV file (id,name,balance,apr,min_payment)
    input: PathBuf,

    /// Extra amount paid every month on top of the minimums
    #[arg(long, default_value = "0")]
    extra: Decimal,

    /// Which debt receives the extra money first
    #[arg(long, value_enum, default_value_t = Strategy::Avalanche)]
    strategy: Strategy,

    /// Month to count payments from (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    start: Option<YearMonth>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Schedule)]
    format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let clock: ClockBox = match cli.start {
        Some(start) => match chrono::NaiveDate::from_ymd_opt(start.year, start.month, 1) {
            Some(date) => Box::new(FixedClock::new(date)),
            None => return Err(miette::miette!("Invalid start month: {}", start)),
        },
        None => Box::new(SystemClock::new()),
    };
    let engine = PayoffEngine::new(clock);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = DebtReader::new(file);
    let mut debts: Vec<Debt> = Vec::new();
    for debt_result in reader.debts() {
        match debt_result {
            Ok(debt) => debts.push(debt),
            Err(e) => {
                eprintln!("Skipping debt: {}", e);
            }
        }
    }
    info!(debts = debts.len(), strategy = ?cli.strategy, extra = %cli.extra, "calculating payoff plan");

    let result = engine.plan(&debts, cli.extra, cli.strategy).into_diagnostic()?;
    if !result.summary.converged {
        eprintln!(
            "Warning: debts are not paid off after {} months; the plan is incomplete.",
            result.summary.total_months
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Schedule => PlanWriter::new(&mut out)
            .write_schedule(&result)
            .into_diagnostic()?,
        OutputFormat::Summary => PlanWriter::new(&mut out)
            .write_summary(&result.summary)
            .into_diagnostic()?,
        OutputFormat::Timeline => {
            let timeline = balance_timeline(&debts, &result);
            PlanWriter::new(&mut out)
                .write_timeline(&debts, &timeline)
                .into_diagnostic()?
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
    }

    Ok(())
}
