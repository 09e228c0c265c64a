//! `billguard` terminal front end.
//!
//! # Responsibility
//! - Map subcommands onto `billguard_core` use cases, one action per run.
//! - Report validation and transport failures inline without aborting
//!   completed store writes.

mod render;

use anyhow::{bail, Context, Result};
use billguard_core::{
    init_logging, AppConfig, Bill, BillCategory, BillService, Session, SmtpRelay,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::info;
use rust_decimal::Decimal;
use std::process::ExitCode;

const MISSING_CREDENTIALS: &str =
    "--email and --password (or BILLGUARD_EMAIL / BILLGUARD_APP_PASSWORD)";

#[derive(Parser, Debug)]
#[command(name = "billguard", version, about = "Track bills and email due-date reminders")]
struct Cli {
    /// Reference date (YYYY-MM-DD). Defaults to the local calendar date.
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Relay login address. Falls back to BILLGUARD_EMAIL.
    #[arg(long, global = true)]
    email: Option<String>,

    /// Relay app password. Falls back to BILLGUARD_APP_PASSWORD.
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new bill.
    Add(AddArgs),
    /// Show all bills sorted by days left.
    List,
    /// Mark a bill as paid (removes every bill with this exact name).
    Pay {
        /// Bill name.
        name: String,
    },
    /// Check the relay login and send a login notice to yourself.
    Login,
    /// Email one reminder per bill due within 3 days.
    Alert,
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Bill name, e.g. Electricity.
    #[arg(short, long)]
    name: String,

    /// Amount due (non-negative).
    #[arg(short, long)]
    amount: Decimal,

    /// Due date (YYYY-MM-DD).
    #[arg(short, long, value_parser = parse_date)]
    due: NaiveDate,

    /// Utility, EMI, Subscription or Other.
    #[arg(short, long)]
    category: Option<BillCategory>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to start logging")?;
    }

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut service = BillService::open(&config)
        .with_context(|| format!("failed to open {}", config.data_file.display()))?;

    let email = cli.email.or_else(|| config.email.clone());
    let password = cli.password.or_else(|| config.app_password.clone());
    info!("event=cli_command module=cli status=start today={today}");

    match cli.command {
        Command::Add(args) => {
            let mut session = optional_session(email.as_deref(), password.as_deref())?;
            add(&mut service, session.as_mut(), args, today)?;
            if let Some(session) = session {
                session.logout();
            }
        }
        Command::List => render::print_dashboard(&service.dashboard(today)),
        Command::Pay { name } => pay(&mut service, &name)?,
        Command::Login => {
            let (email, password) = require_credentials(email, password)?;
            let outcome = service.login(&email, &password)?;
            match outcome.notice {
                Ok(()) => println!(
                    "Logged in as {}. Login notice sent.",
                    outcome.session.address()
                ),
                Err(err) => println!(
                    "Logged in as {} (unverified): {err}",
                    outcome.session.address()
                ),
            }
            outcome.session.logout();
        }
        Command::Alert => {
            let (email, password) = require_credentials(email, password)?;
            let mut session = Session::login(&email, &password)?;
            let report = service.send_critical_alerts(&mut session, today);
            render::print_dispatch_report(&report);
            session.logout();
        }
    }
    Ok(())
}

fn add(
    service: &mut BillService<SmtpRelay>,
    session: Option<&mut Session>,
    args: AddArgs,
    today: NaiveDate,
) -> Result<()> {
    let bill = new_bill(args, today)?;

    let outcome = service.add_bill(session, bill)?;
    println!("Bill saved: {}", outcome.bill.summary());
    if let Some(Err(err)) = outcome.notice {
        println!("Bill-added notice not sent: {err}");
    }
    Ok(())
}

fn pay(service: &mut BillService<SmtpRelay>, name: &str) -> Result<()> {
    match service.pay_bill(name)? {
        0 => {
            let known = service.store().names().join(", ");
            println!("No bill named `{name}`. Known bills: {known}");
        }
        removed => println!("Successfully cleared {name} ({removed} record(s))."),
    }
    Ok(())
}

// The add form only offers due dates from today onward.
fn new_bill(args: AddArgs, today: NaiveDate) -> Result<Bill> {
    let mut bill = Bill::new(args.name, args.amount, args.due)?;
    bill.ensure_due_from(today)?;
    if let Some(category) = args.category {
        bill = bill.with_category(category);
    }
    Ok(bill)
}

fn optional_session(email: Option<&str>, password: Option<&str>) -> Result<Option<Session>> {
    match (email, password) {
        (Some(email), Some(password)) => Ok(Some(Session::login(email, password)?)),
        (None, None) => Ok(None),
        (Some(_), None) => bail!("--email was given without --password ({MISSING_CREDENTIALS})"),
        (None, Some(_)) => bail!("--password was given without --email ({MISSING_CREDENTIALS})"),
    }
}

fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => bail!("this command needs {MISSING_CREDENTIALS}"),
    }
}
