use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finbot::cli::{
    handle_audit_command, handle_contact_command, handle_dashboard_command,
    handle_expense_command, handle_goal_command, handle_income_command, handle_plan_command,
    ContactArgs, ExpenseCommands, GoalCommands, IncomeCommands,
};
use finbot::config::{paths::FinbotPaths, settings::Settings};
use finbot::models::Session;
use finbot::storage::Storage;
use finbot::FinbotError;

#[derive(Parser)]
#[command(
    name = "finbot",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance tracker with a terminal dashboard",
    long_about = "FinBot tracks your income, expenses and savings goals from the \
                  command line. It shows where your money goes, how close each goal \
                  is, and can sketch a simple monthly plan."
)]
struct Cli {
    /// Signed-in user's email, shown in the dashboard
    #[arg(long, global = true, env = "FINBOT_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Income commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show totals, the chart and all expenses
    #[command(alias = "dash")]
    Dashboard,

    /// Ask the planner for a budget plan
    Plan {
        /// Describe your income, expenses and goals
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FinbotPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(&paths)?;
    for warning in storage.load_all()? {
        eprintln!("warning: {}", warning);
    }

    let session = Session::from_identity(cli.user);

    let result = run(cli.command, &paths, &settings, &storage, &session);

    // changes made before a failure are already saved, so report these either way
    for failure in storage.take_audit_failures() {
        eprintln!("warning: audit log not updated: {}", failure);
    }

    result
}

fn run(
    command: Option<Commands>,
    paths: &FinbotPaths,
    settings: &Settings,
    storage: &Storage,
    session: &Session,
) -> Result<()> {
    match command {
        Some(Commands::Tui) => {
            if !std::io::stdout().is_terminal() {
                return Err(FinbotError::Tui("the TUI needs an interactive terminal".into()).into());
            }
            finbot::tui::run_tui(storage, settings, session)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(storage, settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(storage, settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(storage, settings, cmd)?;
        }
        Some(Commands::Dashboard) => {
            handle_dashboard_command(storage, settings, session)?;
        }
        Some(Commands::Plan { text }) => {
            handle_plan_command(settings, &text.join(" "))?;
        }
        Some(Commands::Contact(args)) => {
            handle_contact_command(settings, args)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(storage, count)?;
        }
        Some(Commands::Config) => {
            println!("FinBot Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data store:     {}", paths.local_store_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Planner delay:   {} ms", settings.planner_delay_ms);
            println!("  Contact delay:   {} ms", settings.contact_delay_ms);
            println!("  TUI tick rate:   {} ms", settings.tick_rate_ms);
            println!();
            println!("User: {}", session.display_email());
        }
        None => {
            println!("FinBot - personal finance tracking");
            println!();
            println!("Run 'finbot --help' for usage information.");
            println!("Run 'finbot tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
