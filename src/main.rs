use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fxboard::cli::rates::RatesOptions;
use fxboard::core::currency::Currency;
use fxboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BoardArgs {
    /// Base currency: one unit of it is priced in every other currency
    #[arg(short, long, default_value_t = Currency::Jpy)]
    base: Currency,

    /// Date of the rates (YYYY-MM-DD), today when omitted
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Show only the mid rate (TTM)
    #[arg(long)]
    mid_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display mid, bid and ask rates once
    Rates {
        #[command(flatten)]
        board: BoardArgs,

        /// Print the rates as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display an interactive board that can be refreshed
    Watch {
        #[command(flatten)]
        board: BoardArgs,
    },
}

impl From<Commands> for fxboard::AppCommand {
    fn from(cmd: Commands) -> fxboard::AppCommand {
        match cmd {
            Commands::Rates { board, json } => fxboard::AppCommand::Rates(RatesOptions {
                base: board.base,
                date: board.date,
                mid_only: board.mid_only,
                json,
            }),
            Commands::Watch { board } => fxboard::AppCommand::Watch {
                base: board.base,
                date: board.date,
                mid_only: board.mid_only,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxboard::cli::setup::setup(),
        Some(cmd) => fxboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
