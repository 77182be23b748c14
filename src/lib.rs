pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::rates::RatesOptions;
use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::providers::RateRouter;
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Rates(RatesOptions),
    Watch {
        base: Currency,
        date: Option<NaiveDate>,
        mid_only: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let router = RateRouter::from_config(&config);
    let today = chrono::Local::now().date_naive();

    match command {
        AppCommand::Rates(options) => cli::rates::run(&router, &options, today).await,
        AppCommand::Watch {
            base,
            date,
            mid_only,
        } => cli::watch::run(Arc::new(router), base, date, mid_only).await,
    }
}
