use super::ui;
use crate::core::board::RateBoard;
use crate::core::currency::Currency;
use crate::core::rates::RateProvider;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use tracing::info;

/// Options for a one-shot board.
#[derive(Debug, Clone)]
pub struct RatesOptions {
    pub base: Currency,
    pub date: Option<NaiveDate>,
    pub mid_only: bool,
    pub json: bool,
}

/// Fetches once for the requested base and date and renders the board.
/// Returns the rendered output so callers decide where it goes.
pub async fn render(
    provider: &(dyn RateProvider + Send + Sync),
    options: &RatesOptions,
    today: NaiveDate,
) -> Result<String> {
    let mut board = RateBoard::new(options.base, today);
    let ticket = match options.date {
        Some(date) => board.set_date(date, today)?,
        None => board.refresh(today)?,
    };
    info!(request = %ticket.request, "Fetching exchange rates");

    let pb = (!options.json).then(|| ui::new_spinner("Fetching exchange rates..."));
    let outcome = provider.fetch_rates(&ticket.request).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    board.complete(&ticket, outcome);
    if let Some(message) = board.error() {
        bail!("Failed to fetch exchange rates: {message}");
    }

    if options.json {
        board.to_json()
    } else {
        Ok(board.display(options.mid_only))
    }
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    options: &RatesOptions,
    today: NaiveDate,
) -> Result<()> {
    let output = render(provider, options, today).await?;
    println!("{output}");
    Ok(())
}
