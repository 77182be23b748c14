use super::ui;
use crate::core::board::{FetchState, RateBoard, RateCard};
use crate::core::currency::Currency;
use anyhow::Result;
use comfy_table::{Cell, Color};
use serde::Serialize;

const GLOSSARY: [(&str, &str); 3] = [
    ("TTM (mid)", "reference rate published by the bank"),
    (
        "TTB (bid)",
        "rate at which the bank buys foreign currency (customer sells)",
    ),
    (
        "TTS (ask)",
        "rate at which the bank sells foreign currency (customer buys)",
    ),
];

impl RateBoard {
    /// Renders the board the way the terminal shows it: last-updated line,
    /// then either the loading notice, the error banner or the rate grid.
    pub fn display(&self, mid_only: bool) -> String {
        let mut output = String::new();

        if let Some(as_of) = self.last_updated() {
            output.push_str(&ui::style_text(
                &format!("Last updated: {as_of}"),
                ui::StyleType::Subtle,
            ));
            output.push_str("\n\n");
        }

        match self.state() {
            FetchState::Idle => {}
            FetchState::Loading => output.push_str("Fetching exchange rates...\n"),
            FetchState::Failed(message) => {
                output.push_str(&ui::style_text(
                    &format!("Error: {message}"),
                    ui::StyleType::Error,
                ));
                output.push('\n');
            }
            FetchState::Ready(_) => output.push_str(&self.display_grid(mid_only)),
        }

        output
    }

    fn display_grid(&self, mid_only: bool) -> String {
        let base = self.base();
        let mut output = format!(
            "{}\n\n",
            ui::style_text(
                &format!("1 {} rates ({})", base, self.selected_date()),
                ui::StyleType::Title
            )
        );

        let cards = self.cards();
        if cards.is_empty() {
            output.push_str("No rates available for the listed currencies.\n");
            return output;
        }

        output.push_str(&rate_table(&cards, base, mid_only));
        output.push_str("\n\n");

        let glossary = if mid_only {
            &GLOSSARY[..1]
        } else {
            &GLOSSARY[..]
        };
        for (term, meaning) in glossary {
            output.push_str(&format!(
                "{}: {}\n",
                ui::style_text(term, ui::StyleType::Label),
                meaning
            ));
        }
        if !mid_only {
            output.push_str(&ui::style_text(
                "Spreads are typical indicative values, not quotes from a specific bank.",
                ui::StyleType::Subtle,
            ));
            output.push('\n');
        }

        output
    }

    /// Serialises the current cards for machine consumption.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = BoardSnapshot {
            base: self.base(),
            date: self.selected_date().format("%Y-%m-%d").to_string(),
            last_updated: self.last_updated().map(|as_of| as_of.to_string()),
            rates: self.cards(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

#[derive(Serialize)]
struct BoardSnapshot {
    base: Currency,
    date: String,
    last_updated: Option<String>,
    rates: Vec<RateCard>,
}

fn rate_table(cards: &[RateCard], base: Currency, mid_only: bool) -> String {
    let decimals = base.decimals();
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("Currency"), ui::header_cell("TTM (mid)")];
    if !mid_only {
        header.push(ui::header_cell("TTB (bid)"));
        header.push(ui::header_cell("TTS (ask)"));
    }
    table.set_header(header);

    for card in cards {
        let (mid, bid, ask) = card.quote.format(decimals);
        let mut row = vec![Cell::new(card.currency.code()), ui::rate_cell(mid, None)];
        if !mid_only {
            row.push(ui::rate_cell(bid, Some(Color::Blue)));
            row.push(ui::rate_cell(ask, Some(Color::Red)));
        }
        table.add_row(row);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{AsOf, RateTable};
    use anyhow::anyhow;
    use chrono::NaiveDate;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ready_board(base: Currency, rates: &[(&str, f64)]) -> RateBoard {
        let today = day("2024-03-15");
        let mut board = RateBoard::new(base, today);
        let ticket = board.refresh(today).unwrap();
        let table = RateTable::new(
            base,
            rates.iter().map(|(code, rate)| (code.to_string(), *rate)),
            Some(AsOf::Date(today)),
        );
        board.complete(&ticket, Ok(table));
        board
    }

    #[test]
    fn test_jpy_board_uses_two_decimals() {
        let board = ready_board(Currency::Jpy, &[("USD", 150.0), ("EUR", 162.5)]);
        let output = board.display(false);

        assert!(output.contains("Last updated: 2024-03-15"));
        assert!(output.contains("1 JPY rates (2024-03-15)"));
        assert!(output.contains("150.00"));
        assert!(output.contains("149.00"));
        assert!(output.contains("151.00"));
        assert!(output.contains("161.00"));
        assert!(output.contains("164.00"));
        assert!(output.contains("TTB (bid)"));
        assert!(output.contains("Spreads are typical indicative values"));
    }

    #[test]
    fn test_other_base_uses_four_decimals() {
        let board = ready_board(Currency::Usd, &[("USD", 1.0), ("EUR", 1.10)]);
        let output = board.display(false);

        assert!(output.contains("1.1000"));
        assert!(output.contains("1.0890"));
        assert!(output.contains("1.1110"));
    }

    #[test]
    fn test_mid_only_hides_bid_and_ask() {
        let board = ready_board(Currency::Jpy, &[("USD", 150.0)]);
        let output = board.display(true);

        assert!(output.contains("150.00"));
        assert!(!output.contains("TTB (bid)"));
        assert!(!output.contains("149.00"));
    }

    #[test]
    fn test_failed_board_shows_error_banner() {
        let today = day("2024-03-15");
        let mut board = RateBoard::new(Currency::Jpy, today);
        let ticket = board.refresh(today).unwrap();
        board.complete(
            &ticket,
            Err(anyhow!("HTTP error: 500 Internal Server Error")),
        );

        let output = board.display(false);
        assert!(output.contains("Error: HTTP error: 500 Internal Server Error"));
        assert!(!output.contains("rates (2024-03-15)"));
    }

    #[test]
    fn test_loading_board_shows_notice() {
        let today = day("2024-03-15");
        let mut board = RateBoard::new(Currency::Jpy, today);
        let _ticket = board.refresh(today).unwrap();
        assert!(board.display(false).contains("Fetching exchange rates..."));
    }

    #[test]
    fn test_board_without_listed_rates() {
        let board = ready_board(Currency::Usd, &[("XAU", 0.0005)]);
        assert!(
            board
                .display(false)
                .contains("No rates available for the listed currencies.")
        );
    }

    #[test]
    fn test_json_snapshot() {
        let board = ready_board(Currency::Jpy, &[("USD", 150.0)]);
        let json: serde_json::Value = serde_json::from_str(&board.to_json().unwrap()).unwrap();

        assert_eq!(json["base"], "JPY");
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["last_updated"], "2024-03-15");
        assert_eq!(json["rates"][0]["currency"], "USD");
        assert_eq!(json["rates"][0]["mid"], 150.0);
        assert_eq!(json["rates"][0]["bid"], 149.0);
        assert_eq!(json["rates"][0]["ask"], 151.0);
    }
}
