//! Derivation of bid and ask prices from a mid rate.
//!
//! When the base currency is JPY the spread is a flat amount of yen either side
//! of the mid rate. For every other base the spread is a percentage of the mid.

use serde::Serialize;

/// Base currency whose spreads are quoted as flat amounts.
pub const FLAT_SPREAD_BASE: &str = "JPY";

/// Margin applied either side of the mid rate for one quote currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    /// Absolute offset in JPY, used when the base is JPY.
    pub fixed_offset: f64,
    /// Fractional offset, used for every other base.
    pub percent_offset: f64,
}

pub const DEFAULT_SPREAD: Spread = Spread {
    fixed_offset: 1.0,
    percent_offset: 0.01,
};

/// Looks up the spread for a quote currency, falling back to
/// [`DEFAULT_SPREAD`] for codes not in the table.
pub fn spread_for(quote_currency: &str) -> Spread {
    let (fixed_offset, percent_offset) = match quote_currency {
        "USD" => (1.0, 0.01),
        "EUR" => (1.5, 0.01),
        "GBP" => (2.0, 0.015),
        "AUD" => (1.5, 0.015),
        "CAD" => (1.5, 0.015),
        "CHF" => (2.0, 0.015),
        "CNY" => (0.5, 0.02),
        "KRW" => (0.03, 0.02),
        "INR" => (0.5, 0.02),
        _ => return DEFAULT_SPREAD,
    };
    Spread {
        fixed_offset,
        percent_offset,
    }
}

/// Mid (TTM), bid (TTB) and ask (TTS) for one currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub mid: f64,
    pub bid: f64,
    pub ask: f64,
}

impl Quote {
    /// Formats `(mid, bid, ask)` with a fixed number of decimals.
    pub fn format(&self, decimals: usize) -> (String, String, String) {
        (
            format!("{:.*}", decimals, self.mid),
            format!("{:.*}", decimals, self.bid),
            format!("{:.*}", decimals, self.ask),
        )
    }
}

/// Derives a quote for `quote_currency` from a mid rate expressed per one unit
/// of `base_currency`. Callers must skip currencies without a usable mid.
pub fn derive_quote(mid: f64, quote_currency: &str, base_currency: &str) -> Quote {
    let spread = spread_for(quote_currency);
    if base_currency == FLAT_SPREAD_BASE {
        Quote {
            mid,
            bid: mid - spread.fixed_offset,
            ask: mid + spread.fixed_offset,
        }
    } else {
        Quote {
            mid,
            bid: mid * (1.0 - spread.percent_offset),
            ask: mid * (1.0 + spread.percent_offset),
        }
    }
}
