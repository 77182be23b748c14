//! Currencies that can be selected as a base and listed on the board

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    #[default]
    Jpy,
    Eur,
    Gbp,
    Aud,
    Cad,
    Chf,
    Cny,
    Krw,
    Inr,
}

impl Currency {
    /// Every selectable currency, in board order.
    pub const ALL: [Currency; 10] = [
        Currency::Usd,
        Currency::Jpy,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Krw,
        Currency::Inr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Jpy => "JPY",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Krw => "KRW",
            Currency::Inr => "INR",
        }
    }

    /// Number of decimals used when this currency is the base of the board.
    pub fn decimals(&self) -> usize {
        match self {
            Currency::Jpy => 2,
            _ => 4,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unsupported currency: {}. Expected one of: {}",
                    s,
                    Currency::ALL.map(|c| c.code()).join(", ")
                )
            })
    }
}
