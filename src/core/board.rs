//! State of the rate board and the rules for issuing and applying fetches.
//!
//! Every fetch the board asks for is tagged with a sequence number. Only the
//! outcome of the most recently issued fetch is applied; anything older is
//! dropped, so a slow response can never overwrite a newer selection.
use crate::core::currency::Currency;
use crate::core::quote::{Quote, derive_quote};
use crate::core::rates::{AsOf, RateRequest, RateTable};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// A fetch the caller must perform and report back through
/// [`RateBoard::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: RateRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready(RateTable),
    Failed(String),
}

/// One currency on the board with its derived quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateCard {
    pub currency: Currency,
    #[serde(flatten)]
    pub quote: Quote,
}

#[derive(Debug)]
pub struct RateBoard {
    base: Currency,
    selected_date: NaiveDate,
    state: FetchState,
    last_updated: Option<AsOf>,
    issued: u64,
}

impl RateBoard {
    pub fn new(base: Currency, today: NaiveDate) -> Self {
        RateBoard {
            base,
            selected_date: today,
            state: FetchState::Idle,
            last_updated: None,
            issued: 0,
        }
    }

    pub fn base(&self) -> Currency {
        self.base
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn last_updated(&self) -> Option<AsOf> {
        self.last_updated
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Rates of the last successful fetch, hidden while a newer fetch is
    /// pending or has failed.
    pub fn rates(&self) -> Option<&RateTable> {
        match &self.state {
            FetchState::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// Re-fetches the current selection.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<FetchTicket> {
        let request = RateRequest::for_date(self.base, self.selected_date, today)?;
        Ok(self.issue(request))
    }

    pub fn set_base(&mut self, base: Currency, today: NaiveDate) -> Result<FetchTicket> {
        let request = RateRequest::for_date(base, self.selected_date, today)?;
        self.base = base;
        Ok(self.issue(request))
    }

    /// Selects a new date. Future dates are rejected and leave the board
    /// untouched.
    pub fn set_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<FetchTicket> {
        let request = RateRequest::for_date(self.base, date, today)?;
        self.selected_date = date;
        Ok(self.issue(request))
    }

    fn issue(&mut self, request: RateRequest) -> FetchTicket {
        self.issued += 1;
        self.state = FetchState::Loading;
        debug!(seq = self.issued, %request, "Issued rate fetch");
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    /// Applies the outcome of a fetch. Returns `false` when the ticket has been
    /// superseded and the outcome was dropped.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: Result<RateTable>) -> bool {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                "Discarding superseded rate fetch"
            );
            return false;
        }

        self.state = match outcome {
            Ok(table) => {
                if table.as_of.is_some() {
                    self.last_updated = table.as_of;
                }
                FetchState::Ready(table)
            }
            Err(e) => FetchState::Failed(e.to_string()),
        };
        true
    }

    /// Cards for every listed currency except the base, in board order.
    /// Currencies the table has no usable rate for are left out.
    pub fn cards(&self) -> Vec<RateCard> {
        let Some(table) = self.rates() else {
            return Vec::new();
        };

        Currency::ALL
            .into_iter()
            .filter(|currency| *currency != self.base)
            .filter_map(|currency| {
                table.mid(currency.code()).map(|mid| RateCard {
                    currency,
                    quote: derive_quote(mid, currency.code(), self.base.code()),
                })
            })
            .collect()
    }
}
