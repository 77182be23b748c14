//! Rate tables and the abstraction over upstream rate services

use crate::core::currency::Currency;
use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashMap;
use std::fmt::Display;

/// Point in time an upstream service says its rates are valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsOf {
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl Display for AsOf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AsOf::Timestamp(ts) => write!(
                f,
                "{}",
                ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            ),
            AsOf::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Mid rates for one base currency, expressed as units of each currency per
/// one unit of the base.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: Currency,
    rates: HashMap<String, f64>,
    pub as_of: Option<AsOf>,
}

impl RateTable {
    pub fn new(
        base: Currency,
        rates: impl IntoIterator<Item = (String, f64)>,
        as_of: Option<AsOf>,
    ) -> Self {
        RateTable {
            base,
            rates: rates.into_iter().collect(),
            as_of,
        }
    }

    /// Returns the mid rate for `code`, or `None` when it is missing or not a
    /// positive finite number.
    pub fn mid(&self, code: &str) -> Option<f64> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Which upstream endpoint a fetch goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRequest {
    Latest { base: Currency },
    Historical { base: Currency, date: NaiveDate },
}

impl RateRequest {
    /// Builds the request for `date`. Today maps to the live rates, earlier
    /// days to the historical rates, and future days are rejected.
    pub fn for_date(base: Currency, date: NaiveDate, today: NaiveDate) -> Result<Self> {
        if date > today {
            bail!("Cannot fetch rates for a future date: {date} (today is {today})");
        }
        if date == today {
            Ok(RateRequest::Latest { base })
        } else {
            Ok(RateRequest::Historical { base, date })
        }
    }

    pub fn base(&self) -> Currency {
        match self {
            RateRequest::Latest { base } | RateRequest::Historical { base, .. } => *base,
        }
    }
}

impl Display for RateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateRequest::Latest { base } => write!(f, "latest {base}"),
            RateRequest::Historical { base, date } => write!(f, "{base} on {date}"),
        }
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, request: &RateRequest) -> Result<RateTable>;
}
