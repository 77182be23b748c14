use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::rates::{AsOf, RateProvider, RateRequest, RateTable};
use crate::providers::util::{USER_AGENT, usable_rates};

/// Historical end-of-day rates from frankfurter.app.
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoricalResponse {
    rates: HashMap<String, Option<f64>>,
    date: Option<NaiveDate>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "HistoricalRateFetch", skip(self, request), fields(request = %request))]
    async fn fetch_rates(&self, request: &RateRequest) -> Result<RateTable> {
        let RateRequest::Historical { base, date } = request else {
            bail!("Historical rate service cannot serve live request: {request}");
        };

        let url = format!(
            "{}/{}?from={}",
            self.base_url,
            date.format("%Y-%m-%d"),
            base
        );
        debug!("Requesting historical rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: HistoricalResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        // Weekends and holidays resolve to the previous business day upstream.
        if let Some(effective) = data.date
            && effective != *date
        {
            debug!(%effective, requested = %date, "Upstream served a different business day");
        }

        let table = RateTable::new(*base, usable_rates(data.rates), data.date.map(AsOf::Date));
        if table.is_empty() {
            warn!("No usable rates for base currency: {} on {}", base, date);
        } else {
            debug!(rates = table.len(), "Received historical rates");
        }
        Ok(table)
    }
}
