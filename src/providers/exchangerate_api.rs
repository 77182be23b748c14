use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::rates::{AsOf, RateProvider, RateRequest, RateTable};
use crate::providers::util::{USER_AGENT, usable_rates};

/// Live rates from exchangerate-api.com.
pub struct ExchangeRateApiProvider {
    base_url: String,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, Option<f64>>,
    time_last_updated: Option<i64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "LatestRateFetch", skip(self, request), fields(request = %request))]
    async fn fetch_rates(&self, request: &RateRequest) -> Result<RateTable> {
        let RateRequest::Latest { base } = request else {
            bail!("Live rate service cannot serve historical request: {request}");
        };

        let url = format!("{}/latest/{}", self.base_url, base);
        debug!("Requesting latest rates from {}", url);

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

        let data: LatestResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        let as_of = data
            .time_last_updated
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(AsOf::Timestamp);

        let table = RateTable::new(*base, usable_rates(data.rates), as_of);
        if table.is_empty() {
            warn!("No usable latest rates for base currency: {}", base);
        } else {
            debug!(rates = table.len(), "Received latest rates");
        }
        Ok(table)
    }
}
