pub mod exchangerate_api;
pub mod frankfurter;
pub mod util;

use crate::core::config::AppConfig;
use crate::core::rates::{RateProvider, RateRequest, RateTable};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Sends live requests to one provider and historical requests to another.
pub struct RateRouter {
    latest: Box<dyn RateProvider>,
    historical: Box<dyn RateProvider>,
}

impl RateRouter {
    pub fn new(latest: Box<dyn RateProvider>, historical: Box<dyn RateProvider>) -> Self {
        RateRouter { latest, historical }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        RateRouter::new(
            Box::new(exchangerate_api::ExchangeRateApiProvider::new(
                &config.providers.latest.base_url,
                timeout,
            )),
            Box::new(frankfurter::FrankfurterProvider::new(
                &config.providers.historical.base_url,
                timeout,
            )),
        )
    }
}

#[async_trait]
impl RateProvider for RateRouter {
    async fn fetch_rates(&self, request: &RateRequest) -> Result<RateTable> {
        match request {
            RateRequest::Latest { .. } => {
                debug!("Routing {} to live rates", request);
                self.latest.fetch_rates(request).await
            }
            RateRequest::Historical { .. } => {
                debug!("Routing {} to historical rates", request);
                self.historical.fetch_rates(request).await
            }
        }
    }
}
