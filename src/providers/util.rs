use std::collections::HashMap;
use tracing::debug;

pub const USER_AGENT: &str = "fxboard/1.0";

/// Drops rates the upstream sent as `null`.
pub fn usable_rates(rates: HashMap<String, Option<f64>>) -> impl Iterator<Item = (String, f64)> {
    rates.into_iter().filter_map(|(code, rate)| match rate {
        Some(rate) => Some((code, rate)),
        None => {
            debug!("Skipping null rate for {}", code);
            None
        }
    })
}
