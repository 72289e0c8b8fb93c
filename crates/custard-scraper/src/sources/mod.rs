//! Per-retailer flavor sources.
//!
//! Each source turns one retailer's page (or constant menu) into normalized
//! [`LocationRecord`]s. The scraping sources recover from their own fetch
//! failures; the `Result` in [`FlavorSource::fetch_locations`] exists so the
//! aggregator can isolate sources that fail anyway.

mod gilles;
mod kopps;
mod leons;

use std::sync::Arc;

use async_trait::async_trait;
use custard_core::{AppConfig, Clock, LocationRecord};

use crate::error::ScraperError;
use crate::fetch::FetchSettings;

pub use gilles::GillesSource;
pub use kopps::KoppsSource;
pub use leons::LeonsSource;

#[async_trait]
pub trait FlavorSource: Send + Sync {
    /// Short identifier used in logs, e.g. `"kopps"`.
    fn name(&self) -> &'static str;

    /// Page this source reads, if it reads one.
    fn url(&self) -> Option<&str> {
        None
    }

    /// Produce this source's location records.
    ///
    /// # Errors
    ///
    /// The built-in sources never return `Err`; they degrade to an empty list
    /// or a placeholder record instead.
    async fn fetch_locations(&self, clock: &dyn Clock)
        -> Result<Vec<LocationRecord>, ScraperError>;
}

/// The three retailer sources in response order: Kopp's, Leon's, Gilles.
#[must_use]
pub fn default_sources(config: &AppConfig) -> Vec<Arc<dyn FlavorSource>> {
    let settings = FetchSettings::new(
        config.scraper_request_timeout_secs,
        config.scraper_user_agent.as_str(),
    );
    vec![
        Arc::new(KoppsSource::new(config.kopps_url.clone(), settings.clone())),
        Arc::new(LeonsSource),
        Arc::new(GillesSource::new(config.gilles_url.clone(), settings)),
    ]
}
