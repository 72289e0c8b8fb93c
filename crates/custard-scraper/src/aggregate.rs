//! Runs every flavor source concurrently and merges what settles.
//!
//! Sources never short-circuit each other: each runs on its own task and the
//! aggregator waits for all of them. A source that errors or panics is logged
//! and contributes no records.

use std::collections::HashSet;
use std::sync::Arc;

use custard_core::{AggregateResponse, AppConfig, Clock, LocationRecord, SystemClock};
use futures::future::join_all;

use crate::error::ScraperError;
use crate::sources::{default_sources, FlavorSource};

/// How one source's task ended.
#[derive(Debug)]
pub enum SourceOutcome {
    Settled {
        source: &'static str,
        locations: Vec<LocationRecord>,
    },
    Failed {
        source: &'static str,
        error: ScraperError,
    },
}

impl SourceOutcome {
    #[must_use]
    pub fn source(&self) -> &'static str {
        match self {
            Self::Settled { source, .. } | Self::Failed { source, .. } => *source,
        }
    }
}

pub struct Aggregator {
    sources: Vec<Arc<dyn FlavorSource>>,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn FlavorSource>>, clock: Arc<dyn Clock>) -> Self {
        Self { sources, clock }
    }

    /// The three retailer sources on the wall clock in the configured zone.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            default_sources(config),
            Arc::new(SystemClock::new(config.timezone)),
        )
    }

    /// Same sources, different clock.
    #[must_use]
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self {
            sources: self.sources,
            clock,
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn FlavorSource>] {
        &self.sources
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Spawns one task per source and waits for every task to settle.
    ///
    /// Outcomes come back in source order regardless of completion order.
    pub async fn collect(&self) -> Vec<SourceOutcome> {
        let handles = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let clock = Arc::clone(&self.clock);
            let name = source.name();
            let handle =
                tokio::spawn(async move { source.fetch_locations(clock.as_ref()).await });
            (name, handle)
        });

        join_all(handles.map(|(name, handle)| async move {
            match handle.await {
                Ok(Ok(locations)) => SourceOutcome::Settled {
                    source: name,
                    locations,
                },
                Ok(Err(error)) => SourceOutcome::Failed {
                    source: name,
                    error,
                },
                Err(join_error) => SourceOutcome::Failed {
                    source: name,
                    error: ScraperError::TaskFailed {
                        source_name: name.to_string(),
                        reason: join_error.to_string(),
                    },
                },
            }
        }))
        .await
    }

    /// Collects from all sources and builds the response envelope.
    pub async fn run(&self) -> AggregateResponse {
        let outcomes = self.collect().await;
        let all_locations = merge_outcomes(outcomes);
        AggregateResponse::build(all_locations, self.clock.now(), self.clock.timezone())
    }
}

/// Flattens settled outcomes in order, logging and dropping failures.
#[must_use]
pub fn merge_outcomes(outcomes: Vec<SourceOutcome>) -> Vec<LocationRecord> {
    let mut all_locations = Vec::new();
    let mut seen_ids = HashSet::new();

    for outcome in outcomes {
        match outcome {
            SourceOutcome::Settled { source, locations } => {
                tracing::info!(source, count = locations.len(), "source settled");
                for record in &locations {
                    if !seen_ids.insert(record.id.clone()) {
                        tracing::warn!(source, id = %record.id, "duplicate location id");
                    }
                }
                all_locations.extend(locations);
            }
            SourceOutcome::Failed { source, error } => {
                tracing::error!(source, error = %error, "source failed; skipping");
            }
        }
    }

    all_locations
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
