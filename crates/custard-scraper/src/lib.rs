pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod html;
pub mod normalize;
pub mod sources;

pub use aggregate::{merge_outcomes, Aggregator, SourceOutcome};
pub use error::ScraperError;
pub use fetch::FetchSettings;
pub use sources::{default_sources, FlavorSource, GillesSource, KoppsSource, LeonsSource};
