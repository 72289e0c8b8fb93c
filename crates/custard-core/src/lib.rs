pub mod app_config;
pub mod clock;
pub mod config;
pub mod display;
pub mod flavors;

pub use app_config::{AppConfig, Environment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::StandCard;
pub use flavors::{
    AggregateResponse, BrandGroups, DayLabel, FlavorEntry, LocationRecord, LocationStatus,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
