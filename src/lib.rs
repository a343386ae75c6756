pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clock::{FixedClock, SystemClock};
pub use config::toml_config::TomlConfig;
pub use core::{
    date_range::{DateRange, Each},
    resolver::RangeResolver,
};
pub use domain::model::{Interval, Preset};
pub use domain::ports::{Clock, ConfigProvider};
pub use utils::error::{DateRangeError, Result};
