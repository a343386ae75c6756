pub mod calendar;
pub mod date_range;
pub mod resolver;

pub use crate::domain::model::{Interval, Preset};
pub use crate::domain::ports::{Clock, ConfigProvider};
pub use crate::utils::error::Result;
