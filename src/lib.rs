pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::{http::HttpFetcher, storage::LocalStorage};
pub use crate::config::RunConfig;
pub use crate::core::{etl::EtlEngine, pipeline::MenuPipeline, resolver::NameTable};
pub use crate::domain::model::{DayMenu, RestaurantEntry, WeekMenu, Weekday};
pub use crate::utils::error::{EtlError, Result};
