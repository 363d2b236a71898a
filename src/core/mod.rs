pub mod assemble;
pub mod digest;
pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod resolver;
pub mod segment;

pub use crate::domain::model::{
    Artifacts, Assembly, DayDocument, DayMenu, Diagnostic, RestaurantEntry, WeekMenu, Weekday,
};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
