use crate::domain::model::{Artifacts, Assembly, DayDocument, WeekMenu, Weekday};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the raw page for one weekday.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, day: Weekday) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn city(&self) -> &str;
    fn week(&self) -> u32;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn concurrent(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<DayDocument>>;
    async fn transform(&self, documents: Vec<DayDocument>) -> Result<Assembly>;
    async fn load(&self, week: WeekMenu) -> Result<Artifacts>;
}
