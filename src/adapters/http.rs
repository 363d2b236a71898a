use crate::core::{ConfigProvider, Fetcher, Weekday};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Placeholder in the base URL that is replaced by the week number.
pub const WEEK_PLACEHOLDER: &str = "{week}";

/// Fetches day pages from the lunch guide over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, week: u32, timeout_seconds: u64) -> Result<Self> {
        let expanded = base_url.replace(WEEK_PLACEHOLDER, &week.to_string());
        let base_url = Url::parse(&expanded).map_err(|e| EtlError::InvalidConfigValueError {
            field: "url".to_string(),
            value: expanded.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), config.week(), config.timeout_seconds())
    }

    /// Base URL with the day appended as `veckodag`.
    pub fn day_url(&self, day: Weekday) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("veckodag", day.name());
        url
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, day: Weekday) -> Result<Vec<u8>> {
        let url = self.day_url(day);
        tracing::debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!(
            "{}: response is {}, length is {:?}",
            day,
            status,
            response.content_length()
        );

        if !status.is_success() {
            return Err(EtlError::FetchError {
                day: day.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
