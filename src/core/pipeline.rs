use crate::core::assemble::assemble_week;
use crate::core::digest::{digest_path, serialize_week};
use crate::core::resolver::NameTable;
use crate::core::{Artifacts, Assembly, ConfigProvider, DayDocument, Fetcher, Pipeline, Storage, WeekMenu, Weekday};
use crate::utils::error::{EtlError, Result};
use futures::future::join_all;
use std::time::Duration;

/// Fetches the five day pages, builds the week and writes the menu document
/// plus its digest sidecar.
pub struct MenuPipeline<F: Fetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
    names: NameTable,
}

impl<F: Fetcher, S: Storage, C: ConfigProvider> MenuPipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C, names: NameTable) -> Self {
        Self {
            fetcher,
            storage,
            config,
            names,
        }
    }

    async fn fetch_day(&self, day: Weekday) -> DayDocument {
        let seconds = self.config.timeout_seconds();
        match tokio::time::timeout(Duration::from_secs(seconds), self.fetcher.fetch(day)).await {
            Ok(Ok(body)) => {
                tracing::info!("📥 {}: received {} bytes", day, body.len());
                DayDocument::fetched(day, body)
            }
            Ok(Err(e)) => DayDocument::failed(day, e),
            Err(_) => DayDocument::failed(
                day,
                EtlError::TimeoutError {
                    day: day.to_string(),
                    seconds,
                },
            ),
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage, C: ConfigProvider> Pipeline for MenuPipeline<F, S, C> {
    async fn extract(&self) -> Result<Vec<DayDocument>> {
        tracing::info!(
            "🚀 Downloading menus for {} week {}",
            self.config.city(),
            self.config.week()
        );

        let documents = if self.config.concurrent() {
            join_all(Weekday::ALL.iter().map(|day| self.fetch_day(*day))).await
        } else {
            let mut documents = Vec::with_capacity(Weekday::ALL.len());
            for day in Weekday::ALL {
                documents.push(self.fetch_day(day).await);
            }
            documents
        };

        Ok(documents)
    }

    async fn transform(&self, documents: Vec<DayDocument>) -> Result<Assembly> {
        let assembly = assemble_week(
            self.config.city(),
            self.config.week(),
            documents,
            &self.names,
        )?;

        tracing::debug!(
            "Assembled {} restaurants with {} diagnostics",
            assembly.week.restaurant_count(),
            assembly.diagnostics.len()
        );
        Ok(assembly)
    }

    async fn load(&self, week: WeekMenu) -> Result<Artifacts> {
        let serialized = serialize_week(&week)?;
        tracing::info!("🔑 MD5 is: {}", serialized.digest);

        let json_path = self.config.output_path().to_string();
        let digest_path = digest_path(&json_path);

        tracing::info!("💾 Writing {} bytes to {}", serialized.json.len(), json_path);
        self.storage.write_file(&json_path, &serialized.json).await?;

        tracing::debug!("Writing md5 sum to {}", digest_path);
        self.storage
            .write_file(&digest_path, serialized.digest.as_bytes())
            .await?;

        Ok(Artifacts {
            json_path,
            digest_path,
            bytes_written: serialized.json.len(),
            digest: serialized.digest,
        })
    }
}
