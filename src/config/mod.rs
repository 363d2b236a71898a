pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_required_field, validate_url, Validate,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// ISO week of today in local time.
pub fn current_week() -> u32 {
    chrono::Local::now().iso_week().week()
}

/// Settings for one run, resolved once from flags and the config file and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub base_url: String,
    pub city: String,
    pub week: u32,
    pub output_path: String,
    pub timeout_seconds: u64,
    pub concurrent: bool,
    pub names_file: Option<String>,
}

impl ConfigProvider for RunConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn week(&self) -> u32 {
        self.week
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn concurrent(&self) -> bool {
        self.concurrent
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        let expanded = self.base_url.replace(crate::adapters::http::WEEK_PLACEHOLDER, "1");
        validate_url("url", &expanded)?;
        validate_non_empty_string("city", &self.city)?;
        validate_range("week", self.week, 1, 53)?;
        validate_path("out", &self.output_path)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        if let Some(names_file) = &self.names_file {
            validate_path("names", names_file)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, clap::Parser)]
#[command(name = "lunchguiden")]
#[command(about = "Downloads a week of lunch menus and writes them as JSON")]
pub struct CliConfig {
    /// Lunch guide URL; `{week}` is replaced by the week number
    #[arg(long)]
    pub url: Option<String>,

    /// Output file; the MD5 sum is written next to it with a .md5 suffix
    #[arg(long)]
    pub out: Option<String>,

    /// City label stored in the output
    #[arg(long)]
    pub city: Option<String>,

    /// Week number to download (defaults to the current ISO week)
    #[arg(long)]
    pub week: Option<u32>,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// TOML file with extra image → restaurant name entries
    #[arg(long)]
    pub names: Option<String>,

    /// Per-day fetch timeout
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Fetch the days one at a time
    #[arg(long)]
    pub sequential: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Layers the flags over the config file (if any) and validates the result.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.resolve_with(file)
    }

    pub fn resolve_with(&self, file: TomlConfig) -> Result<RunConfig> {
        let config = RunConfig {
            base_url: validate_required_field("url", self.url.clone().or(file.source.base_url))?,
            city: validate_required_field("city", self.city.clone().or(file.menu.city))?,
            week: self.week.or(file.menu.week).unwrap_or_else(current_week),
            output_path: validate_required_field("out", self.out.clone().or(file.load.output_path))?,
            timeout_seconds: self
                .timeout_seconds
                .or(file.source.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            concurrent: !(self.sequential || file.source.sequential.unwrap_or(false)),
            names_file: self.names.clone().or(file.names.file),
        };

        config.validate()?;
        Ok(config)
    }
}
