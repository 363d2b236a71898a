use anyhow::Context;
use clap::Parser;
use lunchguiden_etl::utils::error::ErrorSeverity;
use lunchguiden_etl::utils::logger;
use lunchguiden_etl::{CliConfig, EtlEngine, HttpFetcher, LocalStorage, MenuPipeline, NameTable, RunConfig};

fn load_names(config: &RunConfig) -> anyhow::Result<NameTable> {
    match &config.names_file {
        Some(path) => NameTable::builtin_with_file(path)
            .with_context(|| format!("Failed to load restaurant names from '{}'", path)),
        None => Ok(NameTable::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lunchguiden");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Run config: {:?}", config);

    let names = load_names(&config)?;
    let fetcher = HttpFetcher::from_config(&config).context("Failed to set up the HTTP client")?;
    let storage = LocalStorage::default();

    let pipeline = MenuPipeline::new(fetcher, storage, config, names);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(artifacts) => {
            tracing::info!("✅ Menu written to {}", artifacts.json_path);
            println!("✅ Wrote {} bytes to {}", artifacts.bytes_written, artifacts.json_path);
            println!("🔑 MD5 {} written to {}", artifacts.digest, artifacts.digest_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Menu ETL failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
