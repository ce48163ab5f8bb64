use anyhow::Context;
use tess_config::TesseraConfig;

/// Load `.env`, the TOML layers and `TESSERA_*` overrides, then validate.
pub fn load_config() -> anyhow::Result<TesseraConfig> {
    let config = TesseraConfig::load_with_dotenv().context("failed to load tessera config")?;
    tracing::debug!(
        store_configured = config.store.is_configured(),
        operator = config.store.has_service_key(),
        max_concurrency = config.report.max_concurrency,
        run_timeout_secs = config.report.run_timeout_secs,
        "config loaded"
    );
    Ok(config)
}
