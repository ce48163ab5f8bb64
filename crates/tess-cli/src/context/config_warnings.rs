use tess_config::TesseraConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TesseraConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TesseraConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.store.is_configured() && has_env_prefix(&env_keys, "TESSERA_STORE") {
        warnings.push(
            "Store config appears default while TESSERA_STORE* env vars exist. Use double underscores (example: TESSERA_STORE__URL)."
                .to_string(),
        );
    }

    if !config.auth.has_access_token() && has_env_prefix(&env_keys, "TESSERA_AUTH") {
        warnings.push(
            "Auth config appears default while TESSERA_AUTH* env vars exist. Use double underscores (example: TESSERA_AUTH__ACCESS_TOKEN)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
