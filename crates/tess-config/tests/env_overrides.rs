use figment::Jail;
use tess_config::TesseraConfig;
use tess_core::enums::EntityKind;

#[test]
fn env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("TESSERA_STORE__URL", "https://env.example.co");
        jail.set_env("TESSERA_STORE__ANON_KEY", "anon-from-env");
        jail.set_env("TESSERA_STORE__RETRY__MAX_ATTEMPTS", "7");
        jail.set_env("TESSERA_AUTH__ACCESS_TOKEN", "token-from-env");

        let config = TesseraConfig::load().expect("config loads");
        assert_eq!(config.store.url, "https://env.example.co");
        assert_eq!(config.store.anon_key, "anon-from-env");
        assert_eq!(config.store.retry.max_attempts, 7);
        assert!(config.auth.has_access_token());
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tessera")?;
        jail.create_file(
            ".tessera/config.toml",
            r#"
[report]
max_concurrency = 3
"#,
        )?;
        jail.set_env("TESSERA_REPORT__MAX_CONCURRENCY", "6");

        let config = TesseraConfig::load().expect("config loads");
        assert_eq!(config.report.max_concurrency, 6);
        Ok(())
    });
}

#[test]
fn env_sets_integrity_kinds() {
    Jail::expect_with(|jail| {
        jail.set_env("TESSERA_REPORT__INTEGRITY_KINDS", "[task, department]");

        let config = TesseraConfig::load().expect("config loads");
        assert_eq!(
            config.report.integrity_kinds,
            vec![EntityKind::Task, EntityKind::Department]
        );
        Ok(())
    });
}

#[test]
fn bad_url_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("TESSERA_STORE__URL", "ftp://nope");

        let err = TesseraConfig::load().expect_err("non-http url");
        assert!(err.to_string().contains("store.url"));
        Ok(())
    });
}
