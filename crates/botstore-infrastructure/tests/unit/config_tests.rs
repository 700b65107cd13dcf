//! Configuration Tests
//!
//! Every test that loads runs inside a figment `Jail`, which serializes the
//! tests and gives each a scratch working directory and environment.

use botstore_domain::error::Error;
use botstore_domain::keys::KeyPolicy;
use botstore_infrastructure::config::loader::validate_app_config;
use botstore_infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader, StoreConfig};
use botstore_infrastructure::constants::*;
use figment::Jail;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Run `log_source` under a subscriber that records its output
fn logged_source(loader: &ConfigLoader) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, || loader.log_source());
    logs.text()
}

fn load(loader: ConfigLoader) -> Result<AppConfig, figment::Error> {
    loader.load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = load(ConfigLoader::new())?;

        assert_eq!(config.store.connection_target, DEFAULT_CONNECTION_TARGET);
        assert_eq!(config.store.database, None);
        assert_eq!(config.store.key_policy, KeyPolicy::Legacy);
        assert_eq!(config.store.compression_level, DEFAULT_COMPRESSION_LEVEL);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        Ok(())
    });
}

#[test]
fn test_default_file_is_discovered_in_working_dir() {
    Jail::expect_with(|jail| {
        jail.create_file(
            DEFAULT_CONFIG_FILENAME,
            r#"
                [store]
                connection_target = "cache.internal:6380"
                database = 4
                key_policy = "strict"
                key_namespace = "prod"
            "#,
        )?;

        let config = load(ConfigLoader::new())?;

        assert_eq!(config.store.connection_target, "cache.internal:6380");
        assert_eq!(config.store.database, Some(4));
        assert_eq!(config.store.key_policy, KeyPolicy::Strict);
        assert_eq!(config.store.key_namespace.as_deref(), Some("prod"));
        // Unset fields keep their defaults
        assert_eq!(config.store.response_timeout_ms, DEFAULT_RESPONSE_TIMEOUT_MS);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
                [store]
                connection_target = "from-file:6379"
                database = 1
            "#,
        )?;
        jail.set_env("BOTSTORE__STORE__DATABASE", "9");
        jail.set_env("BOTSTORE__LOGGING__LEVEL", "debug");

        let config = load(ConfigLoader::new().with_config_path("custom.toml"))?;

        assert_eq!(config.store.connection_target, "from-file:6379");
        assert_eq!(config.store.database, Some(9));
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_single_underscore_prefix_is_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("BOTSTORE_STORE_DATABASE", "3");

        let config = load(ConfigLoader::new())?;

        assert_eq!(config.store.database, None);
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("BOTSTATE__STORE__KEY_NAMESPACE", "staging");

        let config = load(ConfigLoader::new().with_env_prefix("BOTSTATE"))?;

        assert_eq!(config.store.key_namespace.as_deref(), Some("staging"));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let loader = ConfigLoader::new().with_config_path("absent.toml");
        let config = load(loader.clone())?;

        assert_eq!(config, AppConfig::default());
        assert_eq!(
            loader.config_path().map(|p| p.to_string_lossy().into_owned()),
            Some("absent.toml".to_string())
        );
        Ok(())
    });
}

#[test]
fn test_malformed_value_is_configuration_error() {
    Jail::expect_with(|jail| {
        jail.set_env("BOTSTORE__STORE__CONNECT_TIMEOUT_MS", "soon");

        let err = ConfigLoader::new().load().unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_validation_rejects_bad_values() {
    Jail::expect_with(|jail| {
        jail.set_env("BOTSTORE__STORE__COMPRESSION_LEVEL", "12");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("Compression level"));
        Ok(())
    });

    let mut config = AppConfig::default();
    config.store.connection_target = "  ".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.store.response_timeout_ms = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_negative_database_is_accepted() {
    let config = ConfigBuilder::new()
        .with_store(StoreConfig {
            database: Some(-1),
            ..StoreConfig::default()
        })
        .build();

    assert!(validate_app_config(&config).is_ok());
    assert_eq!(config.store.redis_options().effective_database(), None);
}

#[test]
fn test_discovered_file_is_reported_after_load() {
    Jail::expect_with(|jail| {
        jail.create_file(DEFAULT_CONFIG_FILENAME, "[store]\ndatabase = 2\n")?;

        let loader = ConfigLoader::new();
        assert_eq!(load(loader.clone())?.store.database, Some(2));

        let resolved = loader.resolved_config_path().expect("default file is found");
        assert!(resolved.ends_with(DEFAULT_CONFIG_FILENAME));

        let logs = logged_source(&loader);
        assert!(logs.contains("Configuration loaded from"));
        assert!(logs.contains(DEFAULT_CONFIG_FILENAME));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_is_reported_as_not_found() {
    Jail::expect_with(|_jail| {
        let loader = ConfigLoader::new().with_config_path("absent.toml");
        load(loader.clone())?;

        assert_eq!(
            loader.resolved_config_path().as_deref(),
            Some(std::path::Path::new("absent.toml"))
        );
        assert!(logged_source(&loader).contains("Configuration file not found: absent.toml"));
        Ok(())
    });
}

#[test]
fn test_config_save_load() {
    Jail::expect_with(|jail| {
        let config_path = jail.directory().join("saved.toml");
        let original = ConfigBuilder::new()
            .with_store(StoreConfig {
                connection_target: "redis://saved:6379".to_string(),
                database: Some(2),
                key_policy: KeyPolicy::Strict,
                compression_level: 1,
                ..StoreConfig::default()
            })
            .build();

        let loader = ConfigLoader::new();
        loader
            .save_to_file(&original, &config_path)
            .map_err(|e| e.to_string())?;

        let loaded = load(ConfigLoader::new().with_config_path(&config_path))?;

        assert_eq!(loaded, original);
        Ok(())
    });
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.toml");

    let err = ConfigLoader::new()
        .save_to_file(&AppConfig::default(), &path)
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_store_config_derives_components() {
    let config = StoreConfig {
        connection_target: "cache:6379".to_string(),
        database: Some(5),
        connect_timeout_ms: 250,
        response_timeout_ms: 750,
        key_policy: KeyPolicy::Strict,
        key_namespace: Some("prod".to_string()),
        compression_level: 3,
    };

    let keys = config.key_deriver();
    assert_eq!(keys.policy(), KeyPolicy::Strict);
    assert_eq!(keys.namespace(), Some("prod"));
    assert_eq!(config.codec().level(), 3);

    let options = config.redis_options();
    assert_eq!(options.connect_timeout.as_millis(), 250);
    assert_eq!(options.response_timeout.as_millis(), 750);
    assert_eq!(options.connection_url().unwrap(), "redis://cache:6379/5");
}
