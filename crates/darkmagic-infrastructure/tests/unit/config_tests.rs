//! Configuration loading tests
//!
//! figment's `Jail` isolates the working directory and environment of each
//! test and serializes them.

use std::path::PathBuf;

use figment::Jail;

use darkmagic_domain::error::Error;
use darkmagic_infrastructure::config::{AppConfig, ConfigLoader, OverrideConfig};

fn load() -> Result<AppConfig, figment::Error> {
    ConfigLoader::new().load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_file() {
    Jail::expect_with(|_jail| {
        let config = load()?;
        assert!(config.engine.auto_inject_local_factories);
        assert!(!config.engine.auto_inject_external_factories);
        assert!(config.engine.overrides.is_empty());
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_lib_directory_becomes_default_search_path() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join("lib")).map_err(|e| e.to_string())?;
        let config = load()?;
        assert_eq!(config.engine.search_paths, [PathBuf::from("lib")]);
        Ok(())
    });
}

#[test]
fn test_toml_file_is_merged() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "darkmagic.toml",
            r#"
            [engine]
            search_paths = ["plugins", "vendor"]
            auto_inject_external_factories = true

            [engine.overrides]
            port = 8080
            db = { locator = "pkg:sqlite" }

            [logging]
            level = "debug"
            json_format = true
            "#,
        )?;

        let config = load()?;
        assert_eq!(
            config.engine.search_paths,
            [PathBuf::from("plugins"), PathBuf::from("vendor")]
        );
        assert!(config.engine.auto_inject_external_factories);
        assert_eq!(
            config.engine.overrides.get("port"),
            Some(&OverrideConfig::Value(serde_json::json!(8080)))
        );
        assert_eq!(
            config.engine.overrides.get("db"),
            Some(&OverrideConfig::Locator {
                locator: "pkg:sqlite".to_string()
            })
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("darkmagic.toml", "[logging]\nlevel = \"warn\"\n")?;
        jail.set_env("DARKMAGIC_LOGGING__LEVEL", "trace");
        jail.set_env("DARKMAGIC_ENGINE__AUTO_INJECT_LOCAL_FACTORIES", "false");

        let config = load()?;
        assert_eq!(config.logging.level, "trace");
        assert!(!config.engine.auto_inject_local_factories);
        Ok(())
    });
}

#[test]
fn test_file_in_config_directory_is_found() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join("config")).map_err(|e| e.to_string())?;
        jail.create_file("config/darkmagic.toml", "[logging]\nlevel = \"error\"\n")?;
        assert_eq!(load()?.logging.level, "error");
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("darkmagic.toml", "[logging]\nlevel = \"loud\"\n")?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        Ok(())
    });
}

#[test]
fn test_illegal_override_name_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("darkmagic.toml", "[engine.overrides]\n\"../secret\" = 1\n")?;
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("../secret"));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("darkmagic.toml", "[logging]\nlevel = \"error\"\n")?;
        let config = ConfigLoader::new()
            .with_config_path("elsewhere.toml")
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn test_saved_config_loads_back() {
    Jail::expect_with(|jail| {
        let mut config = AppConfig::default();
        config.engine.search_paths = vec![PathBuf::from("modules")];
        config.engine.auto_inject_external_factories = true;
        config.logging.level = "debug".to_string();

        let path = jail.directory().join("saved.toml");
        let loader = ConfigLoader::new().with_config_path(&path);
        loader.save_to_file(&config, &path).map_err(|e| e.to_string())?;

        assert_eq!(loader.config_path(), Some(path.as_path()));
        assert_eq!(loader.load().map_err(|e| e.to_string())?, config);
        Ok(())
    });
}
