//! Configuration management for the KYT client
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::client::kyt_client::Credentials;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration for the KYT client
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// KYT API credentials
    pub kyt: KytConfig,
}

/// Credentials and endpoint of the KYT API
#[derive(Deserialize, Clone)]
pub struct KytConfig {
    /// The application id issued by the KYT provider
    pub app_id: String,
    /// The application secret issued by the KYT provider
    pub app_secret: String,
    /// The root URL of the KYT API, e.g. `https://api.example.com`
    pub app_root: String,
}

impl fmt::Debug for KytConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KytConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("app_root", &self.app_root)
            .finish()
    }
}

impl Validatable for KytConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        Credentials::try_from(self)
            .map(|_| ())
            .map_err(|err| ConfigError::Message(format!("[kyt] {err}")))
    }
}

impl Settings {
    /// Initializing the config from the optional config file and then with
    /// provided/overwritten environment variables. The explicit separator with
    /// double underscores is needed to correctly parse the nested config structure.
    ///
    /// The environment variables are prefixed with `KYT_CLIENT_`, so the path
    /// `kyt.app_id` is read from `KYT_CLIENT_KYT__APP_ID`.
    ///
    /// `overrides` take precedence over both sources. They are keyed by the
    /// config path, e.g. `("kyt.app_root", "http://localhost:8080")`.
    pub fn new<I>(config_path: Option<impl AsRef<Path>>, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let env = Environment::with_prefix("KYT_CLIENT")
            .separator("__")
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();
        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        for (key, value) in overrides {
            cfg_builder = cfg_builder.set_override(key, value)?;
        }

        Self::from_builder(cfg_builder)
    }

    fn from_builder(cfg_builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = cfg_builder.build()?.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.kyt.validate(self)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        let cfg_builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        Settings::from_builder(cfg_builder)
    }

    #[test]
    fn default_config_file_parses() {
        let toml = include_str!("config/default.toml");
        let settings = from_toml(toml).unwrap();

        assert_eq!(settings.kyt.app_id, "your_app_id");
        assert_eq!(settings.kyt.app_root, "https://kyt.example.com");
    }

    #[test]
    fn empty_app_secret_is_rejected() {
        let toml = r#"
            [kyt]
            app_id = "test_app_id"
            app_secret = ""
            app_root = "http://localhost:8080"
        "#;

        match from_toml(toml) {
            Err(ConfigError::Message(msg)) => assert!(msg.contains("app_secret")),
            other => panic!("Expected ConfigError::Message, got {other:?}"),
        }
    }

    #[test]
    fn missing_app_root_is_rejected() {
        let toml = r#"
            [kyt]
            app_id = "test_app_id"
            app_secret = "test_app_secret"
        "#;

        assert!(from_toml(toml).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let toml = r#"
            [kyt]
            app_id = "file_app_id"
            app_secret = "file_app_secret"
            app_root = "http://localhost:8080"
        "#;
        let env = Environment::with_prefix("KYT_CLIENT")
            .separator("__")
            .prefix_separator("_")
            .source(Some(
                [("KYT_CLIENT_KYT__APP_ID".to_string(), "env_app_id".to_string())]
                    .into_iter()
                    .collect(),
            ));
        let cfg_builder = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(env);

        let settings = Settings::from_builder(cfg_builder).unwrap();

        assert_eq!(settings.kyt.app_id, "env_app_id");
        assert_eq!(settings.kyt.app_secret, "file_app_secret");
    }

    #[test]
    fn overrides_take_precedence() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/config/default.toml");
        let overrides = [("kyt.app_root", "http://localhost:9090".to_string())];

        let settings = Settings::new(Some(path), overrides).unwrap();

        assert_eq!(settings.kyt.app_root, "http://localhost:9090");
    }

    #[test]
    fn debug_output_hides_secret() {
        let settings = from_toml(include_str!("config/default.toml")).unwrap();
        let rendered = format!("{settings:?}");

        assert!(rendered.contains("your_app_id"));
        assert!(!rendered.contains("your_app_secret"));
    }
}
