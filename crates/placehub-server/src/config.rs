//! Service configuration.
//!
//! The canonical configuration lives in `placehub-config.yaml` at the
//! project root (path overridable via `PLACEHUB_CONFIG`). Every section is
//! optional; secrets and endpoints are normally supplied through the
//! environment, which takes precedence over the file.

use std::path::Path;

use placehub_api::ServerConfig;
use placehub_storage::StorageConfig;
use placehub_upstream::UpstreamConfig;
use serde::Deserialize;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "placehub-config.yaml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "PLACEHUB_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {var}: {message}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
        }
    }
}

/// Top-level service configuration, mirroring `placehub-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address.
    pub server: ServerConfig,
    /// External API settings.
    pub upstream: UpstreamConfig,
    /// Object storage settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str::<Option<Self>>(yaml)?.unwrap_or_default();
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load `path` if it exists, else start from defaults. Environment
    /// overrides apply either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_overrides(|var| std::env::var(var).ok())?;
            Ok(config)
        }
    }

    /// Apply overrides looked up through `lookup` (the process
    /// environment in production).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(val) = get("GPLACES_API_KEY") {
            self.upstream.google_places.api_key = Some(val);
        }
        if let Some(val) = get("SERPER_API_KEY") {
            self.upstream.serper.api_key = Some(val);
        }
        if let Some(val) = get("INSTAGRAM_APP_ID") {
            self.upstream.instagram.app_id = Some(val);
        }
        if let Some(val) = get("WEBHOOK_LINK_PLACES") {
            self.upstream.webhook.link_places_url = Some(val);
        }

        if let Some(val) = get("S3_ENDPOINT") {
            self.storage.endpoint = Some(val);
        }
        if let Some(val) = get("S3_REGION") {
            self.storage.region = val;
        }
        if let Some(val) = get("S3_ACCESS_KEY_ID") {
            self.storage.access_key_id = Some(val);
        }
        if let Some(val) = get("S3_SECRET_ACCESS_KEY") {
            self.storage.secret_access_key = Some(val);
        }
        if let Some(val) = get("S3_BUCKET") {
            self.storage.bucket = val;
        }

        if let Some(val) = get("PLACEHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = get("PLACEHUB_PORT") {
            self.server.port = val.trim().parse().map_err(|e| ConfigError::Env {
                var: "PLACEHUB_PORT",
                message: format!("{val:?} is not a port: {e}"),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use placehub_storage::StorageBackendKind;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn empty_file_means_defaults() {
        let config: ServiceConfig = serde_yml::from_str::<Option<ServiceConfig>>("")
            .unwrap()
            .unwrap_or_default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.bucket, "gplaces");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn yaml_sections_are_read() {
        let yaml = r"
server:
  port: 9000
storage:
  backend: memory
  public_url: https://cdn.example.com
logging:
  format: json
upstream:
  request_timeout_secs: 5
";
        let config: ServiceConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackendKind::Memory);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.upstream.request_timeout_secs, 5);
    }

    #[test]
    fn environment_overrides_secrets_and_endpoints() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(env(&[
                ("GPLACES_API_KEY", "g-key"),
                ("SERPER_API_KEY", ""),
                ("S3_ENDPOINT", "https://abc.supabase.co/storage/v1/s3"),
                ("S3_BUCKET", "media"),
                ("PLACEHUB_PORT", "3000"),
            ]))
            .unwrap();

        assert_eq!(config.upstream.google_places.api_key.as_deref(), Some("g-key"));
        assert!(config.upstream.serper.api_key.is_none());
        assert_eq!(config.storage.bucket, "media");
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.storage.location().public_url("a.jpg"),
            "https://abc.supabase.co/storage/v1/object/public/media/a.jpg"
        );
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = ServiceConfig::default();
        let err = config
            .apply_overrides(env(&[("PLACEHUB_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PLACEHUB_PORT", .. }));
    }

    #[test]
    fn file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placehub-config.yaml");
        std::fs::write(&path, "server:\n  host: 127.0.0.1\n").unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");

        let missing = ServiceConfig::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(missing.server.port, ServerConfig::default().port);
    }
}
