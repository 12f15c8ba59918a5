//! Layered server configuration.
//!
//! Sources are merged in order, later ones winning:
//! 1) built-in defaults, 2) YAML file (`--config`), 3) environment (`APP__*`),
//! 4) CLI overrides.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tokens_auth::AuthConfig;
use tokens_store::StoreConfig;

/// Prefix of environment overrides; nested keys are separated by `__`,
/// e.g. `APP__AUTH__JWT_SECRET`.
pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Requests running longer are answered with 408.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8087)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON when stdout is not a terminal, text otherwise.
    #[default]
    Auto,
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and `APP__*` variables.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or the merged result does
    /// not match the schema. A missing `auth.jwt_secret` is caught by
    /// [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::default("server", ServerConfig::default()))
            .merge(Serialized::default("store", StoreConfig::default()))
            .merge(Serialized::default("logging", LoggingConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// `--port` replaces the port of `server.bind_addr`; each `-v` raises the
    /// log level (info, debug, trace).
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.bind_addr.set_port(port);
        }
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    /// Semantic checks that serde cannot express.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        if self.server.request_timeout.is_zero() {
            anyhow::bail!("server.request_timeout must be greater than zero");
        }
        Ok(())
    }

    /// Pretty JSON with the JWT secret redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(path: Option<&str>) -> std::result::Result<AppConfig, figment::Error> {
        AppConfig::load(path.map(Path::new)).map_err(|e| format!("{e:#}").into())
    }

    #[test]
    fn env_secret_alone_is_enough() {
        Jail::expect_with(|jail| {
            jail.set_env("APP__AUTH__JWT_SECRET", SECRET);
            let cfg = load(None)?;

            assert_eq!(cfg.server, ServerConfig::default());
            assert_eq!(cfg.store, StoreConfig::default());
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.logging.format, LogFormat::Auto);
            assert_eq!(cfg.auth.issuer, "design-tokens");
            assert!(cfg.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_then_cli() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "app.yaml",
                r#"
server:
  bind_addr: "0.0.0.0:9000"
  request_timeout: "5s"
auth:
  jwt_secret: "0123456789abcdef0123456789abcdef"
  token_ttl: "1h"
logging:
  format: json
"#,
            )?;
            jail.set_env("APP__LOGGING__LEVEL", "warn");

            let mut cfg = load(Some("app.yaml"))?;
            assert_eq!(cfg.server.bind_addr.port(), 9000);
            assert_eq!(cfg.server.request_timeout, Duration::from_secs(5));
            assert_eq!(cfg.auth.token_ttl, Duration::from_secs(3600));
            assert_eq!(cfg.logging.level, "warn");
            assert_eq!(cfg.logging.format, LogFormat::Json);

            cfg.apply_cli_overrides(Some(7000), 2);
            assert_eq!(cfg.server.bind_addr.to_string(), "0.0.0.0:7000");
            assert_eq!(cfg.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn missing_secret_loads_but_fails_validation() {
        Jail::expect_with(|_| {
            let cfg = load(None)?;
            assert!(cfg.auth.jwt_secret.is_empty());

            let err = cfg.validate().unwrap_err();
            assert_eq!(err.to_string(), "auth.jwt_secret must not be empty");
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("app.yaml", "server:\n  bind_address: \"0.0.0.0:1\"\n")?;
            jail.set_env("APP__AUTH__JWT_SECRET", SECRET);
            assert!(load(Some("app.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn short_secret_fails_validation() {
        Jail::expect_with(|jail| {
            jail.set_env("APP__AUTH__JWT_SECRET", "short-secret");
            let err = load(None)?.validate().unwrap_err();
            assert!(err.to_string().contains("at least 32 bytes"), "{err}");
            Ok(())
        });
    }

    #[test]
    fn printed_config_redacts_secret() {
        Jail::expect_with(|jail| {
            jail.set_env("APP__AUTH__JWT_SECRET", SECRET);
            let json = load(None)?.to_pretty_json().unwrap();
            assert!(!json.contains(SECRET));
            assert!(json.contains("[REDACTED]"));
            assert!(json.contains("\"request_timeout\": \"30s\""));
            Ok(())
        });
    }
}
