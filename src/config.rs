use serde::Deserialize;

use crate::error::Error;

pub const ENV_PREFIX: &str = "CAMPAIGNER";

/// Server configuration. Read from an optional TOML file, then overridden by
/// `CAMPAIGNER__<SECTION>__<KEY>` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub assembly: AssemblyConfig,
    // drop everything and insert demo customers on startup
    #[serde(default)]
    pub seed: bool,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<AppConfig, Error> {
        let config = ::config::Config::builder()
            .add_source(::config::File::new(path, ::config::FileFormat::Toml).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_backend")]
    pub backend: DatabaseBackend,
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_database_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            backend: default_backend(),
            uri: default_uri(),
            name: default_database_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Any `EnvFilter` directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssemblyConfig {
    /// How many targets are resolved and personalized at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        AssemblyConfig {
            concurrency: default_concurrency(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_backend() -> DatabaseBackend {
    DatabaseBackend::Mongo
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "campaigner".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_concurrency() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("/nonexistent/campaigner.toml").unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.assembly.concurrency, 8);
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join("campaigner-config-test.toml");
        fs::write(
            &path,
            "seed = true\n\n[database]\nbackend = \"memory\"\n\n[assembly]\nconcurrency = 2\n",
        )
        .unwrap();

        let config = AppConfig::load(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(config.seed);
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.database.name, "campaigner");
        assert_eq!(config.assembly.concurrency, 2);
    }
}
