use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Port used when neither `PORT` nor `--port` is supplied.
pub const DEFAULT_PORT: u16 = 8080;
/// Base address of the local Ollama runtime.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
/// Model requested from the generation service.
pub const DEFAULT_SUMMARY_MODEL: &str = "llama2";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_SUMMARY_TIMEOUT_SECS: u64 = 60;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
    /// Configuration was installed more than once.
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Runtime configuration for the student records server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds on all interfaces.
    pub server_port: u16,
    /// Base URL of the Ollama instance used for summaries.
    pub ollama_host: String,
    /// Model identifier passed to the generation endpoint.
    pub summary_model: String,
    /// Upper bound for the startup availability probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Upper bound for a single generation request, in seconds.
    pub summary_timeout_secs: u64,
    /// Optional path for the file log layer.
    pub log_file: Option<String>,
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replacement for `PORT`.
    pub port: Option<u16>,
    /// Replacement for `OLLAMA_HOST`.
    pub ollama_host: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: parse_env_or("PORT", DEFAULT_PORT)?,
            ollama_host: load_env_optional("OLLAMA_HOST")
                .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            summary_model: load_env_optional("SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            probe_timeout_secs: parse_env_or(
                "SUMMARY_PROBE_TIMEOUT_SECS",
                DEFAULT_PROBE_TIMEOUT_SECS,
            )?,
            summary_timeout_secs: parse_env_or(
                "SUMMARY_TIMEOUT_SECS",
                DEFAULT_SUMMARY_TIMEOUT_SECS,
            )?,
            log_file: load_env_optional("STUDENTS_LOG_FILE"),
        })
    }

    /// Apply command-line overrides on top of the environment-derived values.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(port) = overrides.port {
            self.server_port = port;
        }
        if let Some(host) = overrides.ollama_host.filter(|host| !host.trim().is_empty()) {
            self.ollama_host = host;
        }
        self
    }

    /// Timeout applied to the one-shot availability probe.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Timeout applied to each generation request.
    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            summary_timeout_secs: DEFAULT_SUMMARY_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
        .map(|value| value.unwrap_or(default))
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment, apply overrides, and install it in the global cache.
pub fn init_config(overrides: Overrides) -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?.with_overrides(overrides);
    tracing::debug!(
        server_port = config.server_port,
        ollama_host = %config.ollama_host,
        summary_model = %config.summary_model,
        "Loaded configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(get_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_environment_values() {
        let config = Config::default().with_overrides(Overrides {
            port: Some(9090),
            ollama_host: Some("http://10.0.0.2:11434".into()),
        });

        assert_eq!(config.server_port, 9090);
        assert_eq!(config.ollama_host, "http://10.0.0.2:11434");
        assert_eq!(config.summary_model, DEFAULT_SUMMARY_MODEL);
    }

    #[test]
    fn blank_host_override_is_ignored() {
        let config = Config::default().with_overrides(Overrides {
            port: None,
            ollama_host: Some("  ".into()),
        });

        assert_eq!(config.server_port, DEFAULT_PORT);
        assert_eq!(config.ollama_host, DEFAULT_OLLAMA_HOST);
    }

    #[test]
    fn default_timeouts_match_probe_and_generation_bounds() {
        let config = Config::default();
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.summary_timeout(), Duration::from_secs(60));
    }
}
