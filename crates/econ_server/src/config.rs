//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use econ_estimation::EstimationConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default cap on Monte Carlo trials per request
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

const ENV_HOST: &str = "ECON_SERVER_HOST";
const ENV_PORT: &str = "ECON_SERVER_PORT";
const ENV_LOG_LEVEL: &str = "ECON_LOG_LEVEL";
const ENV_ENVIRONMENT: &str = "ECON_ENV";
const ENV_SHUTDOWN_TIMEOUT: &str = "ECON_SHUTDOWN_TIMEOUT_SECS";
const ENV_MC_MAX_ITERATIONS: &str = "ECON_MC_MAX_ITERATIONS";
const ENV_MC_SEED: &str = "ECON_MC_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Invalid estimation settings: {0}")]
    InvalidEstimation(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Deployment environment; production disables the open CORS policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    /// Full lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Accepted abbreviation
    fn short_name(&self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Staging => "stage",
            Environment::Production => "prod",
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == wanted || env.short_name() == wanted)
            .ok_or_else(|| ConfigError::InvalidEnvironment(s.to_string()))
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Environment (development, staging, production)
    pub environment: Environment,
    /// Shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
    /// Largest `iterations` a Monte Carlo request may ask for
    pub monte_carlo_max_iterations: usize,
    /// Seed used when a Monte Carlo request does not carry one
    pub monte_carlo_seed: Option<u64>,
    /// Estimator calibration, the `[estimation]` table
    pub estimation: EstimationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            shutdown_timeout_secs: 30,
            monte_carlo_max_iterations: DEFAULT_MAX_ITERATIONS,
            monte_carlo_seed: None,
            estimation: EstimationConfig::default(),
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite the fields whose `ECON_*` variable is set.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var(ENV_HOST) {
            self.host = host;
        }

        if let Ok(port) = std::env::var(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        if let Ok(log_level) = std::env::var(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(env) = std::env::var(ENV_ENVIRONMENT) {
            self.environment = Environment::from_str(&env)?;
        }

        if let Ok(timeout) = std::env::var(ENV_SHUTDOWN_TIMEOUT) {
            self.shutdown_timeout_secs = parse_env(ENV_SHUTDOWN_TIMEOUT, &timeout)?;
        }

        if let Ok(max) = std::env::var(ENV_MC_MAX_ITERATIONS) {
            self.monte_carlo_max_iterations = parse_env(ENV_MC_MAX_ITERATIONS, &max)?;
        }

        if let Ok(seed) = std::env::var(ENV_MC_SEED) {
            self.monte_carlo_seed = Some(parse_env(ENV_MC_SEED, &seed)?);
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        if self.monte_carlo_max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                name: "monte_carlo_max_iterations",
                value: "0".to_string(),
            });
        }

        self.estimation
            .validate()
            .map_err(|e| ConfigError::InvalidEstimation(e.to_string()))
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            if let Ok(level) = LogLevel::from_str(log_level) {
                self.log_level = level;
            }
        }
        if let Some(max) = cli.monte_carlo_max_iterations {
            self.monte_carlo_max_iterations = max;
        }
        if let Some(seed) = cli.monte_carlo_seed {
            self.monte_carlo_seed = Some(seed);
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Monte Carlo iteration cap override
    pub monte_carlo_max_iterations: Option<usize>,
    /// Monte Carlo default seed override
    pub monte_carlo_seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli);

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cap_simulations_at_one_million() {
        let config = ServerConfig::new();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.log_level, LogLevel::default());
        assert_eq!(config.environment, Environment::default());
        assert_eq!(config.monte_carlo_max_iterations, 1_000_000);
        assert_eq!(config.monte_carlo_seed, None);
        assert_eq!(config.estimation, EstimationConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn level_and_environment_names_round_trip() {
        for (input, level) in [
            ("TRACE", LogLevel::Trace),
            (" debug ", LogLevel::Debug),
            ("Info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let parsed: LogLevel = input.parse().unwrap();
            assert_eq!(parsed, level);
            assert_eq!(parsed.to_string(), input.trim().to_ascii_lowercase());
        }
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(ConfigError::InvalidLogLevel(v)) if v == "verbose"
        ));

        for (input, env) in [
            ("dev", Environment::Development),
            ("Stage", Environment::Staging),
            ("production", Environment::Production),
        ] {
            assert_eq!(input.parse::<Environment>().unwrap(), env);
        }
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn validation_rejects_unusable_settings() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(zero_port.validate(), Err(ConfigError::InvalidPort(_))));

        let zero_cap = ServerConfig {
            monte_carlo_max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_cap.validate(),
            Err(ConfigError::InvalidValue { name: "monte_carlo_max_iterations", .. })
        ));

        let mut inverted_band = ServerConfig::default();
        inverted_band.estimation.function_points.low_hours_per_fp = 30.0;
        assert!(matches!(
            inverted_band.validate(),
            Err(ConfigError::InvalidEstimation(_))
        ));

        let mut over_trimmed = ServerConfig::default();
        over_trimmed.estimation.delphi.trim_fraction = 0.6;
        assert!(matches!(
            over_trimmed.validate(),
            Err(ConfigError::InvalidEstimation(_))
        ));
    }

    #[test]
    fn cli_overrides_win_and_bad_level_is_ignored() {
        let mut config = ServerConfig::default();
        config.merge_with_cli(&CliArgs {
            host: Some("10.0.0.5".to_string()),
            port: Some(9400),
            log_level: Some("chatty".to_string()),
            monte_carlo_max_iterations: Some(5_000),
            monte_carlo_seed: Some(7),
            config_file: None,
        });

        assert_eq!(config.socket_addr(), "10.0.0.5:9400");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.monte_carlo_max_iterations, 5_000);
        assert_eq!(config.monte_carlo_seed, Some(7));
    }

    #[test]
    fn toml_with_estimation_table() {
        let config = ServerConfig::from_toml_str(
            r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            environment = "prod"
            monte_carlo_max_iterations = 250000
            monte_carlo_seed = 42

            [estimation.function_points]
            hours_per_fp = 10.0
            hours_per_person_month = 160.0

            [estimation.regression]
            intercept = 2.0
            slope = 0.5

            [estimation.delphi]
            trim_fraction = 0.2
        "#,
        )
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.environment.is_production());
        assert_eq!(config.monte_carlo_max_iterations, 250_000);
        assert_eq!(config.monte_carlo_seed, Some(42));
        let fp = config.estimation.function_points;
        assert_eq!((fp.hours_per_fp, fp.hours_per_person_month), (10.0, 160.0));
        // The productivity band keeps its defaults
        assert_eq!((fp.low_hours_per_fp, fp.high_hours_per_fp), (8.0, 20.0));
        assert_eq!(config.estimation.regression.slope, 0.5);
        assert_eq!(config.estimation.delphi.trim_fraction, 0.2);
    }

    #[test]
    fn toml_keeps_defaults_for_missing_keys() {
        let config = ServerConfig::from_toml_str("monte_carlo_seed = 3").unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.monte_carlo_seed, Some(3));
        assert_eq!(config.monte_carlo_max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn toml_rejects_unknown_log_level() {
        let err = ServerConfig::from_toml_str(r#"log_level = "loud""#).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn env_values_name_their_variable() {
        let err = parse_env::<u64>(ENV_MC_SEED, "abc").unwrap_err();
        assert!(err.to_string().contains("ECON_MC_SEED"));
        assert_eq!(parse_env::<usize>(ENV_MC_MAX_ITERATIONS, " 10 ").unwrap(), 10);
    }

    #[test]
    fn build_without_sources_gives_defaults() {
        for name in [
            ENV_HOST,
            ENV_PORT,
            ENV_LOG_LEVEL,
            ENV_ENVIRONMENT,
            ENV_SHUTDOWN_TIMEOUT,
            ENV_MC_MAX_ITERATIONS,
            ENV_MC_SEED,
        ] {
            std::env::remove_var(name);
        }

        let config = build_config(&CliArgs::default()).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.monte_carlo_max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
