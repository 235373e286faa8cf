//! Configuration for the dashboard process.
//!
//! Defaults come from the deployment environment named by `CLIENTDESK_ENV`.
//! A TOML file named by `CLIENTDESK_CONFIG` may override them, and
//! `CLIENTDESK_LOG` overrides the log filter last.
//!
//! # Example
//!
//! ```no_run
//! use clientdesk_dashboard::config::DashboardConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::from_env()?;
//! println!("Showing {} recent projects", config.recent_projects);
//! # Ok(())
//! # }
//! ```

use crate::types::AppState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Selects the deployment environment
pub const ENV_VAR: &str = "CLIENTDESK_ENV";
/// Path of an optional TOML configuration file
pub const CONFIG_FILE_VAR: &str = "CLIENTDESK_CONFIG";
/// Overrides the log filter
pub const LOG_VAR: &str = "CLIENTDESK_LOG";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown environment name
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    /// The configuration file could not be read
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Pre-production
    Staging,
    /// Production
    Production,
}

impl Environment {
    /// Log filter used when none is configured
    #[must_use]
    pub const fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Staging => "info",
            Self::Production => "warn",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "stage" | "staging" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Data the store starts with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// The fixed demo data ([`AppState::seed`])
    #[default]
    Demo,
    /// No records at all
    Empty,
}

impl SeedMode {
    /// Builds the initial state for this mode
    #[must_use]
    pub fn initial_state(self) -> AppState {
        match self {
            Self::Demo => AppState::seed(),
            Self::Empty => AppState::new(),
        }
    }
}

/// Dashboard process configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Deployment environment
    pub environment: Environment,
    /// `tracing` filter directive, e.g. `info,clientdesk_runtime=debug`
    pub log_filter: String,
    /// Initial data
    pub seed: SeedMode,
    /// Number of projects in the dashboard's recent list
    pub recent_projects: usize,
    /// Install the Prometheus recorder and print the rendered metrics on exit
    pub metrics: bool,
}

/// Keys a configuration file may set; anything absent keeps its default
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_filter: Option<String>,
    seed: Option<SeedMode>,
    recent_projects: Option<usize>,
    metrics: Option<bool>,
}

impl DashboardConfig {
    /// Defaults for an environment
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            log_filter: environment.default_log_filter().to_string(),
            seed: SeedMode::Demo,
            recent_projects: 5,
            metrics: false,
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value, the configuration
    /// file cannot be read or parsed, or the result fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration reading variables through `lookup`
    ///
    /// # Errors
    ///
    /// Same as [`DashboardConfig::from_env`]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup(ENV_VAR)
            .map(|value| value.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let mut config = Self::for_environment(environment);

        if let Some(path) = lookup(CONFIG_FILE_VAR) {
            config.apply_file(&Self::read_file(Path::new(&path))?)?;
        }

        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load defaults for `environment` overridden by a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or the result fails
    /// validation
    pub fn from_file(environment: Environment, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = Self::read_file(path.as_ref())?;
        Self::from_toml_str(environment, &contents)
    }

    /// Load defaults for `environment` overridden by TOML text
    ///
    /// # Errors
    ///
    /// Returns error if the text is not valid for this schema or the result
    /// fails validation
    pub fn from_toml_str(environment: Environment, contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::for_environment(environment);
        config.apply_file(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<String, ConfigError> {
        std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_file(&mut self, contents: &str) -> Result<(), ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;

        if let Some(log_filter) = file.log_filter {
            self.log_filter = log_filter;
        }
        if let Some(seed) = file.seed {
            self.seed = seed;
        }
        if let Some(recent_projects) = file.recent_projects {
            self.recent_projects = recent_projects;
        }
        if let Some(metrics) = file.metrics {
            self.metrics = metrics;
        }
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_projects == 0 {
            return Err(ConfigError::Validation(
                "recent_projects must be > 0".to_string(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation("log_filter cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Set the initial data
    #[must_use]
    pub const fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    /// Set the size of the recent projects list
    #[must_use]
    pub const fn with_recent_projects(mut self, recent_projects: usize) -> Self {
        self.recent_projects = recent_projects;
        self
    }

    /// Set the log filter
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Enable or disable the metrics recorder
    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!(matches!(
            "qa".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment(name)) if name == "qa"
        ));
    }

    #[test]
    fn defaults_follow_environment() {
        let config = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.recent_projects, 5);
        assert_eq!(config.seed, SeedMode::Demo);

        let config =
            DashboardConfig::from_lookup(lookup_from(&[(ENV_VAR, "production")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn log_variable_overrides_filter() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_VAR, "staging"),
            (LOG_VAR, "clientdesk_runtime=trace"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "clientdesk_runtime=trace");
    }

    #[test]
    fn invalid_environment_variable_is_rejected() {
        let result = DashboardConfig::from_lookup(lookup_from(&[(ENV_VAR, "moon")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvironment(_))));
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let result = DashboardConfig::from_lookup(lookup_from(&[(
            CONFIG_FILE_VAR,
            "/nonexistent/clientdesk.toml",
        )]));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/clientdesk.toml"));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let result = DashboardConfig::from_file(Environment::Production, "/nonexistent/desk.toml");
        assert!(matches!(result, Err(ConfigError::Read { path, .. }) if path.ends_with("desk.toml")));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = DashboardConfig::from_toml_str(
            Environment::Staging,
            r#"
                seed = "empty"
                recent_projects = 10
                metrics = true
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.seed, SeedMode::Empty);
        assert_eq!(config.recent_projects, 10);
        assert!(config.metrics);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let result = DashboardConfig::from_toml_str(Environment::Development, "colour = \"red\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn toml_values_are_validated() {
        let result = DashboardConfig::from_toml_str(Environment::Development, "recent_projects = 0");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_blank_filter() {
        let config = DashboardConfig::default().with_log_filter("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn builders_set_fields() {
        let config = DashboardConfig::default()
            .with_seed(SeedMode::Empty)
            .with_recent_projects(3)
            .with_metrics(true);
        assert_eq!(config.seed, SeedMode::Empty);
        assert_eq!(config.recent_projects, 3);
        assert!(config.metrics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn seed_modes_build_initial_state() {
        assert_eq!(SeedMode::Demo.initial_state(), AppState::seed());
        assert_eq!(SeedMode::Empty.initial_state(), AppState::new());
    }
}
