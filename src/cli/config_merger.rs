//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Environment, Settings};

/// Log level forced on `smoke` unless `--verbose` or `--quiet` is given
const SMOKE_LOG_LEVEL: &str = "warn";

/// Applies CLI overrides on top of file and environment configuration.
///
/// CLI arguments have the highest priority; the merged result is validated
/// before it is handed out.
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base configuration selected by `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if a file cannot be read or deserialized
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new();

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }

        let settings = loader.load()?;
        Ok(Self::new(settings, loader.environment()))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// A command's `--log-level` wins over the global `--verbose`/`--quiet`.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        match &cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                ..
            }) => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                if let Some(level) = log_level {
                    config.logger.level = level.as_str().to_string();
                }
            }
            // The smoke report owns stdout; only warnings may share it
            Some(Commands::Smoke) if !cli.verbose && !cli.quiet => {
                config.logger.level = SMOKE_LOG_LEVEL.to_string();
            }
            _ => {}
        }

        config.validate()?;

        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/median".to_string();
        ConfigurationMerger::new(config, Environment::Test)
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli)
    }

    #[test]
    fn test_merge_without_overrides_keeps_base() {
        let merged = merge(&["median"]).unwrap();
        assert_eq!(&merged, merger().config());
    }

    #[test]
    fn test_merge_verbose_and_quiet_flags() {
        assert_eq!(merge(&["median", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["median", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_serve_host_and_port() {
        let merged = merge(&["median", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["median", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_smoke_lowers_log_level() {
        let mut base = Settings::default();
        base.database.url = "postgres://localhost/median".to_string();
        base.logger.level = "debug".to_string();
        let merger = ConfigurationMerger::new(base, Environment::Development);
        let merge = |args: &[&str]| {
            let cli = Cli::try_parse_from(args).unwrap();
            merger.merge_cli_args(&cli).unwrap().logger.level
        };

        assert_eq!(merge(&["median", "smoke"]), "warn");
        assert_eq!(merge(&["median", "--verbose", "smoke"]), "debug");
        assert_eq!(merge(&["median", "--quiet", "smoke"]), "error");
        assert_eq!(merge(&["median", "serve"]), "debug");
    }

    #[test]
    fn test_merge_validates_result() {
        let cli = Cli::try_parse_from(["median", "smoke"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default(), Environment::Development);

        match merger.merge_cli_args(&cli) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected database.url validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_environment_is_reported() {
        assert_eq!(merger().environment(), Environment::Test);
    }
}
