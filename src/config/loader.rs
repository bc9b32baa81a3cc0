//! Configuration loader for median
//!
//! [`ConfigLoader`] assembles [`Settings`] from TOML files and environment
//! variables with a fixed precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "MEDIAN_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "MEDIAN_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for nested overrides, e.g. `MEDIAN_SERVER__HOST`
const ENV_PREFIX: &str = "MEDIAN";

const ENV_SEPARATOR: &str = "__";

/// Conventional connection string variable
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Conventional listen port variable
pub const PORT_ENV: &str = "PORT";

/// Loads configuration with the following precedence (lowest first):
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `MEDIAN_*` environment variables
/// 5. `DATABASE_URL` and `PORT`
///
/// When a single configuration file is given, steps 1-3 are replaced by
/// that file, which must exist.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `MEDIAN_CONFIG_DIR`, `MEDIAN_CONFIG_FILE` and
    /// `MEDIAN_APP_ENV`.
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Loads only the given file instead of the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Loads settings from all sources.
    ///
    /// The result is not validated: callers apply CLI overrides first and
    /// then call [`Settings::validate`].
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match self.config_file {
            Some(ref config_file) => add_file_source(Config::builder(), config_file, true)?,
            None => self.build_layered_config(Config::builder())?,
        };

        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let builder = add_conventional_overrides(builder)?;

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), false)?;
        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_path, false)?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    let path_str = path.to_str().ok_or_else(|| {
        ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
    })?;

    Ok(builder.add_source(File::new(path_str, FileFormat::Toml).required(required)))
}

/// Applies `DATABASE_URL` and `PORT`, which win over every file and
/// `MEDIAN_*` variable.
fn add_conventional_overrides(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let database_url = std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.is_empty());

    let port = match std::env::var(PORT_ENV) {
        Ok(raw) if !raw.is_empty() => Some(raw.parse::<u16>().map_err(|_| {
            ConfigError::EnvVarError(format!(
                "PORT must be a number between 1 and 65535, got '{}'",
                raw
            ))
        })?),
        _ => None,
    };

    let builder = builder.set_override_option("database.url", database_url)?;
    let builder = builder.set_override_option("server.port", port.map(i64::from))?;
    Ok(builder)
}
