//! Logger built on `tracing-subscriber`
//!
//! - Console output with color control
//! - File output in full, compact or JSON format
//! - Size-based file rotation with retention
//!
//! `RUST_LOG` takes precedence over the configured level when it is set.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};
use writer::RotatingFileWriter;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = build_filter(&config.level);

    // File layer goes first so span fields formatted for the console never
    // carry ANSI codes into the file.
    let file_layer = if config.file.enabled {
        Some(file_layer(&config.file)?)
    } else {
        None
    };

    let console_layer = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_layer<S>(config: &FileConfig) -> Result<Box<dyn Layer<S> + Send + Sync>, LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = RotatingFileWriter::new(config)?;

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn console_only(level: &str) -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig::new(true, false),
            file: FileConfig::default(),
            level: level.to_string(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_both_outputs_disabled_is_rejected() {
        let mut config = console_only("info");
        config.console.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(console_only("loud").validate().is_err());
    }

    #[test]
    fn test_file_config_requires_path_when_enabled() {
        let result = FileConfig::new(
            true,
            PathBuf::new(),
            true,
            LogFormat::Json,
            RotationConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_disabled_file_config_skips_path_check() {
        let result = FileConfig::new(
            false,
            PathBuf::new(),
            true,
            LogFormat::Json,
            RotationConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rotation_config_rejects_zero_values() {
        assert!(RotationConfig::new(0, 3).is_err());
        assert!(RotationConfig::new(1024, 0).is_err());
        assert!(RotationConfig::new(1024, 3).is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert!("pretty".parse::<LogFormat>().is_err());
    }

    proptest! {
        #[test]
        fn prop_log_format_display_parses_back(
            format in prop_oneof![Just(LogFormat::Full), Just(LogFormat::Compact), Just(LogFormat::Json)]
        ) {
            prop_assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }

        #[test]
        fn prop_level_validation_is_case_insensitive(
            level in prop_oneof![Just("trace"), Just("debug"), Just("info"), Just("warn"), Just("error")],
            upper in any::<bool>()
        ) {
            let level = if upper { level.to_uppercase() } else { level.to_string() };
            prop_assert!(console_only(&level).validate().is_ok());
        }
    }
}
