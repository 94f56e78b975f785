//! tracing subscriber for the operator binary
//!
//! Events go to a rolling file and to stderr. Stdout is reserved for the
//! command output (`transfer` prints its result as JSON there), so no log
//! line can end up interleaved with it.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;

/// Map the `rotation` config value; anything unrecognised never rotates.
pub fn rotation(value: &str) -> Rotation {
    match value {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

/// `log_level` followed by the per-target directives, e.g. `info,sqlx=warn`
pub fn filter_directives(config: &AppConfig) -> String {
    std::iter::once(config.log_level.as_str())
        .chain(config.log_directives.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` wins over the config file.
///
/// Keep the returned guard alive for the life of the process, dropping it
/// flushes and stops the background file writer.
pub fn init_logging(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    let file_appender = RollingFileAppender::builder()
        .rotation(rotation(&config.rotation))
        .filename_prefix(&config.log_file)
        .build(&config.log_dir)
        .with_context(|| format!("cannot open log file in {}", config.log_dir))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(config))
            .context("invalid log_level / log_directives")?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stderr_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        registry.with(file_layer).with(stderr_layer).try_init()?;
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stderr_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(file_layer).with(stderr_layer).try_init()?;
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(log_level: &str, log_directives: &[&str]) -> AppConfig {
        let yaml = format!(
            r#"
log_level: "{log_level}"
log_dir: "./logs"
log_file: "x.log"
use_json: false
rotation: "never"
database:
  url: "postgresql://localhost/bank"
"#
        );
        let mut config = AppConfig::from_yaml(&yaml).unwrap();
        config.log_directives = log_directives.iter().map(|d| d.to_string()).collect();
        config
    }

    #[test]
    fn test_rotation_values() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("daily"), Rotation::DAILY);
        assert_eq!(rotation("never"), Rotation::NEVER);
        assert_eq!(rotation("weekly"), Rotation::NEVER);
    }

    #[test]
    fn test_filter_directives_joined_after_level() {
        let cfg = config("debug", &["sqlx=warn", "hyper=off"]);
        assert_eq!(filter_directives(&cfg), "debug,sqlx=warn,hyper=off");
    }

    #[test]
    fn test_filter_directives_level_only() {
        let cfg = config("info", &[]);
        assert_eq!(filter_directives(&cfg), "info");
    }

    #[test]
    fn test_default_directives_quiet_sqlx_and_parse() {
        let cfg = AppConfig::from_yaml(
            r#"
log_level: "info"
log_dir: "./logs"
log_file: "x.log"
use_json: true
rotation: "daily"
database:
  url: "postgresql://localhost/bank"
"#,
        )
        .unwrap();
        let directives = filter_directives(&cfg);
        assert_eq!(directives, "info,sqlx=warn");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
