use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Noisy dependency targets capped regardless of the base level.
const QUIET_TARGETS: &[(&str, &str)] = &[
    ("aws_config", "warn"),
    ("aws_smithy_runtime", "warn"),
    ("hyper_util", "warn"),
    ("sea_orm_migration", "warn"),
    ("sqlx", "warn"),
];

/// Build the filter from `RUST_LOG` when set, otherwise from the configured level.
///
/// # Errors
/// Returns an error when the configured level is not a valid filter directive.
pub fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let mut directives = vec![level.to_owned()];
    directives.extend(QUIET_TARGETS.iter().map(|(target, lvl)| format!("{target}={lvl}")));
    let joined = directives.join(",");
    EnvFilter::try_new(&joined).map_err(|e| anyhow::anyhow!("invalid log filter '{joined}': {e}"))
}

/// Install the global subscriber. Safe to call once per process.
///
/// # Errors
/// Returns an error for an invalid level or if a subscriber is already installed.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_env_filter(&cfg.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }
    Ok(())
}
