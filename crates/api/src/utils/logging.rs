use std::time::Duration;

use talentfolio_domain::{LoggingConfig, PortalError};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level` when set. Calling this twice is
/// harmless: the second install fails and is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if installed.is_ok() {
        info!(level = %config.level, json = config.json, "tracing initialized");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"profile::fetch_profile"`.
/// Callers must avoid forwarding user input in it.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&'static str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        let error_type = error_type.unwrap_or("unknown");
        warn!(command, duration_ms, error_type, "command_execution_failure");
    }
}

/// Convert a `PortalError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &PortalError) -> &'static str {
    match error {
        PortalError::Api(_) => "api",
        PortalError::Transport(_) => "transport",
        PortalError::RateLimited { .. } => "rate_limited",
        PortalError::Validation(_) => "validation",
        PortalError::CoolingDown { .. } => "cooling_down",
        PortalError::InvalidState(_) => "invalid_state",
        PortalError::Config(_) => "config",
        PortalError::Internal(_) => "internal",
    }
}
