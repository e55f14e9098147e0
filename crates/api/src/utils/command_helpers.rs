//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and logging.

use std::time::Instant;

use talentfolio_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn fetch_profile(ctx: &AppContext) -> DomainResult<User> {
///     execute_command("profile::fetch_profile", || async {
///         ctx.store.fetch_user().await?;
///         ctx.store.user().ok_or_else(|| PortalError::InvalidState("no user".into()))
///     })
///     .await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    log_command_execution(
        command_name,
        elapsed,
        result.is_ok(),
        result.as_ref().err().map(error_label),
    );

    result
}

/// Same as [`execute_command`] for synchronous command bodies.
pub fn execute_command_sync<F, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T>,
{
    let start = Instant::now();
    let result = command_fn();
    log_command_execution(
        command_name,
        start.elapsed(),
        result.is_ok(),
        result.as_ref().err().map(error_label),
    );
    result
}
