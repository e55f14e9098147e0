//! Commands - the surface a UI shell calls into
//!
//! Every fallible command is timed and logged through
//! [`execute_command`](crate::utils::command_helpers::execute_command).

mod auth;
mod onboarding;
mod profile;
mod referrals;
mod routing;
mod settings;

pub use auth::*;
pub use onboarding::*;
pub use profile::*;
pub use referrals::*;
pub use routing::*;
pub use settings::*;
