//! Route protection

pub mod guard;

pub use guard::{evaluate, has_session_cookie, is_auth_route, is_protected, GuardDecision};
