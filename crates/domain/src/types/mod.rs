//! Domain types and models
//!
//! Field names follow the backend's JSON contract; Rust-side names differ only
//! where the wire name is not a valid or idiomatic identifier (`_id`, `CGPA`).

pub mod auth;
pub mod dates;
pub mod experience;
pub mod media;
pub mod user;

pub use auth::*;
pub use dates::{WorkEnd, YearMonth, YearMonthError};
pub use experience::*;
pub use media::*;
pub use user::*;
use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
