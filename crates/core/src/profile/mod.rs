//! Profile state and the editor that writes it

pub mod editor;
pub mod store;

pub use editor::ProfileEditor;
pub use store::{AuthIdentity, ProfileChange, ProfileEvent, ProfileState, ProfileStore};
