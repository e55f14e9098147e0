//! Navigation port
//!
//! Flows decide where the user goes next; the shell decides how to get there.

use parking_lot::Mutex;

/// Abstract router used by flows and the session-expiry handler
pub trait Navigator: Send + Sync {
    /// Path currently displayed, e.g. `/settings`
    fn current_path(&self) -> String;

    /// Replace the current location with `target` (path plus query)
    fn navigate(&self, target: &str);
}

/// In-memory navigator that records every navigation
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Start at `path`
    pub fn at(path: impl Into<String>) -> Self {
        Self { current: Mutex::new(path.into()), history: Mutex::new(Vec::new()) }
    }

    /// Every target passed to [`Navigator::navigate`], oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// Most recent navigation target
    pub fn last(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().clone()
    }

    fn navigate(&self, target: &str) {
        let path = target.split_once('?').map_or(target, |(path, _)| path);
        *self.current.lock() = path.to_string();
        self.history.lock().push(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_updates_path_without_query() {
        let nav = RecordingNavigator::at("/settings");
        nav.navigate("/signin?session_expired=1");

        assert_eq!(nav.current_path(), "/signin");
        assert_eq!(nav.last().as_deref(), Some("/signin?session_expired=1"));
        assert_eq!(nav.history().len(), 1);
    }
}
