//! Unauthorized-handler registry
//!
//! The transport fires this registry whenever a request comes back 401. The
//! session module owns it and the profile store's teardown subscribes at
//! startup, so the code that makes requests never has to know about the code
//! that clears state.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, error, warn};

/// Zero-argument async callback run when the session is rejected
pub type UnauthorizedHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Default)]
struct Inner {
    handlers: Mutex<Vec<(u64, UnauthorizedHandler)>>,
    next_id: AtomicU64,
    firing: AtomicBool,
}

/// Ordered list of handlers fired on any 401
#[derive(Clone, Default)]
pub struct UnauthorizedRegistry {
    inner: Arc<Inner>,
}

/// Handle returned by [`UnauthorizedRegistry::register`]
///
/// Dropping the handle keeps the handler registered; call
/// [`Registration::unregister`] to remove it.
#[must_use = "keep the registration to be able to unregister the handler"]
pub struct Registration {
    id: u64,
    registry: Weak<Inner>,
}

impl Registration {
    /// Remove the handler. Safe to call after the registry is gone.
    pub fn unregister(self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.handlers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

impl UnauthorizedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler; it runs after every handler registered before it.
    pub fn register<F, Fut>(&self, handler: F) -> Registration
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let handler: UnauthorizedHandler = Arc::new(move || handler().boxed());
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.handlers.lock().push((id, handler));
        debug!(handler_id = id, "unauthorized handler registered");
        Registration { id, registry: Arc::downgrade(&self.inner) }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.inner.handlers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every handler in registration order, one after another.
    ///
    /// A panicking handler is logged and skipped. A `fire` issued while
    /// handlers are already running (e.g. the logout call inside a handler
    /// also returning 401) is ignored.
    pub async fn fire(&self) {
        if self.inner.firing.swap(true, Ordering::AcqRel) {
            debug!("unauthorized handlers already running; ignoring nested fire");
            return;
        }
        let _firing = FiringGuard(&self.inner.firing);
        warn!("session rejected; running unauthorized handlers");

        let handlers: Vec<(u64, UnauthorizedHandler)> = self.inner.handlers.lock().clone();
        for (id, handler) in handlers {
            let outcome = AssertUnwindSafe(async move { handler().await }).catch_unwind().await;
            if outcome.is_err() {
                error!(handler_id = id, "unauthorized handler panicked");
            }
        }
    }
}

/// Clears the firing flag even when the `fire` future is dropped mid-run.
struct FiringGuard<'a>(&'a AtomicBool);

impl Drop for FiringGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for UnauthorizedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnauthorizedRegistry").field("handlers", &self.len()).finish()
    }
}
