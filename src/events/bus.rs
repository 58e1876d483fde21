//! Publish/subscribe bus for refresh notifications

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::RefreshType;

/// Something that wants to hear about data changes
///
/// Implementors typically ignore kinds they do not display, but must treat
/// [`RefreshType::All`] as matching everything (see [`RefreshType::affects`]).
pub trait RefreshListener: Send + Sync {
    fn on_data_refresh(&self, kind: RefreshType);
}

/// Fans out refresh notifications to subscribed listeners
///
/// Listener identity is the `Arc` allocation: subscribing the same `Arc`
/// twice is a no-op, and unsubscribing requires a clone of that `Arc`.
#[derive(Default)]
pub struct RefreshBus {
    listeners: Mutex<Vec<Arc<dyn RefreshListener>>>,
}

impl RefreshBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; re-registering the same listener does nothing
    pub fn subscribe(&self, listener: Arc<dyn RefreshListener>) {
        let mut listeners = self.lock();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        listeners.push(listener);
        tracing::debug!(count = listeners.len(), "refresh listener subscribed");
    }

    /// Remove a listener; removing an unknown listener does nothing
    pub fn unsubscribe(&self, listener: &Arc<dyn RefreshListener>) {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        if listeners.len() != before {
            tracing::debug!(count = listeners.len(), "refresh listener unsubscribed");
        }
    }

    /// Notify every listener subscribed at the moment of the call
    ///
    /// Delivery is synchronous and in subscription order. The listener list
    /// is copied before delivery and the lock released, so listeners may
    /// subscribe, unsubscribe or publish again from inside the callback.
    /// Such changes take effect from the next publish.
    pub fn publish(&self, kind: RefreshType) {
        let snapshot: Vec<Arc<dyn RefreshListener>> = self.lock().clone();
        tracing::debug!(%kind, listeners = snapshot.len(), "publishing refresh");
        for listener in snapshot {
            listener.on_data_refresh(kind);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_subscribed(&self, listener: &Arc<dyn RefreshListener>) -> bool {
        self.lock().iter().any(|l| same_listener(l, listener))
    }

    // Recovers the list if a listener panicked while it was held.
    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn RefreshListener>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RefreshBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn same_listener(a: &Arc<dyn RefreshListener>, b: &Arc<dyn RefreshListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
