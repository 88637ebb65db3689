//! In-process change notification for the location store.
//!
//! Subscribers are plain callbacks invoked synchronously with a snapshot of
//! every location after each successful change. A panicking subscriber is
//! logged and skipped; it never reaches the caller that triggered the change
//! and never stops the remaining subscribers from running.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use stockroom_domain::location::Location;

/// Callback invoked with the full list of locations after every change.
pub type Callback = Arc<dyn Fn(&[Location]) + Send + Sync>;

/// Identifies one registration within a [`SubscriberRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

struct Entry {
    id: SubscriptionId,
    callback: Callback,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Ordered list of change subscribers.
#[derive(Default)]
pub struct SubscriberRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl SubscriberRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. The returned [`Subscription`] removes exactly this
    /// registration, even if the same callback was registered more than once.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Location]) + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.entries.push(Entry { id, callback });
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Remove a registration. Returns `false` if it was already gone or
    /// belongs to another registry.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        if !std::ptr::eq(subscription.registry.as_ptr(), Arc::as_ptr(&self.inner)) {
            return false;
        }
        remove(&self.inner, subscription.id)
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every current subscriber once with `snapshot`.
    ///
    /// The list is copied before any callback runs, so callbacks may subscribe
    /// or unsubscribe without deadlocking; such changes apply from the next
    /// notification on.
    pub fn notify(&self, snapshot: &[Location]) {
        let callbacks: Vec<(SubscriptionId, Callback)> = self
            .lock()
            .entries
            .iter()
            .map(|entry| (entry.id, Arc::clone(&entry.callback)))
            .collect();

        tracing::debug!(
            subscribers = callbacks.len(),
            locations = snapshot.len(),
            "notifying subscribers"
        );

        for (id, callback) in callbacks {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(snapshot))) {
                tracing::error!(
                    subscription = %id,
                    panic = panic_message(payload.as_ref()),
                    "subscriber panicked during notification"
                );
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle to one registration, returned by [`SubscriberRegistry::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Remove this registration. Calling it again, or after the registry was
    /// cleared or dropped, does nothing.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.registry.upgrade() {
            remove(&inner, self.id);
        }
    }
}

fn remove(inner: &Mutex<Inner>, id: SubscriptionId) -> bool {
    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
    let before = inner.entries.len();
    inner.entries.retain(|entry| entry.id != id);
    inner.entries.len() != before
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (
        Arc<AtomicUsize>,
        impl Fn(&[Location]) + Clone + Send + Sync + 'static,
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let callback = move |_: &[Location]| {
            seen.fetch_add(1, Ordering::SeqCst);
        };
        (calls, callback)
    }

    #[test]
    fn should_invoke_every_subscriber_once() {
        let registry = SubscriberRegistry::new();
        let (first, cb1) = counting();
        let (second, cb2) = counting();
        registry.subscribe(cb1);
        registry.subscribe(cb2);

        registry.notify(&[]);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_keep_notifying_when_a_subscriber_panics() {
        let registry = SubscriberRegistry::new();
        let (first, cb1) = counting();
        let (third, cb3) = counting();
        registry.subscribe(cb1);
        registry.subscribe(|_: &[Location]| panic!("subscriber blew up"));
        registry.subscribe(cb3);

        registry.notify(&[]);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_remove_only_the_bound_registration() {
        let registry = SubscriberRegistry::new();
        let (calls, callback) = counting();
        let first = registry.subscribe(callback.clone());
        let _second = registry.subscribe(callback);

        first.unsubscribe();
        registry.notify(&[]);

        assert_eq!(registry.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_ignore_repeated_unsubscribe() {
        let registry = SubscriberRegistry::new();
        let (_, callback) = counting();
        let subscription = registry.subscribe(callback);

        assert!(registry.unsubscribe(&subscription));
        assert!(!registry.unsubscribe(&subscription));
        subscription.unsubscribe();
        assert!(registry.is_empty());
    }

    #[test]
    fn should_not_remove_entries_of_another_registry() {
        let ours = SubscriberRegistry::new();
        let theirs = SubscriberRegistry::new();
        let (_, cb1) = counting();
        let (_, cb2) = counting();
        ours.subscribe(cb1);
        let foreign = theirs.subscribe(cb2);

        assert!(!ours.unsubscribe(&foreign));
        assert_eq!(ours.len(), 1);
    }

    #[test]
    fn should_allow_unsubscribe_from_inside_a_callback() {
        let registry = SubscriberRegistry::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let handle = Arc::clone(&slot);
        let subscription = registry.subscribe(move |_: &[Location]| {
            if let Some(sub) = handle.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });
        *slot.lock().unwrap() = Some(subscription);

        registry.notify(&[]);

        assert!(registry.is_empty());
    }
}
