//! Observable value container with synchronous change delivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Holds a value behind an `Arc` and tells subscribers every time it is replaced.
///
/// Replacement swaps the whole `Arc` under the write lock, so a reader gets
/// either the old value or the new one. Listeners run on the writer's thread
/// after the lock is released, in subscription order.
pub struct Observable<T> {
    value: RwLock<Arc<T>>,
    listeners: Mutex<Vec<(Subscription, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(Arc::new(initial)),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Current value. Cheap: clones the `Arc`, not the data.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.value.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Replaces the value wholesale and notifies subscribers.
    pub fn set(&self, next: T) {
        let next = Arc::new(next);
        {
            let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
            *slot = Arc::clone(&next);
        }
        self.notify(&next);
    }

    /// Derives the next value from the current one while holding the write lock,
    /// so concurrent updates are applied one after the other instead of
    /// overwriting each other.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
            let next = Arc::new(f(&**slot));
            *slot = Arc::clone(&next);
            next
        };
        self.notify(&next);
    }

    /// Like [`Observable::update`], but `f` may return `None` to leave the value
    /// alone. Subscribers hear only about real changes. Returns whether one happened.
    pub fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let next = {
            let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
            match f(&**slot) {
                Some(next) => {
                    let next = Arc::new(next);
                    *slot = Arc::clone(&next);
                    next
                }
                None => return false,
            }
        };
        self.notify(&next);
        true
    }

    /// Registers a listener called with the new value after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    fn notify(&self, value: &T) {
        // Snapshot so a listener may (un)subscribe without deadlocking
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
