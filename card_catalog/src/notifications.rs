//! Transient user-facing messages that dismiss themselves after a delay.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{Observable, Subscription};
use crate::config::DEFAULT_NOTIFICATION_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

impl NotificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "Notification",
            NotificationLevel::Error => "Error",
        }
    }
}

/// Identifies one notification. Ordered by insertion; the sequence number keeps
/// two pushes in the same millisecond apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationKey {
    seq: u64,
    created_ms: i64,
}

impl fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.created_ms, self.seq)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub key: NotificationKey,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

type Entries = BTreeMap<NotificationKey, Notification>;

/// Queue of notifications keyed by a generated, never-reused key.
///
/// Entries auto-dismiss after `ttl` when pushed from inside a tokio runtime;
/// outside one, call [`NotificationQueue::expire_due`]. Dismissing a key that is
/// already gone is a no-op.
pub struct NotificationQueue {
    entries: Arc<Observable<Entries>>,
    next_seq: AtomicU64,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Observable::default()),
            next_seq: AtomicU64::new(0),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&self, message: impl Into<String>) -> NotificationKey {
        self.push_with_level(NotificationLevel::Info, message)
    }

    pub fn push_error(&self, message: impl Into<String>) -> NotificationKey {
        self.push_with_level(NotificationLevel::Error, message)
    }

    pub fn push_with_level(&self, level: NotificationLevel, message: impl Into<String>) -> NotificationKey {
        let created_at = Utc::now();
        let key = NotificationKey {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            created_ms: created_at.timestamp_millis(),
        };
        let notification = Notification {
            key,
            level,
            message: message.into(),
            created_at,
        };

        match level {
            NotificationLevel::Info => log::info!("{}", notification.message),
            NotificationLevel::Error => log::warn!("{}", notification.message),
        }

        self.entries.update(|prev| {
            let mut next = prev.clone();
            next.insert(key, notification);
            next
        });

        self.schedule_dismiss(key);
        key
    }

    /// Removes one entry. Returns false if it was already gone.
    pub fn dismiss(&self, key: NotificationKey) -> bool {
        remove_entry(&self.entries, key)
    }

    /// Drops every entry older than the ttl as of `now`. Returns how many went.
    pub fn expire_due(&self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let due: Vec<NotificationKey> = self
            .entries
            .get()
            .values()
            .filter(|n| n.created_at.checked_add_signed(ttl).is_some_and(|due| due <= now))
            .map(|n| n.key)
            .collect();

        due.into_iter().filter(|key| self.dismiss(*key)).count()
    }

    /// Current entries in insertion order
    pub fn list(&self) -> Vec<Notification> {
        self.entries.get().values().cloned().collect()
    }

    pub fn contains(&self, key: NotificationKey) -> bool {
        self.entries.get().contains_key(&key)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&BTreeMap<NotificationKey, Notification>) + Send + Sync + 'static,
    {
        self.entries.subscribe(listener)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.entries.unsubscribe(subscription)
    }

    pub fn len(&self) -> usize {
        self.entries.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.get().is_empty()
    }

    fn schedule_dismiss(&self, key: NotificationKey) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if remove_entry(&entries, key) {
                log::debug!("Notification {} expired", key);
            }
        });
    }
}

fn remove_entry(entries: &Observable<Entries>, key: NotificationKey) -> bool {
    entries.update_if(|prev| {
        if !prev.contains_key(&key) {
            return None;
        }
        let mut next = prev.clone();
        next.remove(&key);
        Some(next)
    })
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
