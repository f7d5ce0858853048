//! Locale change observers
//!
//! A registry of callbacks notified after every locale change. Entries are
//! removed through their [`Subscription`] handle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use crate::i18n::Locale;

/// Payload delivered to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleChange {
    /// Locale active after the change
    pub locale: Locale,
    /// Locale active before the change; equal to `locale` on re-selection
    pub previous: Locale,
    /// Revision counter after the change
    pub revision: u64,
    pub changed_at: DateTime<Utc>,
}

impl LocaleChange {
    /// True when the change switched to a different locale
    pub fn is_switch(&self) -> bool {
        self.locale != self.previous
    }
}

type Callback = dyn Fn(&LocaleChange) + Send + Sync;

struct Entry {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Arc<Callback>,
}

type Entries = Mutex<Vec<Entry>>;

/// Observer registry shared between the store and its subscriptions
pub(crate) struct SubscriberList {
    next_id: AtomicU64,
    entries: Arc<Entries>,
}

impl SubscriberList {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));

        lock_entries(&self.entries).push(Entry {
            id,
            active: Arc::clone(&active),
            callback: Arc::new(callback),
        });
        debug!(subscriber_id = id, "Locale observer subscribed");

        Subscription {
            id,
            active,
            entries: Arc::downgrade(&self.entries),
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    /// Call every active observer once. The registry lock is not held while
    /// callbacks run, so they may subscribe, unsubscribe or change the
    /// locale. An observer unsubscribed mid-round is skipped.
    pub(crate) fn notify(&self, change: &LocaleChange) -> usize {
        let snapshot: Vec<(Arc<AtomicBool>, Arc<Callback>)> = lock_entries(&self.entries)
            .iter()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.callback)))
            .collect();

        let mut delivered = 0;
        for (active, callback) in snapshot {
            if active.load(Ordering::SeqCst) {
                callback(change);
                delivered += 1;
            }
        }
        delivered
    }
}

fn lock_entries(entries: &Entries) -> MutexGuard<'_, Vec<Entry>> {
    // Entries stay consistent even if an observer panicked elsewhere.
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by `subscribe`. Dropping it keeps the observer
/// registered; call [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    entries: Weak<Entries>,
}

impl Subscription {
    /// Remove the observer. Safe to call repeatedly and from inside any
    /// observer callback.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }

        if let Some(entries) = self.entries.upgrade() {
            lock_entries(&entries).retain(|entry| entry.id != self.id);
        }
        debug!(subscriber_id = self.id, "Locale observer unsubscribed");
    }

    /// False once unsubscribed
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn change(revision: u64) -> LocaleChange {
        LocaleChange {
            locale: Locale::En,
            previous: Locale::Ja,
            revision,
            changed_at: Utc::now(),
        }
    }

    #[test]
    fn test_notify_all_subscribers() {
        let list = SubscriberList::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let _subs: Vec<Subscription> = (0..3)
            .map(|_| {
                let calls = Arc::clone(&calls);
                list.subscribe(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        assert_eq!(list.notify(&change(1)), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let list = SubscriberList::new();
        let sub = list.subscribe(|_| {});
        assert_eq!(list.len(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(list.len(), 0);
        assert_eq!(list.notify(&change(1)), 0);
    }

    #[test]
    fn test_unsubscribe_other_during_notification() {
        let list = SubscriberList::new();
        let second_calls = Arc::new(AtomicUsize::new(0));
        let second_handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let handle = Arc::clone(&second_handle);
        let _first = list.subscribe(move |_| {
            if let Some(sub) = handle.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });

        let calls = Arc::clone(&second_calls);
        let second = list.subscribe(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        *second_handle.lock().unwrap() = Some(second);

        assert_eq!(list.notify(&change(1)), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_unsubscribe_after_list_dropped() {
        let list = SubscriberList::new();
        let sub = list.subscribe(|_| {});
        drop(list);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn test_is_switch() {
        let mut c = change(1);
        assert!(c.is_switch());
        c.previous = Locale::En;
        assert!(!c.is_switch());
    }
}
