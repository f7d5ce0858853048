//! Test helpers module
//!
//! Shared setup for the locale store integration tests: tracing
//! initialization, store construction and a recording observer.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use fx_sync_i18n::state::{MemoryStorage, StoreOptions};
use fx_sync_i18n::{LocaleChange, LocaleStorage, LocaleStore, TranslationTable};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Build a store with the built-in dictionary on the given storage
pub fn new_store(storage: Arc<dyn LocaleStorage>) -> LocaleStore {
    init_test_env();
    LocaleStore::new(TranslationTable::builtin(), storage, StoreOptions::default())
}

/// Build a store on fresh in-memory storage, returning both
pub fn memory_store() -> (LocaleStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let store = new_store(storage.clone());
    (store, storage)
}

/// Observer that records every change it receives
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<LocaleChange>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closure suitable for `LocaleStore::subscribe`
    pub fn observer(&self) -> impl Fn(&LocaleChange) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |change: &LocaleChange| events.lock().unwrap().push(change.clone())
    }

    pub fn events(&self) -> Vec<LocaleChange> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}
