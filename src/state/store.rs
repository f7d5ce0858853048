//! Locale store service
//!
//! The single source of truth for the active display locale. It is built
//! once at startup, shared as `Arc<LocaleStore>` with every presentation
//! component, persists the chosen locale and notifies observers after each
//! change.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, Once, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, ThreadId};
use chrono::Utc;
use tracing::{debug, info, warn};
use crate::config::{I18nConfig, Settings};
use crate::i18n::{Locale, TranslationParams, TranslationTable};
use crate::utils::errors::{LocaleError, Result};
use crate::utils::logging;
use super::storage::{storage_from_config, LocaleStorage};
use super::subscribers::{LocaleChange, SubscriberList, Subscription};

/// Behavioural options of a [`LocaleStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Durable storage key holding the locale code
    pub storage_key: String,
    /// Locale adopted when nothing valid is persisted
    pub default_locale: Locale,
    /// Reject unknown codes in [`LocaleStore::set_locale_code`]
    pub strict_locale_validation: bool,
    /// Warn on every key that falls back to itself
    pub log_missing_keys: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&I18nConfig::default())
    }
}

impl From<&I18nConfig> for StoreOptions {
    fn from(config: &I18nConfig) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            default_locale: config.default_locale.parse().unwrap_or(Locale::DEFAULT),
            strict_locale_validation: config.strict_locale_validation,
            log_missing_keys: config.log_missing_keys,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StoreState {
    locale: Locale,
    revision: u64,
}

/// Ownership of the apply-and-notify cycle. One thread at a time owns it;
/// changes made by the owner from inside an observer are queued and
/// delivered after the current round, in revision order.
#[derive(Debug, Default)]
struct Dispatch {
    owner: Option<ThreadId>,
    pending: VecDeque<LocaleChange>,
}

/// Reactive translation store with a persisted locale
pub struct LocaleStore {
    table: TranslationTable,
    storage: Arc<dyn LocaleStorage>,
    options: StoreOptions,
    state: RwLock<StoreState>,
    dispatch: Mutex<Dispatch>,
    dispatch_idle: Condvar,
    init: Once,
    subscribers: SubscriberList,
}

impl LocaleStore {
    /// Create a store. Storage is not read until first access.
    pub fn new(table: TranslationTable, storage: Arc<dyn LocaleStorage>, options: StoreOptions) -> Self {
        let default_locale = options.default_locale;
        Self {
            table,
            storage,
            options,
            state: RwLock::new(StoreState {
                locale: default_locale,
                revision: 0,
            }),
            dispatch: Mutex::new(Dispatch::default()),
            dispatch_idle: Condvar::new(),
            init: Once::new(),
            subscribers: SubscriberList::new(),
        }
    }

    /// Build the store described by the settings: built-in dictionary,
    /// optional overrides directory and the configured storage backend.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let mut table = TranslationTable::builtin();
        if let Some(dir) = &settings.i18n.translations_dir {
            table.load_overrides(dir).await?;
        }

        let storage = storage_from_config(&settings.storage)?;
        let store = Self::new(table, storage, StoreOptions::from(&settings.i18n));

        info!(
            default_locale = %store.options.default_locale,
            storage_key = %store.options.storage_key,
            "Locale store created"
        );
        Ok(store)
    }

    /// Resolve the starting locale from storage, once.
    ///
    /// Later calls return the current locale without touching storage.
    /// Never fails: an unreadable store or an unsupported persisted value
    /// yields the default locale.
    pub fn initialize(&self) -> Locale {
        self.init.call_once(|| {
            let persisted = panic::catch_unwind(AssertUnwindSafe(|| self.load_persisted()))
                .unwrap_or_else(|_| {
                    warn!(key = %self.options.storage_key, "Locale storage panicked on read, using default");
                    None
                });
            let locale = persisted.unwrap_or(self.options.default_locale);
            self.write_state().locale = locale;
            info!(locale = %locale, "Locale store initialized");
        });
        self.read_state().locale
    }

    fn load_persisted(&self) -> Option<Locale> {
        let key = &self.options.storage_key;
        match self.storage.get_item(key) {
            Ok(Some(value)) => match value.parse::<Locale>() {
                Ok(locale) => Some(locale),
                Err(_) => {
                    logging::log_rejected_persisted_value(key, &value);
                    None
                }
            },
            Ok(None) => {
                debug!(key = %key, "No persisted locale");
                None
            }
            Err(e) => {
                logging::log_storage_failure("read", key, &e);
                None
            }
        }
    }

    /// Active locale
    pub fn locale(&self) -> Locale {
        self.initialize();
        self.read_state().locale
    }

    /// Revision counter; bumped by every `set_locale`
    pub fn revision(&self) -> u64 {
        self.initialize();
        self.read_state().revision
    }

    /// Locale and revision read together
    pub fn snapshot(&self) -> (Locale, u64) {
        self.initialize();
        let state = self.read_state();
        (state.locale, state.revision)
    }

    /// Translate a key into the active locale, or return the key itself
    /// when the locale has no entry for it
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(self.locale(), key)
    }

    /// Shorthand for [`LocaleStore::translate`]
    pub fn t(&self, key: &str) -> String {
        self.translate(key)
    }

    /// Translate into an explicit locale without changing the active one
    pub fn translate_in(&self, locale: Locale, key: &str) -> String {
        match self.table.get(locale, key) {
            Some(value) => value.to_string(),
            None => {
                if self.options.log_missing_keys {
                    logging::log_missing_translation(locale, key);
                }
                key.to_string()
            }
        }
    }

    /// Translate and substitute `{name}` placeholders
    pub fn translate_with(&self, key: &str, params: &TranslationParams) -> String {
        TranslationTable::format_message(&self.translate(key), Some(params))
    }

    /// Strict lookup for tooling that wants to see missing keys
    pub fn try_translate(&self, key: &str) -> Result<String> {
        let locale = self.locale();
        self.table
            .get(locale, key)
            .map(str::to_string)
            .ok_or_else(|| LocaleError::MissingTranslation {
                locale: locale.code().to_string(),
                key: key.to_string(),
            })
    }

    /// Switch the active locale.
    ///
    /// Applies the change in memory, bumps the revision, persists
    /// best-effort and notifies observers. Apply and notify form one unit:
    /// a concurrent caller waits until every observer has seen this change,
    /// so observers always receive changes in revision order. Calling this
    /// from inside an observer applies immediately and queues the
    /// notification behind the current round. Re-selecting the active
    /// locale still bumps the revision and notifies.
    pub fn set_locale(&self, locale: Locale) {
        self.initialize();

        let me = thread::current().id();
        let mut dispatch = self
            .dispatch_idle
            .wait_while(self.lock_dispatch(), |d| d.owner.is_some_and(|owner| owner != me))
            .unwrap_or_else(PoisonError::into_inner);
        let nested = dispatch.owner == Some(me);

        let change = {
            let mut state = self.write_state();
            let previous = state.locale;
            state.locale = locale;
            state.revision += 1;

            LocaleChange {
                locale,
                previous,
                revision: state.revision,
                changed_at: Utc::now(),
            }
        };
        dispatch.pending.push_back(change);

        if nested {
            drop(dispatch);
            self.persist(locale);
            return;
        }

        dispatch.owner = Some(me);
        drop(dispatch);
        let _owner = DispatchOwner { store: self };

        self.persist(locale);
        self.drain_pending();
    }

    fn persist(&self, locale: Locale) {
        if let Err(e) = self.storage.set_item(&self.options.storage_key, locale.code()) {
            logging::log_storage_failure("write", &self.options.storage_key, &e);
        }
    }

    /// Deliver queued changes until none are left. Runs on the owning
    /// thread with no lock held while observers execute.
    fn drain_pending(&self) {
        loop {
            let next = self.lock_dispatch().pending.pop_front();
            let Some(change) = next else {
                break;
            };

            logging::log_locale_change(change.previous, change.locale, change.revision);
            let delivered = self.subscribers.notify(&change);
            debug!(revision = change.revision, observers = delivered, "Locale change delivered");
        }
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, Dispatch> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch locale from an untyped code.
    ///
    /// Returns `Ok(true)` when applied. An unsupported code is ignored with
    /// `Ok(false)`, or rejected with [`LocaleError::InvalidLocale`] when
    /// strict validation is enabled.
    pub fn set_locale_code(&self, code: &str) -> Result<bool> {
        match code.parse::<Locale>() {
            Ok(locale) => {
                self.set_locale(locale);
                Ok(true)
            }
            Err(e) if self.options.strict_locale_validation => Err(e),
            Err(_) => {
                warn!(code = code, "Ignoring unsupported locale");
                Ok(false)
            }
        }
    }

    /// Register an observer called after every locale change
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        self.initialize();
        self.subscribers.subscribe(observer)
    }

    /// Number of registered observers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Locales the store can switch to
    pub fn available_locales(&self) -> &'static [Locale] {
        &Locale::ALL
    }

    /// Underlying translation table
    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases dispatch ownership, also when an observer panics
struct DispatchOwner<'a> {
    store: &'a LocaleStore,
}

impl Drop for DispatchOwner<'_> {
    fn drop(&mut self) {
        let mut dispatch = self.store.lock_dispatch();
        dispatch.owner = None;
        dispatch.pending.clear();
        drop(dispatch);
        self.store.dispatch_idle.notify_all();
    }
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("LocaleStore")
            .field("locale", &state.locale)
            .field("revision", &state.revision)
            .field("options", &self.options)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
