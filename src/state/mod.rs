//! State management module
//!
//! This module holds the locale store, its durable storage and the
//! observers notified on every locale change.

pub mod storage;
pub mod store;
pub mod subscribers;

// Re-export commonly used state components
pub use storage::{LocaleStorage, MemoryStorage, FileStorage, RedisStorage, storage_from_config};
pub use store::{LocaleStore, StoreOptions};
pub use subscribers::{LocaleChange, Subscription};
