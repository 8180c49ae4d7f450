//! Persistence adapters. SQLite-backed task store.

pub mod sqlite_store;

pub use sqlite_store::SqliteTaskStore;
