//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP integrations, SQLite, fallback data. Map errors to DomainError.

pub mod calendar;
pub mod persistence;
pub mod ui;
pub mod weather;
