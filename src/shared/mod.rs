//! Shared application concerns.

pub mod config;
