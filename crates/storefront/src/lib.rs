//! Laptop marketplace storefront library.
//!
//! Catalog store, query engine, cart aggregator and session gate, all
//! persisted through a pluggable key-value store. Front ends drive
//! everything through [`state::Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod state;

pub use state::Storefront;
