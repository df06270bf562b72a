//! Laptop Market Core - Shared types library.
//!
//! This crate provides the domain types used across all Laptop Market components:
//! - `storefront` - Catalog store, query engine, cart aggregator and session gate
//! - `cli` - Command-line front end over the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no logging.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Item and cart records plus newtypes for ids, prices and conditions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
