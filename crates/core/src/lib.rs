//! Paperback Core - Shared types library.
//!
//! This crate provides common types used across all Paperback components:
//!
//! - `store` - The storefront core (pricing, cart, checkout, accounts)
//! - `cli` - Command-line shell that drives the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and TRNs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
