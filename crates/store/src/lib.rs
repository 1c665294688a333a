//! Paperback storefront core.
//!
//! This crate holds everything with real logic and state in the storefront:
//! the pricing engine, the cart, the checkout flow, account registration,
//! and the login lockout state machine. Page rendering is someone else's
//! job; callers (the CLI shell, or any future web layer) pass raw form
//! input in and render whatever comes back.
//!
//! # Architecture
//!
//! All persistent state lives behind the [`storage::Storage`] trait, a
//! string-keyed JSON store injected into each service. Services borrow the
//! store handle, so a single [`storage::FileStorage`] (or
//! [`storage::MemoryStorage`] in tests) backs the whole application.
//!
//! Operations that depend on the clock take `now` as a parameter; callers
//! pass `Utc::now()`. This keeps the lockout window and the age check
//! testable without a mock clock.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::StoreError;
