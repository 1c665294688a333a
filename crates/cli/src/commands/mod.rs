//! Command implementations.
//!
//! Each command loads what it needs from storage, calls into the store
//! services, and renders the outcome. Rendering stays here; the services
//! only return data and typed errors.

pub mod account;
pub mod shop;
