//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access_event`] - Redirect event model
//! - [`access_worker`] - Asynchronous counter updates
//!
//! # Access Counting Flow
//!
//! 1. Redirect handler resolves a link
//! 2. [`access_event::AccessEvent`] is sent to a bounded channel (dropped if full)
//! 3. [`access_worker::run_access_worker`] applies it with retry
//! 4. Counters are persisted via [`repositories::LinkRepository::record_access`]

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod repositories;
