//! Core domain entities.
//!
//! - [`ShortLink`] - A stored code/alias to URL mapping
//! - [`NewShortLink`] - Input for creating a record
//! - [`LinkStatus`] - Expiry lifecycle state

pub mod link;

pub use link::{LinkStatus, NewShortLink, ShortLink};
