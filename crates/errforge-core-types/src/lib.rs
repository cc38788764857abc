//! Core types shared across errforge facilities
//!
//! This crate provides the leaf tables consulted by the factory and the
//! logging facility:
//!
//! - **Schema constants**: Canonical field keys and event names
//! - **Status lookup**: Standard HTTP status codes and their reason phrases

pub mod schema;
pub mod status;

pub use status::{is_known_status, reason_phrase};
