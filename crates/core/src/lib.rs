//! Delivery Core - Shared types library.
//!
//! This crate provides the validated value types used across the delivery
//! components:
//! - `server` - Fee quoting, seller and address HTTP API
//! - `cli` - Command-line tools for migrations and one-off quotes
//!
//! # Architecture
//!
//! The core crate contains only types and their parsing rules - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for postal codes, state codes, fees,
//!   emails, CNPJs and entity ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
