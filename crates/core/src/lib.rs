//! Bakery Core - Shared types library.
//!
//! This crate provides common types used across the bakery storefront components:
//! - `cart` - Client-side cart state, persistence and display summaries
//! - `cli` - Command-line tool for inspecting and editing a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for catalog IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
