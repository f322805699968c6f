//! Pomade Core - Shared types library.
//!
//! This crate provides the domain types used across all Pomade components:
//! - `client` - Client SDK for the marketplace REST backend
//! - `cli` - Terminal storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, money amounts, and the wire records
//!   exchanged with the marketplace backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
