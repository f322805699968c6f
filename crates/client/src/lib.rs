//! Pomade client SDK.
//!
//! This crate is the state layer between a storefront UI and the Pomade
//! marketplace REST backend: credential lifecycle, a single HTTP choke
//! point, session derivation, role-based route guarding, and a
//! server-authoritative cart mirror.
//!
//! # Architecture
//!
//! - The backend owns all state; the client holds caches that are replaced
//!   wholesale from server responses, never merged optimistically.
//! - The bearer credential lives in one injectable [`token::TokenStore`];
//!   every component re-reads it rather than caching it.
//! - Credential, session, and cart changes are observable through
//!   `tokio::sync::watch` channels.
//!
//! # Example
//!
//! ```rust,ignore
//! use pomade_client::{api::auth::AuthApi, cart::CartSynchronizer};
//! use pomade_client::{config::ClientConfig, gateway::ApiGateway};
//! use pomade_client::{session::SessionManager, token::{Credential, TokenStore}};
//!
//! let config = ClientConfig::from_env()?;
//! let tokens = TokenStore::new();
//! let gateway = ApiGateway::new(&config, tokens.clone());
//! let session = SessionManager::new(gateway.clone(), tokens.clone());
//! let cart = CartSynchronizer::new(gateway.clone());
//!
//! let auth = AuthApi::new(gateway.clone());
//! let response = auth.login(&"buyer@salon.example".parse()?, "hunter2").await?;
//! session.login(Credential::new(response.token)).await;
//! let cart_state = cart.refresh().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod session;
pub mod token;
