//! Shopfront Client - typed access to the storefront REST API.
//!
//! This crate is everything a storefront or back-office front end needs
//! between its screens and the backend:
//!
//! - [`ApiClient`] - REST wrapper with bearer auth and transparent token refresh
//! - [`CartStore`] - shopping cart mirrored to a [`KeyValueStore`]
//! - [`api`] - one module per backend resource (products, orders, blog, ...)
//! - [`validation`] - client-side form validation
//!
//! # Architecture
//!
//! ```text
//! front end ──► ApiClient ──► reqwest ──► backend (/api/*)
//!     │             │
//!     │             └── SessionStore ──┐
//!     └── CartStore ───────────────────┴──► KeyValueStore (memory / files)
//! ```
//!
//! The backend owns all business rules. The client only shapes state for
//! display and rejects obviously invalid forms before a round trip.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod cache;
pub mod cart;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod storage;
pub mod validation;

pub use auth::{Session, SessionStatus, SessionStore};
pub use cart::{Cart, CartItem, CartStore};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{ApiClient, Auth};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageError};
pub use validation::{ValidationErrors, Validate};
