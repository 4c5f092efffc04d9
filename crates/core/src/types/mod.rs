//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod pagination;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{discount_percent, discounted_price, format_price, original_price};
pub use pagination::{Page, PageQuery};
pub use status::*;
