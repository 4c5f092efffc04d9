//! Backend resources.
//!
//! Each submodule adds methods to [`ApiClient`](crate::ApiClient) for one
//! collection under `/api`. Public storefront reads use [`Auth::None`];
//! customer and back-office calls use [`Auth::Bearer`].
//!
//! [`Auth::None`]: crate::Auth::None
//! [`Auth::Bearer`]: crate::Auth::Bearer

mod admin;
mod auth;
mod blog;
mod contact;
mod orders;
mod products;
mod projects;
mod services;

use serde::{Deserialize, Serialize};
use shopfront_core::PageQuery;

pub use products::featured;

/// Unpaginated list response: `{"data": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
}

/// Page parameters merged with resource-specific filters.
#[derive(Debug, Serialize)]
pub(crate) struct Paged<'a, F: Serialize> {
    #[serde(flatten)]
    pub filter: &'a F,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// Filter type for endpoints that only take page parameters.
#[derive(Debug, Serialize)]
pub(crate) struct NoFilter {}

impl<'a, F: Serialize> Paged<'a, F> {
    pub const fn new(filter: &'a F, page: PageQuery) -> Self {
        Self { filter, page }
    }
}

impl Paged<'static, NoFilter> {
    pub const fn page(page: PageQuery) -> Self {
        Self {
            filter: &NoFilter {},
            page,
        }
    }
}
