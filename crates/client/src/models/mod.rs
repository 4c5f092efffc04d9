//! Domain types exchanged with the backend.
//!
//! JSON keys are camelCase. Identifiers are accepted as either `id` or `_id`.
//! Amounts arrive as JSON numbers and are held as `Decimal`.

pub mod admin;
pub mod catalog;
pub mod content;
pub mod order;
pub mod user;

pub use admin::DashboardStats;
pub use catalog::{Category, Product, ProductInput, ProductQuery, ProductSort};
pub use content::{
    BlogPost, BlogPostInput, ContactForm, ContactMessage, Project, ProjectInput, Service,
    ServiceInput,
};
pub use order::{
    CheckoutItem, CheckoutRequest, Order, OrderItem, ShippingAddress, SubOrder,
};
pub use user::{LoginRequest, RegisterRequest, User};
