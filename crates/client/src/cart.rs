//! Shopping cart mirrored to client storage.
//!
//! The cart is an ordered list of lines, at most one per product. Every
//! mutation through [`CartStore`] writes the whole cart to the key-value
//! store under [`CART_KEY`], and [`CartStore::load`] rebuilds it from there.
//!
//! Invariants:
//! - product IDs are unique across lines
//! - every line has a quantity of at least 1; setting a quantity to 0 removes
//!   the line

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::ProductId;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::models::Product;
use crate::storage::{KeyValueStore, StorageError, load_json, save_json};

/// Storage key holding the persisted cart.
pub const CART_KEY: &str = "cart";

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    /// Pre-discount price, shown struck through.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Shape a catalog product into a single-unit cart line.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            original_price: product.original_price(),
            image: product.primary_image().map(str::to_string),
            quantity: 1,
        }
    }

    /// `unit_price × quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Amount saved on this line relative to the original price.
    #[must_use]
    pub fn line_savings(&self) -> Decimal {
        self.original_price
            .filter(|original| *original > self.unit_price)
            .map_or(Decimal::ZERO, |original| {
                original
                    .saturating_sub(self.unit_price)
                    .saturating_mul(Decimal::from(self.quantity))
            })
    }
}

/// The cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    /// Add `quantity` units of `item`.
    ///
    /// If the product is already in the cart its quantity is increased and
    /// the line keeps its place; otherwise a new line is appended. Adding
    /// zero units does nothing.
    pub fn add(&mut self, mut item: CartItem, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            item.quantity = quantity;
            self.items.push(item);
        }
    }

    /// Remove a product's line entirely. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        self.items.len() != before
    }

    /// Take one unit off a line, removing the line with its last unit.
    /// Returns whether the cart changed.
    pub fn decrement(&mut self, product_id: &ProductId) -> bool {
        match self.get(product_id).map(|item| item.quantity) {
            Some(quantity) if quantity > 1 => self.update_quantity(product_id, quantity - 1),
            Some(_) => self.remove(product_id),
            None => false,
        }
    }

    /// Set a line's quantity; zero removes the line. Returns whether the
    /// product was in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };
        if quantity == 0 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// `Σ(unit_price × quantity)`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// `Σ((original_price − unit_price) × quantity)` over discounted lines.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_savings)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Restore the invariants on data read from storage: merge duplicate
    /// products and drop empty lines.
    fn normalized(self) -> Self {
        let mut cart = Self::new();
        for item in self.items {
            let quantity = item.quantity;
            cart.add(item, quantity);
        }
        cart
    }
}

/// A [`Cart`] kept in sync with a [`KeyValueStore`].
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Rebuild the cart from storage.
    ///
    /// Missing or unreadable data yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend itself fails.
    #[instrument(skip(store))]
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let cart = match load_json::<Cart>(store.as_ref(), CART_KEY).await {
            Ok(cart) => cart.unwrap_or_default().normalized(),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Cart::new()
            }
            Err(e) => return Err(e),
        };
        tracing::debug!(lines = cart.line_count(), "Cart loaded");

        Ok(Self {
            store,
            cart: Mutex::new(cart),
        })
    }

    /// Copy of the current cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add units of a product. See [`Cart::add`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted; the in-memory
    /// cart keeps the change.
    pub async fn add(&self, item: CartItem, quantity: u32) -> Result<Cart, StorageError> {
        self.mutate(|cart| cart.add(item, quantity)).await
    }

    /// Remove a product's line. See [`Cart::remove`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub async fn remove(&self, product_id: &ProductId) -> Result<Cart, StorageError> {
        self.mutate(|cart| {
            cart.remove(product_id);
        })
        .await
    }

    /// Take one unit off a line. See [`Cart::decrement`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub async fn decrement(&self, product_id: &ProductId) -> Result<Cart, StorageError> {
        self.mutate(|cart| {
            cart.decrement(product_id);
        })
        .await
    }

    /// Set a line's quantity. See [`Cart::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub async fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, StorageError> {
        self.mutate(|cart| {
            cart.update_quantity(product_id, quantity);
        })
        .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub async fn clear(&self) -> Result<Cart, StorageError> {
        self.mutate(Cart::clear).await
    }

    async fn mutate(&self, f: impl FnOnce(&mut Cart)) -> Result<Cart, StorageError> {
        let mut cart = self.cart.lock().await;
        f(&mut cart);
        save_json(self.store.as_ref(), CART_KEY, &*cart).await?;
        Ok(cart.clone())
    }
}
