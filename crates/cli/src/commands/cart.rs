//! Local cart commands.

use shopfront_client::{Cart, CartItem};
use shopfront_core::{ProductId, format_price};

use super::{CliError, Context, table};

fn render(cart: &Cart) {
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    let mut table = table(["Product", "Name", "Qty", "Unit", "Line"]);
    for item in cart.items() {
        table.add_row(vec![
            item.product_id.to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            format_price(item.unit_price),
            format_price(item.line_total()),
        ]);
    }
    tracing::info!("\n{table}");
    tracing::info!(
        "{} items, total {}",
        cart.item_count(),
        format_price(cart.total())
    );
    let savings = cart.savings();
    if !savings.is_zero() {
        tracing::info!("You save {}", format_price(savings));
    }
}

pub async fn show(ctx: &Context) {
    render(&ctx.cart.snapshot().await);
}

/// Look the product up so the line carries its current name and price.
pub async fn add(ctx: &Context, product_id: &str, quantity: u32) -> Result<(), CliError> {
    if quantity == 0 {
        return Err(CliError::InvalidArgument(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let product = ctx.client.get_product(&ProductId::new(product_id)).await?;
    let in_cart = ctx
        .cart
        .snapshot()
        .await
        .get(&product.id)
        .map_or(0, |item| item.quantity);
    if in_cart.saturating_add(quantity) > product.stock {
        return Err(CliError::InvalidArgument(format!(
            "Only {} of {} in stock",
            product.stock, product.name
        )));
    }

    let cart = ctx
        .cart
        .add(CartItem::from_product(&product), quantity)
        .await?;
    tracing::info!("Added {quantity} × {}", product.name);
    render(&cart);
    Ok(())
}

pub async fn remove(ctx: &Context, product_id: &str) -> Result<(), CliError> {
    let cart = ctx.cart.remove(&ProductId::new(product_id)).await?;
    render(&cart);
    Ok(())
}

pub async fn update(ctx: &Context, product_id: &str, quantity: u32) -> Result<(), CliError> {
    let id = ProductId::new(product_id);
    if ctx.cart.snapshot().await.get(&id).is_none() {
        return Err(CliError::InvalidArgument(format!(
            "{product_id} is not in your cart"
        )));
    }
    let cart = ctx.cart.update_quantity(&id, quantity).await?;
    render(&cart);
    Ok(())
}

pub async fn clear(ctx: &Context) -> Result<(), CliError> {
    ctx.cart.clear().await?;
    tracing::info!("Cart cleared");
    Ok(())
}
