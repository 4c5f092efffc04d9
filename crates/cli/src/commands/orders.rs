//! Checkout and order history commands.

use shopfront_client::models::{Order, ShippingAddress};
use shopfront_core::{OrderId, PageQuery, format_price};

use super::{CliError, Context, table};

pub async fn checkout(
    ctx: &Context,
    address: ShippingAddress,
    payment_method: String,
) -> Result<(), CliError> {
    let order = ctx
        .client
        .checkout(&ctx.cart, address, payment_method)
        .await?;
    tracing::info!(
        "Order {} placed, total {}",
        order.display_number(),
        format_price(order.total)
    );
    Ok(())
}

pub async fn list(ctx: &Context, page: PageQuery) -> Result<(), CliError> {
    let orders = ctx.client.list_my_orders(page).await?;
    if orders.is_empty() {
        tracing::info!("You have no orders yet");
        return Ok(());
    }

    let mut table = table(["Order", "Placed", "Items", "Total", "Status"]);
    for order in &orders.items {
        table.add_row(vec![
            order.display_number().to_string(),
            order
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            order.item_count().to_string(),
            format_price(order.total),
            order.status.to_string(),
        ]);
    }
    tracing::info!("\n{table}");
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let order = ctx.client.get_order(&OrderId::new(id)).await?;
    render_detail(&order);
    Ok(())
}

/// Full order view, shared with the back-office `admin order` command.
pub fn render_detail(order: &Order) {
    tracing::info!("Order {}", order.display_number());
    tracing::info!("  Status: {} / payment {}", order.status, order.payment_status);

    let mut lines = table(["Product", "Qty", "Price", "Line"]);
    for item in &order.items {
        lines.add_row(vec![
            item.name.clone(),
            item.quantity.to_string(),
            format_price(item.price),
            format_price(item.line_total()),
        ]);
    }
    tracing::info!("\n{lines}");

    tracing::info!("  Subtotal: {}", format_price(order.subtotal()));
    tracing::info!("  Shipping: {}", format_price(order.shipping_cost));
    tracing::info!("  Total:    {}", format_price(order.total));

    if let Some(address) = &order.shipping_address {
        tracing::info!(
            "  Ship to: {}, {}, {} {}, {}",
            address.full_name,
            address.address_line1,
            address.city,
            address.postal_code,
            address.country
        );
    }

    for sub_order in &order.sub_orders {
        tracing::info!(
            "  Sub-order {}: {} ({} lines)",
            sub_order.id,
            sub_order.status,
            sub_order.items.len()
        );
    }
}
