//! Back-office commands.
//!
//! These need an admin session; other accounts get a "forbidden" error from
//! the backend.

use shopfront_core::{OrderId, OrderStatus, PageQuery, ProductId, format_price};

use super::orders::render_detail;
use super::{CliError, Context, table};

pub async fn stats(ctx: &Context) -> Result<(), CliError> {
    let stats = ctx.client.admin_stats().await?;

    tracing::info!("Products:        {}", stats.total_products);
    tracing::info!("Orders:          {} ({} pending)", stats.total_orders, stats.pending_orders);
    tracing::info!("Customers:       {}", stats.total_users);
    tracing::info!("Revenue:         {}", format_price(stats.total_revenue));
    tracing::info!("Unread messages: {}", stats.unread_messages);

    if !stats.recent_orders.is_empty() {
        let mut table = table(["Order", "Total", "Status"]);
        for order in &stats.recent_orders {
            table.add_row(vec![
                order.display_number().to_string(),
                format_price(order.total),
                order.status.to_string(),
            ]);
        }
        tracing::info!("Recent orders:\n{table}");
    }
    Ok(())
}

pub async fn orders(
    ctx: &Context,
    status: Option<OrderStatus>,
    page: PageQuery,
) -> Result<(), CliError> {
    let orders = ctx.client.admin_list_orders(status, page).await?;
    if orders.is_empty() {
        tracing::info!("No orders");
        return Ok(());
    }

    let mut table = table(["ID", "Order", "Customer", "Total", "Status", "Payment"]);
    for order in &orders.items {
        table.add_row(vec![
            order.id.to_string(),
            order.display_number().to_string(),
            order
                .shipping_address
                .as_ref()
                .map(|a| a.full_name.clone())
                .unwrap_or_default(),
            format_price(order.total),
            order.status.to_string(),
            order.payment_status.to_string(),
        ]);
    }
    tracing::info!("\n{table}");
    tracing::info!(
        "Page {} of {} ({} orders)",
        orders.page,
        orders.total_pages.max(1),
        orders.total
    );
    Ok(())
}

pub async fn order(ctx: &Context, id: &str) -> Result<(), CliError> {
    let order = ctx.client.admin_get_order(&OrderId::new(id)).await?;
    render_detail(&order);
    Ok(())
}

pub async fn set_status(ctx: &Context, id: &str, status: OrderStatus) -> Result<(), CliError> {
    let order = ctx
        .client
        .update_order_status(&OrderId::new(id), status)
        .await?;
    tracing::info!("Order {} is now {}", order.display_number(), order.status);
    Ok(())
}

pub async fn delete_product(ctx: &Context, id: &str) -> Result<(), CliError> {
    ctx.client.delete_product(&ProductId::new(id)).await?;
    tracing::info!("Product {id} deleted");
    Ok(())
}

pub async fn messages(ctx: &Context, page: PageQuery) -> Result<(), CliError> {
    let messages = ctx.client.list_messages(page).await?;
    if messages.is_empty() {
        tracing::info!("Inbox is empty");
        return Ok(());
    }

    let mut table = table(["", "From", "Subject", "Message"]);
    for message in &messages.items {
        table.add_row(vec![
            if message.read { "" } else { "●" }.to_string(),
            format!("{} <{}>", message.name, message.email),
            message.subject.clone().unwrap_or_default(),
            message.message.clone(),
        ]);
    }
    tracing::info!("\n{table}");
    Ok(())
}
