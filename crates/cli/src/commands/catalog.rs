//! Catalog browsing commands.

use shopfront_client::models::{Product, ProductQuery, ProductSort};
use shopfront_core::{PageQuery, ProductId, format_price};

use super::{CliError, Context, table};

fn price_label(product: &Product) -> String {
    match product.original_price() {
        Some(original) => format!(
            "{} (was {})",
            format_price(product.price),
            format_price(original)
        ),
        None => format_price(product.price),
    }
}

fn render(products: &[Product]) -> String {
    let mut table = table(["ID", "Name", "Price", "Stock", ""]);
    for product in products {
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            price_label(product),
            product.stock.to_string(),
            if product.featured { "★" } else { "" }.to_string(),
        ]);
    }
    table.to_string()
}

pub async fn list(
    ctx: &Context,
    category: Option<String>,
    search: Option<String>,
    sort: Option<ProductSort>,
    featured: bool,
    page: PageQuery,
) -> Result<(), CliError> {
    let mut query = ProductQuery::default();
    if let Some(category) = category {
        query = query.category(category);
    }
    if let Some(search) = search {
        query = query.search(search);
    }
    if let Some(sort) = sort {
        query = query.sort(sort);
    }
    if featured {
        query = query.featured_only();
    }

    let products = ctx.client.list_products(&query, page).await?;
    if products.is_empty() {
        tracing::info!("No products found");
        return Ok(());
    }
    tracing::info!("\n{}", render(&products.items));
    tracing::info!(
        "Page {} of {} ({} products)",
        products.page,
        products.total_pages.max(1),
        products.total
    );
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let product = ctx.client.get_product(&ProductId::new(id)).await?;

    tracing::info!("{}", product.name);
    tracing::info!("  Price: {}", price_label(&product));
    if let Some(discount) = product.discount {
        tracing::info!("  Discount: {discount}%");
    }
    if let Some(category) = &product.category {
        tracing::info!("  Category: {category}");
    }
    if product.in_stock() {
        tracing::info!("  In stock: {}", product.stock);
    } else {
        tracing::info!("  Out of stock");
    }
    if !product.description.is_empty() {
        tracing::info!("");
        tracing::info!("{}", product.description);
    }
    Ok(())
}

pub async fn featured(ctx: &Context, limit: u32) -> Result<(), CliError> {
    let products = ctx.client.featured_products(limit).await?;
    if products.is_empty() {
        tracing::info!("No featured products right now");
        return Ok(());
    }
    tracing::info!("\n{}", render(&products));
    Ok(())
}
