//! Blog, portfolio, services and contact commands.

use shopfront_client::models::ContactForm;
use shopfront_core::{PageQuery, format_price};

use super::{CliError, Context, table};

/// Characters of post body shown in listings.
const SUMMARY_CHARS: usize = 80;

pub async fn blog_list(ctx: &Context, page: PageQuery) -> Result<(), CliError> {
    let posts = ctx.client.list_blog_posts(page).await?;
    if posts.is_empty() {
        tracing::info!("No posts yet");
        return Ok(());
    }

    let mut table = table(["Slug", "Title", "Read", "Summary"]);
    for post in &posts.items {
        table.add_row(vec![
            post.slug.clone(),
            post.title.clone(),
            format!("{} min", post.reading_time_minutes()),
            post.summary(SUMMARY_CHARS),
        ]);
    }
    tracing::info!("\n{table}");
    if posts.has_next() {
        tracing::info!("More posts: --page {}", page.next().page);
    }
    Ok(())
}

pub async fn blog_show(ctx: &Context, slug: &str) -> Result<(), CliError> {
    let post = ctx.client.get_blog_post(slug).await?;
    tracing::info!("{}", post.title);
    if let Some(author) = &post.author {
        tracing::info!("by {author}");
    }
    tracing::info!("{} min read", post.reading_time_minutes());
    tracing::info!("");
    tracing::info!("{}", post.content);
    Ok(())
}

pub async fn projects(ctx: &Context) -> Result<(), CliError> {
    let projects = ctx.client.list_projects().await?;
    let mut table = table(["Title", "Client", "Category", "Link"]);
    for project in &projects {
        table.add_row(vec![
            project.title.clone(),
            project.client.clone().unwrap_or_default(),
            project.category.clone().unwrap_or_default(),
            project.link.clone().unwrap_or_default(),
        ]);
    }
    tracing::info!("\n{table}");
    Ok(())
}

pub async fn services(ctx: &Context) -> Result<(), CliError> {
    let services = ctx.client.list_services().await?;
    let mut table = table(["Service", "From", "Includes"]);
    for service in &services {
        table.add_row(vec![
            service.title.clone(),
            service
                .price
                .map_or_else(|| "On request".to_string(), format_price),
            service.features.join(", "),
        ]);
    }
    tracing::info!("\n{table}");
    Ok(())
}

pub async fn contact(ctx: &Context, form: &ContactForm) -> Result<(), CliError> {
    ctx.client.submit_contact(form).await?;
    tracing::info!("Thanks! We'll get back to you soon.");
    Ok(())
}
