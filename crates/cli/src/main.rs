//! Shopfront CLI - storefront and back-office client for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept in SHOPFRONT_DATA_DIR)
//! sf-cli login -e ann@example.com -p hunter22
//!
//! # Browse and fill the cart
//! sf-cli products list --category shirts --sort price_asc
//! sf-cli cart add 65f1c0ffee -q 2
//!
//! # Place the order
//! sf-cli checkout --full-name "Ann Lee" --address "1 Main St" --city Springfield \
//!     --postal-code 12345 --country US --phone 5550100100
//!
//! # Back office
//! sf-cli admin orders --status pending
//! sf-cli admin set-status 65f1d00d shipped
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_API_URL` - Backend base URL (required)
//! - `SHOPFRONT_TIMEOUT_SECS` - Request timeout (default 30)
//! - `SHOPFRONT_DATA_DIR` - Where the session and cart are stored (default `.shopfront`)
//! - `SHOPFRONT_CACHE_TTL_SECS` - Catalog cache lifetime (default 60)
//! - `RUST_LOG` - Log filter (default `shopfront=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_core::{OrderStatus, PageQuery};
use shopfront_client::models::ProductSort;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront storefront and back-office client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order the cart's contents
    Checkout(CheckoutArgs),
    /// Your orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Read the blog
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Portfolio projects
    Projects {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Offered services
    Services {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Send a contact message
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(short, long)]
        subject: Option<String>,

        #[arg(short, long)]
        message: String,
    },
    /// Back-office operations (admin accounts only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = PageQuery::DEFAULT_LIMIT)]
    limit: u32,
}

impl PageArgs {
    fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit)
    }
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        search: Option<String>,

        /// `newest`, `price_asc`, `price_desc` or `name`
        #[arg(long)]
        sort: Option<ProductSort>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one product
    Show { id: String },
    /// Featured products
    Featured {
        #[arg(long, default_value_t = 8)]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        product_id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product's line
    Remove { product_id: String },
    /// Set a line's quantity (0 removes it)
    Update { product_id: String, quantity: u32 },
    /// Empty the cart
    Clear,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    #[arg(long)]
    full_name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    address2: Option<String>,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    postal_code: String,

    #[arg(long)]
    country: String,

    #[arg(long)]
    phone: String,

    /// Payment method passed to the backend
    #[arg(long, default_value = "cod")]
    payment: String,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one order
    Show { id: String },
}

#[derive(Subcommand)]
enum BlogAction {
    /// List published posts
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a post by slug
    Show { slug: String },
}

#[derive(Subcommand)]
enum ListAction {
    /// List all
    List,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Dashboard figures
    Stats,
    /// List all orders
    Orders {
        /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
        #[arg(short, long)]
        status: Option<OrderStatus>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show an order with its sub-orders
    Order { id: String },
    /// Change an order's status
    SetStatus { id: String, status: OrderStatus },
    /// Delete a product
    DeleteProduct { id: String },
    /// Contact inbox
    Messages {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopfront=info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e.user_message());
        if e.requires_login() {
            tracing::info!("Please log in: sf-cli login -e <email>");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env().await?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&ctx, email, password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => commands::account::register(&ctx, name, email, password, confirm_password).await?,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Whoami => commands::account::whoami(&ctx).await?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                sort,
                featured,
                page,
            } => {
                commands::catalog::list(&ctx, category, search, sort, featured, page.query())
                    .await?;
            }
            ProductsAction::Show { id } => commands::catalog::show(&ctx, &id).await?,
            ProductsAction::Featured { limit } => commands::catalog::featured(&ctx, limit).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx).await,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, &product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&ctx, &product_id).await?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&ctx, &product_id, quantity).await?,
            CartAction::Clear => commands::cart::clear(&ctx).await?,
        },
        Commands::Checkout(args) => {
            let address = shopfront_client::models::ShippingAddress {
                full_name: args.full_name,
                address_line1: args.address,
                address_line2: args.address2,
                city: args.city,
                state: args.state,
                postal_code: args.postal_code,
                country: args.country,
                phone: args.phone,
            };
            commands::orders::checkout(&ctx, address, args.payment).await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List { page } => commands::orders::list(&ctx, page.query()).await?,
            OrdersAction::Show { id } => commands::orders::show(&ctx, &id).await?,
        },
        Commands::Blog { action } => match action {
            BlogAction::List { page } => commands::content::blog_list(&ctx, page.query()).await?,
            BlogAction::Show { slug } => commands::content::blog_show(&ctx, &slug).await?,
        },
        Commands::Projects {
            action: ListAction::List,
        } => commands::content::projects(&ctx).await?,
        Commands::Services {
            action: ListAction::List,
        } => commands::content::services(&ctx).await?,
        Commands::Contact {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let form = shopfront_client::models::ContactForm {
                name,
                email,
                phone,
                subject,
                message,
            };
            commands::content::contact(&ctx, &form).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Stats => commands::admin::stats(&ctx).await?,
            AdminAction::Orders { status, page } => {
                commands::admin::orders(&ctx, status, page.query()).await?;
            }
            AdminAction::Order { id } => commands::admin::order(&ctx, &id).await?,
            AdminAction::SetStatus { id, status } => {
                commands::admin::set_status(&ctx, &id, status).await?;
            }
            AdminAction::DeleteProduct { id } => commands::admin::delete_product(&ctx, &id).await?,
            AdminAction::Messages { page } => commands::admin::messages(&ctx, page.query()).await?,
        },
    }
    Ok(())
}
