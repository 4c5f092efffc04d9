//! Subcommand implementations.
//!
//! Results are reported through `tracing` at `info` level; tables are
//! rendered with `comfy-table`.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod content;
pub mod orders;

use std::sync::Arc;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use shopfront_client::{
    ApiClient, ApiError, CartStore, ClientConfig, ConfigError, FileStore, KeyValueStore,
    StorageError,
};
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The local data directory could not be used.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An argument was rejected before any request was made.
    #[error("{0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Config(e) => e.to_string(),
            Self::Storage(e) => format!("Could not use local data: {e}"),
            Self::InvalidArgument(message) => message.clone(),
        }
    }

    /// Whether the user should sign in again.
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Api(e) if e.requires_login())
    }
}

/// Everything a command needs.
pub struct Context {
    pub client: ApiClient,
    pub cart: CartStore,
}

impl Context {
    /// Build the client from the environment, restore any saved session and
    /// load the cart.
    pub async fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));

        let client = ApiClient::new(&config, Arc::clone(&store))?;
        if let Some(user) = client.restore_session().await? {
            tracing::debug!(user = %user.email, "Using stored session");
        }
        let cart = CartStore::load(store).await?;

        Ok(Self { client, cart })
    }
}

/// A table with the house style and the given header.
pub fn table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY).set_header(header);
    table
}
