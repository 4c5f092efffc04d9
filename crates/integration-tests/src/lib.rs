//! Integration tests for Shopfront.
//!
//! The client is driven against a `wiremock` backend with a real
//! [`FileStore`] in a temporary directory, so session and cart persistence
//! are exercised exactly as the CLI uses them.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - browse, cart, checkout
//! - `session_refresh` - token refresh and session persistence
//! - `admin_flow` - back-office operations

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::SecretString;
use serde_json::{Value, json};
use shopfront_client::models::User;
use shopfront_client::{ApiClient, CartStore, ClientConfig, FileStore, KeyValueStore, Session};
use shopfront_core::{UserId, UserRole};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client, cart and mock backend sharing one temporary data directory.
pub struct TestContext {
    pub server: MockServer,
    pub data_dir: TempDir,
    pub client: ApiClient,
    pub cart: CartStore,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::tempdir().unwrap();
        let (client, cart) = open(&server, data_dir.path()).await;
        Self {
            server,
            data_dir,
            client,
            cart,
        }
    }

    /// A second client over the same data directory, as after a restart.
    pub async fn reopen(&self) -> (ApiClient, CartStore) {
        open(&self.server, self.data_dir.path()).await
    }

    /// Backing store for direct inspection.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_dir.path())
    }

    /// Sign in without a round trip.
    pub async fn sign_in(&self, user: User, access: &str, refresh: Option<&str>) {
        self.client
            .set_session(Session {
                user,
                access_token: SecretString::from(access.to_string()),
                refresh_token: refresh.map(|r| SecretString::from(r.to_string())),
            })
            .await
            .unwrap();
    }
}

async fn open(server: &MockServer, dir: &Path) -> (ApiClient, CartStore) {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir));
    let config = ClientConfig::new(Url::parse(&format!("{}/", server.uri())).unwrap());
    let client = ApiClient::new(&config, Arc::clone(&store)).unwrap();
    client.restore_session().await.unwrap();
    let cart = CartStore::load(store).await.unwrap();
    (client, cart)
}

pub fn customer() -> User {
    User {
        id: UserId::new("u1"),
        name: "Ann Lee".to_string(),
        email: "ann@example.com".to_string(),
        role: UserRole::Customer,
        created_at: None,
    }
}

pub fn admin() -> User {
    User {
        id: UserId::new("a1"),
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
        created_at: None,
    }
}

/// An unsigned JWT whose payload carries `exp`.
pub fn jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({"sub": "u1", "exp": exp}).to_string());
    format!("{header}.{payload}.signature")
}

pub fn product_json(id: &str, price: f64, stock: u32) -> Value {
    json!({
        "_id": id,
        "name": format!("Product {id}"),
        "price": price,
        "stock": stock,
        "images": [format!("{id}.jpg")]
    })
}

pub fn page_json(items: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(limit));
    json!({
        "data": items,
        "page": page,
        "limit": limit,
        "total": total,
        "totalPages": total_pages
    })
}

/// Serve a product by ID.
pub async fn mount_product(server: &MockServer, product: Value) {
    let id = product["_id"].as_str().unwrap().to_string();
    Mock::given(method("GET"))
        .and(path(format!("/api/products/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product))
        .mount(server)
        .await;
}
