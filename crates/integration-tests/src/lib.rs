//! Integration test harness for the Pomade client SDK.
//!
//! Each test drives the real SDK stack against a [`wiremock`] mock of the
//! marketplace backend: no component is replaced with a fake, only the
//! HTTP surface.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pomade-integration-tests
//! ```

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use pomade_client::cart::CartSynchronizer;
use pomade_client::config::ClientConfig;
use pomade_client::gateway::ApiGateway;
use pomade_client::session::SessionManager;
use pomade_client::token::{Credential, TokenStore};

/// A fully wired SDK stack pointed at a mock backend.
pub struct TestContext {
    pub server: MockServer,
    pub tokens: TokenStore,
    pub gateway: ApiGateway,
    pub session: SessionManager,
    pub cart: CartSynchronizer,
}

impl TestContext {
    /// Start a mock backend and wire the SDK against it, anonymous.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
        let tokens = TokenStore::new();
        let gateway = ApiGateway::new(&config, tokens.clone());
        let session = SessionManager::new(gateway.clone(), tokens.clone());
        let cart = CartSynchronizer::new(gateway.clone());
        Self {
            server,
            tokens,
            gateway,
            session,
            cart,
        }
    }

    /// Like [`TestContext::new`], but with a credential already stored.
    pub async fn signed_in(token: &str) -> Self {
        let ctx = Self::new().await;
        ctx.tokens.set(Credential::new(token));
        ctx
    }

    /// Requests the mock backend has received so far.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Backend user record JSON.
#[must_use]
pub fn user_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{id}@salon.example"),
        "role": role,
    })
}

/// Backend cart JSON with one line per `(productId, name, price, quantity)`.
#[must_use]
pub fn cart_json(lines: &[(&str, &str, f64, u32)]) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|(product_id, name, price, quantity)| {
            json!({
                "productId": product_id,
                "productName": name,
                "price": price,
                "quantity": quantity,
            })
        })
        .collect();
    let total_items: u32 = lines.iter().map(|(_, _, _, q)| q).sum();
    let total_price: f64 = lines
        .iter()
        .map(|(_, _, price, quantity)| price * f64::from(*quantity))
        .sum();
    json!({
        "items": items,
        "totalItems": total_items,
        "totalPrice": total_price,
    })
}

/// Backend order JSON.
#[must_use]
pub fn order_json(id: &str, status: &str, payment_method: &str, total: f64) -> Value {
    json!({
        "id": id,
        "items": [
            { "productId": "product-7", "name": "Argan Oil 1L", "price": total, "quantity": 1 }
        ],
        "subtotal": total,
        "discount": 0,
        "tax": 0,
        "shipping": 0,
        "total": total,
        "paymentMethod": payment_method,
        "status": status,
    })
}
