//! Wire records exchanged with the marketplace backend.
//!
//! Field names follow the backend's camelCase JSON. Identifier fields
//! accept the legacy `_id` key some collections still emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{CommissionId, OrderId, ProductId, UserId};
use super::money::Amount;
use super::role::Role;

// =============================================================================
// Accounts
// =============================================================================

/// A marketplace account as returned by the identity and user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Backend account id.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Backend-asserted role.
    pub role: Role,
    /// Contact phone, if the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Account creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration payload for `POST /auth/register`.
///
/// A role may be requested (agent sign-up, admin-initiated account
/// creation); whether it is honored is the backend's decision. The
/// session role always comes from the identity endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The account that was authenticated.
    pub user: UserRecord,
}

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units in stock; absent for catalog entries that do not track stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

// =============================================================================
// Cart
// =============================================================================

/// The server-side cart, mirrored by the client between mutations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines, at most one per product.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Sum of line quantities, computed by the backend.
    #[serde(default)]
    pub total_items: u32,
    /// Cart total, computed by the backend.
    #[serde(default)]
    pub total_price: Amount,
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Unit price at the time the line was added; server-decided.
    pub price: Amount,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
}

/// Cart totals, either computed from the mirror or fetched from
/// `GET /cart/total`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total_items: u32,
    pub total_price: Amount,
    /// Number of distinct lines; not part of the totals endpoint response.
    #[serde(default)]
    pub item_count: usize,
}

// =============================================================================
// Orders
// =============================================================================

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
    /// Cash on delivery; settles without the payment gateway.
    Cod,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub subtotal: Amount,
    #[serde(default)]
    pub discount: Amount,
    #[serde(default)]
    pub tax: Amount,
    #[serde(default)]
    pub shipping: Amount,
    pub total: Amount,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// Agent credited with the sale, when one was tagged at checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A line on a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<NewOrderItem>,
    pub subtotal: Amount,
    pub discount: Amount,
    pub tax: Amount,
    pub shipping: Amount,
    pub total: Amount,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<UserId>,
    pub status: OrderStatus,
}

/// A line in an order creation payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
}

// =============================================================================
// Commissions
// =============================================================================

/// Commission settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionStatus {
    #[default]
    Pending,
    Approved,
    Paid,
}

/// An agent commission earned on an attributed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    #[serde(alias = "_id")]
    pub id: CommissionId,
    pub agent_id: UserId,
    pub order_id: OrderId,
    pub amount: Amount,
    /// Commission rate as a percentage of the order total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Amount>,
    #[serde(default)]
    pub status: CommissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
