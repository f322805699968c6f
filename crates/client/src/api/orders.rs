//! Order endpoints.
//!
//! Orders are mutable state and are never cached.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use pomade_core::{NewOrder, Order, OrderId, OrderStatus, UserId};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

use super::with_query;

/// Filters for the order listing endpoints.
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl OrderFilters {
    fn path(&self, base: &str) -> String {
        with_query(
            base,
            &[
                (
                    "status",
                    self.status
                        .map(|s| status_query_value(s).to_string()),
                ),
                ("page", self.page.map(|p| p.to_string())),
                ("limit", self.limit.map(|l| l.to_string())),
            ],
        )
    }
}

const fn status_query_value(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "PENDING",
        OrderStatus::Confirmed => "CONFIRMED",
        OrderStatus::Shipped => "SHIPPED",
        OrderStatus::Delivered => "DELIVERED",
        OrderStatus::Cancelled => "CANCELLED",
    }
}

/// A page of orders.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
}

/// Partial update for an order (admin).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
}

#[derive(Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignAgentPatch<'a> {
    agent_id: &'a UserId,
}

/// Proof of payment from the gateway handler, verified server-side
/// against the order it was collected for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    /// Gateway payment identifier.
    pub payment_id: String,
    /// Gateway signature over the order/payment pair.
    pub signature: String,
}

/// `GET/POST/PATCH /orders[...]`.
#[derive(Clone)]
pub struct OrderApi {
    gateway: ApiGateway,
}

impl OrderApi {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List all orders (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn list(&self, filters: &OrderFilters) -> Result<OrderPage, ApiError> {
        self.gateway.get(&filters.path("/orders")).await
    }

    /// List the current account's orders.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn my_orders(&self, filters: &OrderFilters) -> Result<OrderPage, ApiError> {
        self.gateway.get(&filters.path("/orders/me")).await
    }

    /// List orders assigned to the current agent.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn assigned(&self, filters: &OrderFilters) -> Result<OrderPage, ApiError> {
        self.gateway.get(&filters.path("/orders/assigned")).await
    }

    /// Get a single order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the order does not exist or the request
    /// fails.
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.gateway.get(&format!("/orders/{id}")).await
    }

    /// Create an order. First phase of the checkout contract; card and
    /// UPI payments are verified in a second call.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    #[instrument(skip_all)]
    pub async fn create(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.gateway.post("/orders", order).await
    }

    /// Update an order (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn update(&self, id: &OrderId, patch: &OrderPatch) -> Result<Order, ApiError> {
        self.gateway.patch(&format!("/orders/{id}"), patch).await
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.gateway
            .patch(&format!("/orders/{id}/status"), &StatusPatch { status })
            .await
    }

    /// Attribute an order to an agent for commission.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn assign_agent(&self, id: &OrderId, agent_id: &UserId) -> Result<Order, ApiError> {
        self.gateway
            .patch(
                &format!("/orders/{id}/assign-agent"),
                &AssignAgentPatch { agent_id },
            )
            .await
    }

    /// Verify a collected payment against its order. Second phase of the
    /// checkout contract.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if verification is rejected or the request
    /// fails.
    #[instrument(skip(self, proof))]
    pub async fn verify_payment(
        &self,
        id: &OrderId,
        proof: &PaymentProof,
    ) -> Result<Order, ApiError> {
        self.gateway
            .post(&format!("/orders/{id}/verify-payment"), proof)
            .await
    }
}
