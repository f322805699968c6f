//! Commission endpoints.

use serde::Serialize;

use pomade_core::{Amount, Commission, CommissionId, CommissionStatus, OrderId, UserId};

use crate::error::ApiError;
use crate::gateway::ApiGateway;

use super::with_query;

/// Payload for creating a commission record (admin).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommission {
    pub agent_id: UserId,
    pub order_id: OrderId,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Amount>,
}

/// Partial update for a commission record (admin).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommissionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CommissionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
}

/// `GET/POST/PATCH /commissions[...]`.
#[derive(Clone)]
pub struct CommissionApi {
    gateway: ApiGateway,
}

impl CommissionApi {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List all commissions (admin), optionally filtered by agent.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn list(&self, agent: Option<&UserId>) -> Result<Vec<Commission>, ApiError> {
        let path = with_query(
            "/commissions",
            &[("agentId", agent.map(|a| a.as_str().to_string()))],
        );
        self.gateway.get(&path).await
    }

    /// Get a single commission.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the record does not exist or the
    /// request fails.
    pub async fn get(&self, id: &CommissionId) -> Result<Commission, ApiError> {
        self.gateway.get(&format!("/commissions/{id}")).await
    }

    /// List the current agent's commissions.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn my_commissions(&self) -> Result<Vec<Commission>, ApiError> {
        self.gateway.get("/commissions/me").await
    }

    /// Create a commission record (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn create(&self, commission: &NewCommission) -> Result<Commission, ApiError> {
        self.gateway.post("/commissions", commission).await
    }

    /// Update a commission record (admin).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn update(
        &self,
        id: &CommissionId,
        patch: &CommissionPatch,
    ) -> Result<Commission, ApiError> {
        self.gateway
            .patch(&format!("/commissions/{id}"), patch)
            .await
    }
}
