//! Workforce-backend client.
//!
//! `WorkforceBackend` is the seam the rest of the service programs against;
//! `HttpWorkforceBackend` is the reqwest implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use domain::models::{EntityKind, EntityNode, PermissionGroup};

use crate::config::UpstreamConfig;
use crate::dto::{ApiEnvelope, AssignPermissionsRequest, RoleNameData};
use crate::error::GatewayError;
use crate::metrics::CallTimer;

/// The workforce backend's role-permission endpoints.
#[async_trait]
pub trait WorkforceBackend: Send + Sync {
    async fn role_name(&self, role_id: i64) -> Result<String, GatewayError>;

    async fn permissions_by_role(&self, role_id: i64)
        -> Result<Vec<PermissionGroup>, GatewayError>;

    async fn crud_permissions_by_role(
        &self,
        role_id: i64,
    ) -> Result<Vec<PermissionGroup>, GatewayError>;

    async fn extra_employees_view(&self, role_id: i64) -> Result<Vec<i64>, GatewayError>;

    async fn allowed_leave_clauses(&self, role_id: i64) -> Result<Vec<i64>, GatewayError>;

    async fn allowed_permission_clauses(&self, role_id: i64) -> Result<Vec<i64>, GatewayError>;

    /// The persisted entity restriction as one comma-delimited string.
    async fn entity_permission(&self, role_id: i64) -> Result<String, GatewayError>;

    /// The pick-list universe for an entity kind; tree-shaped for the
    /// hierarchical kind, flat otherwise.
    async fn entity_options(&self, kind: EntityKind) -> Result<Vec<EntityNode>, GatewayError>;

    /// Persist the flat permission list for a role.
    async fn assign_permissions(
        &self,
        role_id: i64,
        permissions: Vec<String>,
    ) -> Result<(), GatewayError>;
}

fn role_path(role_id: i64, suffix: &str) -> String {
    format!("/api/v1/roles/{}/{}", role_id, suffix)
}

fn lookup_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Company => "/api/v1/lookups/companies",
        EntityKind::Department => "/api/v1/lookups/departments/tree",
        EntityKind::Designation => "/api/v1/lookups/designations",
    }
}

/// reqwest-backed implementation of [`WorkforceBackend`].
pub struct HttpWorkforceBackend {
    client: Client,
    config: UpstreamConfig,
}

impl HttpWorkforceBackend {
    pub fn new(config: UpstreamConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: String,
    ) -> Result<T, GatewayError> {
        let timer = CallTimer::new(endpoint);
        let result = self.get_data_inner(path).await;
        timer.record(result.is_err());
        result
    }

    async fn get_data_inner<T: DeserializeOwned>(&self, path: String) -> Result<T, GatewayError> {
        let url = self.url(&path);
        debug!(%url, "upstream GET");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_data()
    }
}

#[async_trait]
impl WorkforceBackend for HttpWorkforceBackend {
    async fn role_name(&self, role_id: i64) -> Result<String, GatewayError> {
        let data: RoleNameData = self
            .get_data("role_name", role_path(role_id, "name"))
            .await?;
        Ok(data.name)
    }

    async fn permissions_by_role(
        &self,
        role_id: i64,
    ) -> Result<Vec<PermissionGroup>, GatewayError> {
        self.get_data("permissions_by_role", role_path(role_id, "permissions"))
            .await
    }

    async fn crud_permissions_by_role(
        &self,
        role_id: i64,
    ) -> Result<Vec<PermissionGroup>, GatewayError> {
        self.get_data(
            "crud_permissions_by_role",
            role_path(role_id, "crud-permissions"),
        )
        .await
    }

    async fn extra_employees_view(&self, role_id: i64) -> Result<Vec<i64>, GatewayError> {
        self.get_data(
            "extra_employees_view",
            role_path(role_id, "extra-employees-view"),
        )
        .await
    }

    async fn allowed_leave_clauses(&self, role_id: i64) -> Result<Vec<i64>, GatewayError> {
        self.get_data(
            "allowed_leave_clauses",
            role_path(role_id, "allowed-leave-clauses"),
        )
        .await
    }

    async fn allowed_permission_clauses(&self, role_id: i64) -> Result<Vec<i64>, GatewayError> {
        self.get_data(
            "allowed_permission_clauses",
            role_path(role_id, "allowed-permission-clauses"),
        )
        .await
    }

    async fn entity_permission(&self, role_id: i64) -> Result<String, GatewayError> {
        self.get_data("entity_permission", role_path(role_id, "entity-permission"))
            .await
    }

    async fn entity_options(&self, kind: EntityKind) -> Result<Vec<EntityNode>, GatewayError> {
        self.get_data("entity_options", lookup_path(kind).to_string())
            .await
    }

    async fn assign_permissions(
        &self,
        role_id: i64,
        permissions: Vec<String>,
    ) -> Result<(), GatewayError> {
        let timer = CallTimer::new("assign_permissions");
        let result = self.assign_permissions_inner(role_id, permissions).await;
        timer.record(result.is_err());
        result
    }
}

impl HttpWorkforceBackend {
    async fn assign_permissions_inner(
        &self,
        role_id: i64,
        permissions: Vec<String>,
    ) -> Result<(), GatewayError> {
        let url = self.url("/api/v1/roles/permissions");
        debug!(%url, role_id, count = permissions.len(), "upstream POST");

        let body = AssignPermissionsRequest {
            entity_id: role_id,
            permissions_list: permissions,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        // The persist endpoint returns an envelope with no payload
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        if !envelope.succeeded {
            return Err(GatewayError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "upstream reported failure".to_string()),
            ));
        }
        Ok(())
    }
}
