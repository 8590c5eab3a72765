//! Common test utilities for integration tests.
//!
//! Provides a scriptable stub of the upstream workforce backend and helpers
//! for driving the app with in-memory requests.

// Allow dead code in this module - these are helper utilities that may not be
// used by all integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use domain::models::{EntityKind, EntityNode, PermissionGroup, PermissionItem};
use gateway::{GatewayError, WorkforceBackend};
use role_console_api::{app::create_app, config::Config};

/// Scriptable upstream: every feed succeeds with fixture data unless a
/// `fail_*` flag is set. Forwarded assignment payloads are captured for
/// inspection.
pub struct StubBackend {
    pub role_name: String,
    pub fail_role_name: bool,
    pub fail_plain: bool,
    pub fail_extra_view: bool,
    pub reject_assign: bool,
    /// Raw persisted entity-permission string; empty parses to no restriction.
    pub entity_permission: String,
    pub captured: Mutex<Vec<(i64, Vec<String>)>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            role_name: "HR Manager".to_string(),
            fail_role_name: false,
            fail_plain: false,
            fail_extra_view: false,
            reject_assign: false,
            entity_permission: "2,5,9".to_string(),
            captured: Mutex::new(Vec::new()),
        }
    }
}

impl StubBackend {
    pub fn last_payload(&self) -> Option<(i64, Vec<String>)> {
        self.captured.lock().unwrap().last().cloned()
    }
}

fn upstream_failure<T>() -> Result<T, GatewayError> {
    Err(GatewayError::Status(500))
}

#[async_trait]
impl WorkforceBackend for StubBackend {
    async fn role_name(&self, _role_id: i64) -> Result<String, GatewayError> {
        if self.fail_role_name {
            return upstream_failure();
        }
        Ok(self.role_name.clone())
    }

    async fn permissions_by_role(
        &self,
        _role_id: i64,
    ) -> Result<Vec<PermissionGroup>, GatewayError> {
        if self.fail_plain {
            return upstream_failure();
        }
        Ok(vec![PermissionGroup {
            name: "Employees".to_string(),
            is_selected: false,
            permissions: vec![
                PermissionItem::new("emp.view", true),
                PermissionItem::new("emp.edit", true),
            ],
        }])
    }

    async fn crud_permissions_by_role(
        &self,
        _role_id: i64,
    ) -> Result<Vec<PermissionGroup>, GatewayError> {
        Ok(vec![PermissionGroup {
            name: "Leaves".to_string(),
            is_selected: false,
            permissions: vec![
                PermissionItem::new("leave.page", true),
                PermissionItem::new("leave.create", false),
                PermissionItem::new("leave.read", true),
            ],
        }])
    }

    async fn extra_employees_view(&self, _role_id: i64) -> Result<Vec<i64>, GatewayError> {
        if self.fail_extra_view {
            return upstream_failure();
        }
        Ok(vec![101, 102])
    }

    async fn allowed_leave_clauses(&self, _role_id: i64) -> Result<Vec<i64>, GatewayError> {
        Ok(vec![3])
    }

    async fn allowed_permission_clauses(&self, _role_id: i64) -> Result<Vec<i64>, GatewayError> {
        Ok(vec![8, 9])
    }

    async fn entity_permission(&self, _role_id: i64) -> Result<String, GatewayError> {
        Ok(self.entity_permission.clone())
    }

    async fn entity_options(&self, kind: EntityKind) -> Result<Vec<EntityNode>, GatewayError> {
        match kind {
            EntityKind::Department => Ok(vec![
                EntityNode::with_children(
                    5,
                    "Engineering",
                    vec![EntityNode::new(9, "Platform"), EntityNode::new(12, "QA")],
                ),
                EntityNode::new(7, "People"),
            ]),
            EntityKind::Company => Ok(vec![
                EntityNode::new(1, "Acme East"),
                EntityNode::new(2, "Acme West"),
            ]),
            EntityKind::Designation => Ok(vec![
                EntityNode::new(21, "Engineer"),
                EntityNode::new(22, "Manager"),
            ]),
        }
    }

    async fn assign_permissions(
        &self,
        role_id: i64,
        permissions: Vec<String>,
    ) -> Result<(), GatewayError> {
        if self.reject_assign {
            return Err(GatewayError::Rejected("role is read-only".to_string()));
        }
        self.captured.lock().unwrap().push((role_id, permissions));
        Ok(())
    }
}

/// Build the app against a stub backend with default test configuration.
pub fn test_app(backend: Arc<StubBackend>) -> Router {
    test_app_with_config(backend, &[])
}

/// Build the app with configuration overrides.
pub fn test_app_with_config(backend: Arc<StubBackend>, overrides: &[(&str, &str)]) -> Router {
    let config = Config::load_for_test(overrides).expect("test config should load");
    create_app(config, backend)
}

/// Send a GET request and return status plus parsed JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail");

    parse_response(response).await
}

/// Send a POST request with a JSON body and return status plus parsed body.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail");

    parse_response(response).await
}

async fn parse_response(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
