//! Integration tests for the role-permission editor routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use fake::faker::job::en::Title;
use fake::Fake;
use serde_json::json;

use common::{get_json, post_json, test_app, test_app_with_config, StubBackend};

#[tokio::test]
async fn test_get_snapshot_happy_path() {
    let role_name: String = Title().fake();
    let backend = Arc::new(StubBackend {
        role_name: role_name.clone(),
        ..Default::default()
    });
    let app = test_app(backend);

    let (status, body) = get_json(app, "/api/v1/roles/4/permissions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_id"], 4);
    assert_eq!(body["role_name"], role_name.as_str());

    // Derived group flags recomputed from item state
    assert_eq!(body["plain_groups"][0]["isSelected"], true);
    assert_eq!(body["crud_groups"][0]["isSelected"], false);

    assert_eq!(body["extra_employees_view"], json!([101, 102]));
    assert_eq!(body["allowed_leave_clauses"], json!([3]));
    assert_eq!(body["allowed_permission_clauses"], json!([8, 9]));

    let restriction = &body["entity_restriction"];
    assert_eq!(restriction["kind"], "department");
    assert_eq!(restriction["selected_ids"], json!([5, 9]));
    // The pick list leads with the synthetic based-on-employee entry
    assert_eq!(restriction["options"][0]["id"], 0);
}

#[tokio::test]
async fn test_get_snapshot_partial_failure_keeps_other_categories() {
    let backend = Arc::new(StubBackend {
        fail_extra_view: true,
        ..Default::default()
    });
    let app = test_app(backend);

    let (status, body) = get_json(app, "/api/v1/roles/4/permissions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["extra_employees_view"], serde_json::Value::Null);
    assert_eq!(body["allowed_leave_clauses"], json!([3]));
    assert!(body["plain_groups"].as_array().is_some_and(|g| !g.is_empty()));
    assert!(body["entity_restriction"].is_object());
}

#[tokio::test]
async fn test_get_snapshot_malformed_entity_string_hides_restriction() {
    let backend = Arc::new(StubBackend {
        entity_permission: "2,not-an-id".to_string(),
        ..Default::default()
    });
    let app = test_app(backend);

    let (status, body) = get_json(app, "/api/v1/roles/4/permissions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entity_restriction"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_get_snapshot_rejects_non_positive_role_id() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend);

    let (status, body) = get_json(app, "/api/v1/roles/0/permissions").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_submit_forwards_serialized_payload() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend.clone());

    let request = json!({
        "plain_groups": [{
            "name": "Employees",
            "isSelected": false,
            "permissionsList": [
                {"displayValue": "emp.view", "isSelected": true},
                {"displayValue": "emp.edit", "isSelected": false}
            ]
        }],
        "crud_groups": [{
            "name": "Leaves",
            "isSelected": false,
            "permissionsList": [
                {"displayValue": "leave.page", "isSelected": true},
                {"displayValue": "leave.create", "isSelected": true}
            ]
        }],
        "extra_employees_view": [101],
        "allowed_leave_clauses": [3, 4]
    });

    let (status, body) = post_json(app, "/api/v1/roles/4/permissions", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["entries"], 5);

    let (role_id, payload) = backend.last_payload().expect("payload captured");
    assert_eq!(role_id, 4);
    assert_eq!(
        payload,
        vec![
            "emp.view",
            "leave.page",
            "leave.create",
            "ExtraEmployeesViewList-101",
            "AllowedLeaveClauseList-3,4",
        ]
    );
}

#[tokio::test]
async fn test_submit_entity_collision_exclusion() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend.clone());

    // A numeric permission key colliding with a selected department id
    let request = json!({
        "plain_groups": [{
            "name": "Odd",
            "isSelected": false,
            "permissionsList": [
                {"displayValue": "9", "isSelected": true},
                {"displayValue": "emp.view", "isSelected": true}
            ]
        }],
        "entity_restriction": {"kind": "department", "selected_ids": [5, 9]}
    });

    let (status, _body) = post_json(app, "/api/v1/roles/4/permissions", request).await;

    assert_eq!(status, StatusCode::OK);
    let (_, payload) = backend.last_payload().expect("payload captured");
    assert_eq!(payload, vec!["emp.view", "BasedOnEntityList-2,5,9"]);
}

#[tokio::test]
async fn test_submit_reorders_tree_ids_pre_order() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend.clone());

    let request = json!({
        "entity_restriction": {"kind": "department", "selected_ids": [12, 7, 5]}
    });

    let (status, _body) = post_json(app, "/api/v1/roles/4/permissions", request).await;

    assert_eq!(status, StatusCode::OK);
    let (_, payload) = backend.last_payload().expect("payload captured");
    // Parent 5 precedes child 12; sibling 7 follows the subtree
    assert_eq!(payload, vec!["BasedOnEntityList-2,5,12,7"]);
}

#[tokio::test]
async fn test_submit_enforces_crud_cascade() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend.clone());

    // A child permission without its Page umbrella
    let request = json!({
        "crud_groups": [{
            "name": "Leaves",
            "isSelected": false,
            "permissionsList": [
                {"displayValue": "leave.page", "isSelected": false},
                {"displayValue": "leave.create", "isSelected": true}
            ]
        }]
    });

    let (status, _body) = post_json(app, "/api/v1/roles/4/permissions", request).await;

    assert_eq!(status, StatusCode::OK);
    let (_, payload) = backend.last_payload().expect("payload captured");
    assert_eq!(payload, vec!["leave.page", "leave.create"]);
}

#[tokio::test]
async fn test_submit_validation_failure() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend.clone());

    let request = json!({
        "plain_groups": [{
            "name": "Employees",
            "isSelected": false,
            "permissionsList": [{"displayValue": "emp,view", "isSelected": true}]
        }]
    });

    let (status, body) = post_json(app, "/api/v1/roles/4/permissions", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(backend.last_payload().is_none());
}

#[tokio::test]
async fn test_submit_upstream_rejection_surfaces() {
    let backend = Arc::new(StubBackend {
        reject_assign: true,
        ..Default::default()
    });
    let app = test_app(backend);

    let (status, body) = post_json(
        app,
        "/api/v1/roles/4/permissions",
        json!({"extra_employees_view": [101]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "upstream_rejected");
}

#[tokio::test]
async fn test_rate_limit_applies_to_editor_routes() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app_with_config(backend, &[("security.rate_limit_per_minute", "1")]);

    let (status, _) = get_json(app.clone(), "/api/v1/roles/4/permissions").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(app, "/api/v1/roles/4/permissions").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate_limit_exceeded");
}

#[tokio::test]
async fn test_health_endpoints() {
    let backend = Arc::new(StubBackend::default());
    let app = test_app(backend);

    let (status, body) = get_json(app.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upstream"]["configured"], true);

    let (status, body) = get_json(app.clone(), "/api/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");

    let (status, body) = get_json(app, "/api/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
