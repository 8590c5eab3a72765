//! Role-permission editor route handlers.
//!
//! GET returns one role's aggregated editor snapshot; POST accepts the edited
//! selection, re-enforces the selection invariants, serializes it to the flat
//! upstream payload, and forwards it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain::models::{
    with_based_on_employee, AssignmentSelection, EntityKind, EntityNode, EntityRestriction,
    PermissionGroup,
};
use domain::services::{selection, serialize};
use gateway::loader::load_role_editor_state;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_assignment_saved, record_snapshot_loaded};

/// One role's editor snapshot.
///
/// GET /api/v1/roles/{role_id}/permissions
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RolePermissionsResponse {
    pub role_id: i64,
    pub role_name: Option<String>,
    pub plain_groups: Vec<PermissionGroup>,
    pub crud_groups: Vec<PermissionGroup>,
    pub extra_employees_view: Option<Vec<i64>>,
    pub allowed_leave_clauses: Option<Vec<i64>>,
    pub allowed_permission_clauses: Option<Vec<i64>>,
    pub entity_restriction: Option<EntityRestrictionView>,
    pub fetched_at: DateTime<Utc>,
}

/// The active entity restriction with its pick-list universe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EntityRestrictionView {
    pub kind: EntityKind,
    pub options: Vec<EntityNode>,
    pub selected_ids: Vec<i64>,
}

impl From<EntityRestriction> for EntityRestrictionView {
    fn from(restriction: EntityRestriction) -> Self {
        Self {
            kind: restriction.kind,
            options: restriction.nodes,
            selected_ids: restriction.selected_ids,
        }
    }
}

/// Submitted editor selection.
///
/// POST /api/v1/roles/{role_id}/permissions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitAssignmentRequest {
    #[serde(default)]
    pub plain_groups: Vec<PermissionGroup>,
    #[serde(default)]
    pub crud_groups: Vec<PermissionGroup>,
    pub extra_employees_view: Option<Vec<i64>>,
    pub allowed_leave_clauses: Option<Vec<i64>>,
    pub allowed_permission_clauses: Option<Vec<i64>>,
    pub entity_restriction: Option<SubmitEntityRestriction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitEntityRestriction {
    pub kind: EntityKind,
    pub selected_ids: Vec<i64>,
}

/// Response for a persisted assignment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitAssignmentResponse {
    pub saved: bool,
    /// Number of entries in the forwarded flat payload.
    pub entries: usize,
    pub saved_at: DateTime<Utc>,
}

/// Load one role's aggregated editor snapshot.
///
/// A failed upstream feed leaves its own category absent; the snapshot is
/// returned regardless.
pub async fn get_role_permissions(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    shared::validation::validate_role_id(role_id)?;

    let editor = load_role_editor_state(state.backend.as_ref(), role_id).await;

    let selection = editor.selection;
    let absent = [
        selection.extra_employees_view.is_none(),
        selection.allowed_leave_clauses.is_none(),
        selection.allowed_permission_clauses.is_none(),
        selection.entity_restriction.is_none(),
    ]
    .into_iter()
    .filter(|absent| *absent)
    .count();
    record_snapshot_loaded(absent);

    let response = RolePermissionsResponse {
        role_id: editor.role_id,
        role_name: editor.role_name,
        plain_groups: selection.plain_groups,
        crud_groups: selection.crud_groups,
        extra_employees_view: selection.extra_employees_view,
        allowed_leave_clauses: selection.allowed_leave_clauses,
        allowed_permission_clauses: selection.allowed_permission_clauses,
        entity_restriction: selection.entity_restriction.map(Into::into),
        fetched_at: editor.fetched_at,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Persist one role's edited selection.
///
/// The submitted state is validated, run through the selection invariants
/// (derived group flags, CRUD cascade), serialized to the flat payload, and
/// forwarded upstream. Nothing is stored locally, so a failed save is
/// retried by resubmitting.
pub async fn submit_role_permissions(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(request): Json<SubmitAssignmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    shared::validation::validate_role_id(role_id)?;
    validate_request(&request)?;

    let mut selection = build_selection(&state, request).await?;
    selection::normalize(&mut selection);

    let payload = serialize::serialize(&selection);
    state
        .backend
        .assign_permissions(role_id, payload.clone())
        .await?;

    record_assignment_saved(payload.len());
    tracing::info!(role_id, entries = payload.len(), "role assignment saved");

    let response = SubmitAssignmentResponse {
        saved: true,
        entries: payload.len(),
        saved_at: Utc::now(),
    };

    Ok((StatusCode::OK, Json(response)))
}

fn validate_request(request: &SubmitAssignmentRequest) -> Result<(), ApiError> {
    for group in request.plain_groups.iter().chain(request.crud_groups.iter()) {
        group.validate()?;
    }
    for ids in [
        request.extra_employees_view.as_deref(),
        request.allowed_leave_clauses.as_deref(),
        request.allowed_permission_clauses.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        shared::validation::validate_id_list(ids)?;
    }
    if let Some(restriction) = &request.entity_restriction {
        shared::validation::validate_id_list(&restriction.selected_ids)?;
    }
    Ok(())
}

/// Assemble the engine input from the submitted state, resolving the entity
/// restriction against its pick list. An empty restriction selection counts
/// as inactive.
async fn build_selection(
    state: &AppState,
    request: SubmitAssignmentRequest,
) -> Result<AssignmentSelection, ApiError> {
    let entity_restriction = match request.entity_restriction {
        Some(restriction) if !restriction.selected_ids.is_empty() => {
            let options = state.backend.entity_options(restriction.kind).await?;
            Some(EntityRestriction::new(
                restriction.kind,
                with_based_on_employee(options),
                restriction.selected_ids,
            ))
        }
        _ => None,
    };

    Ok(AssignmentSelection {
        plain_groups: request.plain_groups,
        crud_groups: request.crud_groups,
        extra_employees_view: request.extra_employees_view,
        allowed_leave_clauses: request.allowed_leave_clauses,
        allowed_permission_clauses: request.allowed_permission_clauses,
        entity_restriction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_deserializes_mixed_casing() {
        // Top-level fields are snake_case; catalog items keep the upstream
        // camelCase shape
        let json = r#"{
            "plain_groups": [{
                "name": "Employees",
                "isSelected": false,
                "permissionsList": [{"displayValue": "emp.view", "isSelected": true}]
            }],
            "entity_restriction": {"kind": "department", "selected_ids": [5, 9]}
        }"#;
        let request: SubmitAssignmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.plain_groups.len(), 1);
        assert!(request.crud_groups.is_empty());
        let restriction = request.entity_restriction.unwrap();
        assert_eq!(restriction.kind, EntityKind::Department);
        assert_eq!(restriction.selected_ids, vec![5, 9]);
    }

    #[test]
    fn test_validate_request_rejects_bad_group() {
        let request = SubmitAssignmentRequest {
            plain_groups: vec![PermissionGroup::new(
                "Employees",
                vec![domain::models::PermissionItem::new("emp,view", true)],
            )],
            crud_groups: vec![],
            extra_employees_view: None,
            allowed_leave_clauses: None,
            allowed_permission_clauses: None,
            entity_restriction: None,
        };
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_validate_request_rejects_negative_ids() {
        let request = SubmitAssignmentRequest {
            plain_groups: vec![],
            crud_groups: vec![],
            extra_employees_view: Some(vec![-3]),
            allowed_leave_clauses: None,
            allowed_permission_clauses: None,
            entity_restriction: None,
        };
        assert!(validate_request(&request).is_err());
    }

    #[test]
    fn test_entity_restriction_view_from_domain() {
        let restriction = EntityRestriction::new(
            EntityKind::Company,
            vec![EntityNode::new(0, "Based on employee")],
            vec![0],
        );
        let view: EntityRestrictionView = restriction.into();
        assert_eq!(view.kind, EntityKind::Company);
        assert_eq!(view.selected_ids, vec![0]);
    }
}
