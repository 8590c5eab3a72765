//! Role editor snapshot loader.
//!
//! Fires the per-role upstream feeds concurrently and assembles whatever
//! succeeded into one [`RoleEditorState`]. Each feed failure is logged and
//! leaves only its own category absent; one failing category never blocks
//! the others.

use std::collections::HashSet;

use tracing::warn;

use domain::models::{with_based_on_employee, EntityRestriction, RoleEditorState};
use domain::services::{entity_restriction, entity_tree};

use crate::client::WorkforceBackend;
use crate::error::GatewayError;

/// Load one role's editor snapshot.
pub async fn load_role_editor_state(
    backend: &dyn WorkforceBackend,
    role_id: i64,
) -> RoleEditorState {
    let (role_name, plain, crud, extra, leave, clause, entity_raw) = tokio::join!(
        backend.role_name(role_id),
        backend.permissions_by_role(role_id),
        backend.crud_permissions_by_role(role_id),
        backend.extra_employees_view(role_id),
        backend.allowed_leave_clauses(role_id),
        backend.allowed_permission_clauses(role_id),
        backend.entity_permission(role_id),
    );

    let mut state = RoleEditorState::new(role_id);

    state.role_name = unwrap_category("role_name", role_id, role_name);
    state.selection.plain_groups =
        unwrap_category("permissions", role_id, plain).unwrap_or_default();
    state.selection.crud_groups =
        unwrap_category("crud_permissions", role_id, crud).unwrap_or_default();
    state.selection.extra_employees_view =
        unwrap_category("extra_employees_view", role_id, extra);
    state.selection.allowed_leave_clauses =
        unwrap_category("allowed_leave_clauses", role_id, leave);
    state.selection.allowed_permission_clauses =
        unwrap_category("allowed_permission_clauses", role_id, clause);

    // Catalog items arrive with their own selection already populated; only
    // the derived group flags need computing here.
    state.selection.refresh_group_flags();

    state.selection.entity_restriction = match unwrap_category("entity_permission", role_id, entity_raw)
    {
        Some(raw) => resolve_entity_restriction(backend, role_id, &raw).await,
        None => None,
    };

    state
}

/// Resolve a persisted entity-permission string against its pick list.
/// Malformed strings and lookup failures both degrade to no restriction.
async fn resolve_entity_restriction(
    backend: &dyn WorkforceBackend,
    role_id: i64,
    raw: &str,
) -> Option<EntityRestriction> {
    let parsed = entity_restriction::parse(raw)?;

    let options = match backend.entity_options(parsed.kind).await {
        Ok(options) => with_based_on_employee(options),
        Err(error) => {
            warn!(
                role_id,
                kind = %parsed.kind,
                %error,
                "entity options lookup failed, hiding the restriction section"
            );
            return None;
        }
    };

    // Seed the selection from the persisted ids: only ids that resolve to a
    // pick-list node survive, and the section stays hidden when none do.
    let id_set: HashSet<i64> = parsed.ids.iter().copied().collect();
    let selected_ids: Vec<i64> = entity_tree::find_selected(&id_set, &options)
        .into_iter()
        .map(|node| node.id)
        .collect();
    if selected_ids.is_empty() {
        warn!(
            role_id,
            kind = %parsed.kind,
            "persisted entity ids resolve to no pick-list nodes, hiding the restriction section"
        );
        return None;
    }

    Some(EntityRestriction::new(parsed.kind, options, selected_ids))
}

fn unwrap_category<T>(
    category: &'static str,
    role_id: i64,
    result: Result<T, GatewayError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(role_id, category, %error, "editor feed failed, leaving category empty");
            None
        }
    }
}
