//! Assignment serialization to the upstream flat permission list.
//!
//! The upstream persists one string list per role. Plain and CRUD permission
//! keys travel as bare entries; the advanced categories travel as
//! category-prefixed CSV blobs appended after them.

use std::collections::HashSet;

use crate::models::{AssignmentSelection, EntityRestriction};
use crate::services::entity_tree;

/// Category prefixes of the composite wire entries.
pub const EXTRA_EMPLOYEES_VIEW_PREFIX: &str = "ExtraEmployeesViewList-";
pub const ALLOWED_LEAVE_CLAUSE_PREFIX: &str = "AllowedLeaveClauseList-";
pub const ALLOWED_PERMISSION_CLAUSE_PREFIX: &str = "AllowedPermissionClauseList-";
pub const BASED_ON_ENTITY_PREFIX: &str = "BasedOnEntityList-";

/// Bare category markers the editor uses internally; never valid data.
const CATEGORY_SENTINELS: [&str; 4] = [
    "ExtraEmployeesViewList",
    "AllowedLeaveClauseList",
    "AllowedPermissionClauseList",
    "BasedOnEntityList",
];

/// The wire ids of an entity restriction: pre-order of the pick-list
/// universe, filtered to the selected set. Flat kinds fall out naturally
/// since their "tree" has one level.
pub fn restriction_wire_ids(restriction: &EntityRestriction) -> Vec<i64> {
    let selected: HashSet<i64> = restriction.selected_ids.iter().copied().collect();
    entity_tree::flatten_selected(&restriction.nodes, &selected)
}

/// Serialize a selection to the flat `permissionsList` payload.
///
/// Order: plain keys (group order, then item order), CRUD keys, then one
/// composite entry per non-empty advanced category. Pure and idempotent.
pub fn serialize(selection: &AssignmentSelection) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for group in &selection.plain_groups {
        out.extend(group.selected_keys().map(str::to_owned));
    }
    for group in &selection.crud_groups {
        out.extend(group.selected_keys().map(str::to_owned));
    }

    let entity_ids = selection
        .entity_restriction
        .as_ref()
        .map(restriction_wire_ids)
        .unwrap_or_default();

    // Entity ids and permission keys share one payload field upstream; a key
    // that parses to a selected entity id would be read back as a stray
    // entity entry, so it is dropped here. Observed upstream behavior, kept
    // verbatim (see DESIGN.md).
    if !entity_ids.is_empty() {
        let id_set: HashSet<i64> = entity_ids.iter().copied().collect();
        out.retain(|key| key.parse::<i64>().map_or(true, |n| !id_set.contains(&n)));
    }

    out.retain(|entry| !CATEGORY_SENTINELS.contains(&entry.as_str()));

    if let Some(ids) = non_empty(&selection.extra_employees_view) {
        out.push(format!("{}{}", EXTRA_EMPLOYEES_VIEW_PREFIX, join_ids(ids)));
    }
    if let Some(ids) = non_empty(&selection.allowed_leave_clauses) {
        out.push(format!("{}{}", ALLOWED_LEAVE_CLAUSE_PREFIX, join_ids(ids)));
    }
    if let Some(ids) = non_empty(&selection.allowed_permission_clauses) {
        out.push(format!("{}{}", ALLOWED_PERMISSION_CLAUSE_PREFIX, join_ids(ids)));
    }
    if let Some(restriction) = &selection.entity_restriction {
        if !entity_ids.is_empty() {
            out.push(format!(
                "{}{},{}",
                BASED_ON_ENTITY_PREFIX,
                restriction.kind.tag(),
                join_ids(&entity_ids)
            ));
        }
    }

    out
}

fn non_empty(ids: &Option<Vec<i64>>) -> Option<&[i64]> {
    ids.as_deref().filter(|ids| !ids.is_empty())
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
