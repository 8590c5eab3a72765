//! Assignment selection state: the engine's explicit input and output.

use chrono::{DateTime, Utc};

use super::entity::EntityRestriction;
use super::permission::PermissionGroup;

/// Everything the user has selected for one role, across all categories.
///
/// The engine is a pure function of this value: the serializer reads it, the
/// synchronizer mutates it, nothing in it touches I/O. A `None` advanced
/// category means its backend feed was absent or failed, so the category is
/// hidden in the editor and contributes nothing to serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentSelection {
    /// Plain feature/page visibility toggles.
    pub plain_groups: Vec<PermissionGroup>,
    /// CRUD matrices; item index 0 of each group is the Page permission.
    pub crud_groups: Vec<PermissionGroup>,
    pub extra_employees_view: Option<Vec<i64>>,
    pub allowed_leave_clauses: Option<Vec<i64>>,
    pub allowed_permission_clauses: Option<Vec<i64>>,
    pub entity_restriction: Option<EntityRestriction>,
}

impl AssignmentSelection {
    /// Recompute every group's derived flag in both catalogs.
    pub fn refresh_group_flags(&mut self) {
        for group in self.plain_groups.iter_mut().chain(self.crud_groups.iter_mut()) {
            group.refresh_selected_flag();
        }
    }
}

/// One role's editor snapshot as assembled from the upstream feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleEditorState {
    pub role_id: i64,
    /// Absent when the role-name feed failed; the editor still renders.
    pub role_name: Option<String>,
    pub selection: AssignmentSelection,
    pub fetched_at: DateTime<Utc>,
}

impl RoleEditorState {
    pub fn new(role_id: i64) -> Self {
        Self {
            role_id,
            role_name: None,
            selection: AssignmentSelection::default(),
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::permission::PermissionItem;

    #[test]
    fn test_refresh_group_flags_covers_both_catalogs() {
        let mut selection = AssignmentSelection {
            plain_groups: vec![PermissionGroup::new(
                "Employees",
                vec![PermissionItem::new("emp.view", true)],
            )],
            crud_groups: vec![PermissionGroup::new(
                "Leaves",
                vec![
                    PermissionItem::new("leave.page", true),
                    PermissionItem::new("leave.create", false),
                ],
            )],
            ..Default::default()
        };
        // Invalidate both flags, then refresh
        selection.plain_groups[0].is_selected = false;
        selection.crud_groups[0].is_selected = true;
        selection.refresh_group_flags();
        assert!(selection.plain_groups[0].is_selected);
        assert!(!selection.crud_groups[0].is_selected);
    }

    #[test]
    fn test_default_selection_is_empty() {
        let selection = AssignmentSelection::default();
        assert!(selection.plain_groups.is_empty());
        assert!(selection.extra_employees_view.is_none());
        assert!(selection.entity_restriction.is_none());
    }

    #[test]
    fn test_new_editor_state() {
        let state = RoleEditorState::new(7);
        assert_eq!(state.role_id, 7);
        assert!(state.role_name.is_none());
        assert_eq!(state.selection, AssignmentSelection::default());
    }
}
