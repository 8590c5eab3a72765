//! Selection-state synchronization.
//!
//! Keeps group-level "select all" flags consistent with item-level changes in
//! both directions, and enforces the CRUD cascade. Every operation here runs
//! synchronously on one toggle; nothing is deferred to submit time.

use thiserror::Error;

use crate::models::{AssignmentSelection, PermissionGroup};

/// Item index of the Page (umbrella) permission within a CRUD group.
pub const CRUD_PAGE_INDEX: usize = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Item index {index} out of range for group with {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Group → items: set every item with a wire key to the group's new value.
/// Label-only rows are left untouched. The derived flag follows.
pub fn set_group_selected(group: &mut PermissionGroup, selected: bool) {
    for item in group.permissions.iter_mut().filter(|i| i.has_wire_key()) {
        item.is_selected = selected;
    }
    group.refresh_selected_flag();
}

/// Items → group: change one plain item, then recompute the group flag.
pub fn set_item_selected(
    group: &mut PermissionGroup,
    index: usize,
    selected: bool,
) -> Result<(), SelectionError> {
    let len = group.permissions.len();
    let item = group
        .permissions
        .get_mut(index)
        .ok_or(SelectionError::IndexOutOfRange { index, len })?;
    item.is_selected = selected;
    group.refresh_selected_flag();
    Ok(())
}

/// Change one CRUD item, applying the cascade before the flag recompute:
/// selecting any item above the Page index forces the Page item selected;
/// deselecting the Page item deselects everything under it.
pub fn set_crud_item_selected(
    group: &mut PermissionGroup,
    index: usize,
    selected: bool,
) -> Result<(), SelectionError> {
    let len = group.permissions.len();
    if index >= len {
        return Err(SelectionError::IndexOutOfRange { index, len });
    }
    group.permissions[index].is_selected = selected;

    if index == CRUD_PAGE_INDEX {
        if !selected {
            // Revoking Page revokes everything under it
            for item in group.permissions.iter_mut().skip(CRUD_PAGE_INDEX + 1) {
                item.is_selected = false;
            }
        }
    } else if selected {
        // No Create/Read/Update/Delete without Page visibility
        group.permissions[CRUD_PAGE_INDEX].is_selected = true;
    }

    group.refresh_selected_flag();
    Ok(())
}

/// Global select-all: apply the group→items rule to every group of both
/// catalogs. The advanced selection lists are not covered by this toggle.
pub fn select_all(selection: &mut AssignmentSelection, selected: bool) {
    for group in selection
        .plain_groups
        .iter_mut()
        .chain(selection.crud_groups.iter_mut())
    {
        set_group_selected(group, selected);
    }
}

/// Re-enforce the invariants on a selection that arrived as one payload
/// (a submitted editor state): the CRUD cascade per group, then every derived
/// flag. Selecting a child with Page unselected resolves in favor of the
/// child, matching the cascade's toggle-time direction.
pub fn normalize(selection: &mut AssignmentSelection) {
    for group in selection.crud_groups.iter_mut() {
        let child_selected = group
            .permissions
            .iter()
            .skip(CRUD_PAGE_INDEX + 1)
            .any(|i| i.has_wire_key() && i.is_selected);
        if child_selected {
            if let Some(page) = group.permissions.get_mut(CRUD_PAGE_INDEX) {
                page.is_selected = true;
            }
        }
    }
    selection.refresh_group_flags();
}
