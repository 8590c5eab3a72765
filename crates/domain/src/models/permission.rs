//! Permission catalog models.
//!
//! A role's permissions arrive as two independently fetched catalogs sharing
//! one shape: "plain" feature toggles and CRUD matrices grouped by entity.
//! Field casing follows the upstream workforce-backend contract.

use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// A single toggleable permission row.
///
/// `display_value` is the wire-format permission key and the unit of
/// serialization. An empty `display_value` marks a label-only row: it is
/// never serialized and never blocks a group's "all selected" flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionItem {
    pub display_value: String,
    #[serde(default)]
    pub is_selected: bool,
}

impl PermissionItem {
    pub fn new(display_value: impl Into<String>, is_selected: bool) -> Self {
        Self {
            display_value: display_value.into(),
            is_selected,
        }
    }

    /// A label-only row (empty key) stays in the catalog for display but
    /// never reaches the wire.
    pub fn has_wire_key(&self) -> bool {
        !self.display_value.is_empty()
    }
}

/// A named bundle of related permission items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGroup {
    pub name: String,
    /// Derived flag: true iff every item with a wire key is selected.
    #[serde(default)]
    pub is_selected: bool,
    #[serde(rename = "permissionsList")]
    pub permissions: Vec<PermissionItem>,
}

impl PermissionGroup {
    pub fn new(name: impl Into<String>, permissions: Vec<PermissionItem>) -> Self {
        let mut group = Self {
            name: name.into(),
            is_selected: false,
            permissions,
        };
        group.refresh_selected_flag();
        group
    }

    /// True iff every item with a wire key is selected. Label-only rows are
    /// vacuously satisfied and never block the result.
    pub fn all_selected(&self) -> bool {
        self.permissions
            .iter()
            .filter(|item| item.has_wire_key())
            .all(|item| item.is_selected)
    }

    /// Recompute the derived group flag from the item states.
    pub fn refresh_selected_flag(&mut self) {
        self.is_selected = self.all_selected();
    }

    /// Selected wire keys of this group, in item order.
    pub fn selected_keys(&self) -> impl Iterator<Item = &str> {
        self.permissions
            .iter()
            .filter(|item| item.has_wire_key() && item.is_selected)
            .map(|item| item.display_value.as_str())
    }

    /// Validate the group against the wire-format constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        shared::validation::validate_group_name(&self.name)?;
        for item in &self.permissions {
            shared::validation::validate_permission_key(&item.display_value)?;
        }
        Ok(())
    }
}
