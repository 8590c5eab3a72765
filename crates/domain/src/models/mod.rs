//! Domain models for the role-permission editor.

pub mod assignment;
pub mod entity;
pub mod permission;

pub use assignment::{AssignmentSelection, RoleEditorState};
pub use entity::{
    with_based_on_employee, EntityKind, EntityNode, EntityRestriction, BASED_ON_EMPLOYEE_ID,
};
pub use permission::{PermissionGroup, PermissionItem};
