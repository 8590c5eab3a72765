//! Organizational-entity models for role-level visibility restrictions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Id of the synthetic "based on employee" root entry.
///
/// It is prepended to every entity pick list; selecting it means the role is
/// scoped to the acting employee with no further entity restriction.
pub const BASED_ON_EMPLOYEE_ID: i64 = 0;

/// The organizational-entity kinds a role can be restricted by.
///
/// The numeric tags are the wire values used in the upstream
/// `BasedOnEntityList` encoding. Department is the only hierarchical kind;
/// the others are flat lookup lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Department,
    Designation,
}

impl EntityKind {
    /// Wire tag used in the comma-delimited entity-permission encoding.
    pub fn tag(&self) -> i64 {
        match self {
            EntityKind::Company => 1,
            EntityKind::Department => 2,
            EntityKind::Designation => 3,
        }
    }

    /// Resolve a wire tag back to a kind.
    pub fn from_tag(tag: i64) -> Option<EntityKind> {
        match tag {
            1 => Some(EntityKind::Company),
            2 => Some(EntityKind::Department),
            3 => Some(EntityKind::Designation),
            _ => None,
        }
    }

    /// Departments form a tree; every other kind is a flat list.
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, EntityKind::Department)
    }

    /// Get all restriction kinds.
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Company,
            EntityKind::Department,
            EntityKind::Designation,
        ]
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" => Ok(EntityKind::Company),
            "department" => Ok(EntityKind::Department),
            "designation" => Ok(EntityKind::Designation),
            _ => Err(format!("Unknown entity kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Company => write!(f, "company"),
            EntityKind::Department => write!(f, "department"),
            EntityKind::Designation => write!(f, "designation"),
        }
    }
}

/// One node of an entity lookup. Flat kinds always carry empty `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityNode {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub children: Vec<EntityNode>,
}

impl EntityNode {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(id: i64, label: impl Into<String>, children: Vec<EntityNode>) -> Self {
        Self {
            id,
            label: label.into(),
            children,
        }
    }

    /// The synthetic "based on employee" entry.
    pub fn based_on_employee() -> Self {
        Self::new(BASED_ON_EMPLOYEE_ID, "Based on employee")
    }
}

/// Prepend the synthetic "based on employee" entry to a pick list.
pub fn with_based_on_employee(mut nodes: Vec<EntityNode>) -> Vec<EntityNode> {
    nodes.insert(0, EntityNode::based_on_employee());
    nodes
}

/// An active entity restriction: the kind, the lookup universe the user
/// picked from, and the ids the user selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRestriction {
    pub kind: EntityKind,
    /// The pick-list universe for this kind (tree for Department, flat
    /// otherwise), including the synthetic based-on-employee entry.
    pub nodes: Vec<EntityNode>,
    /// Ids the user selected, as submitted.
    pub selected_ids: Vec<i64>,
}

impl EntityRestriction {
    pub fn new(kind: EntityKind, nodes: Vec<EntityNode>, selected_ids: Vec<i64>) -> Self {
        Self {
            kind,
            nodes,
            selected_ids,
        }
    }

    /// Whether the restriction collapses to "acting employee only".
    pub fn is_employee_scope(&self) -> bool {
        self.selected_ids.contains(&BASED_ON_EMPLOYEE_ID)
    }
}
