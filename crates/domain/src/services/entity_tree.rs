//! Entity tree flattening and selection resolution.
//!
//! The wire format carries entity restrictions as a flat id list; the editor
//! works with trees. These walks convert between the two. Traversal is
//! depth-first pre-order throughout: a node's own id before its children, so
//! parents always precede their descendants in the output.

use std::collections::HashSet;

use crate::models::EntityNode;

/// Flatten a node sequence to ids, pre-order.
///
/// Flattens whatever it is given; callers pass the subtrees they consider
/// selected.
pub fn flatten(nodes: &[EntityNode]) -> Vec<i64> {
    let mut out = Vec::new();
    collect_ids(nodes, &mut out);
    out
}

fn collect_ids(nodes: &[EntityNode], out: &mut Vec<i64>) {
    for node in nodes {
        out.push(node.id);
        collect_ids(&node.children, out);
    }
}

/// Emit the ids from `selected` that exist in the tree, pre-order, once each.
///
/// Equivalent to filtering `flatten` of the full tree down to the selected
/// set: parents before children, tree order preserved.
pub fn flatten_selected(nodes: &[EntityNode], selected: &HashSet<i64>) -> Vec<i64> {
    let mut out = Vec::new();
    collect_selected_ids(nodes, selected, &mut out);
    out
}

fn collect_selected_ids(nodes: &[EntityNode], selected: &HashSet<i64>, out: &mut Vec<i64>) {
    for node in nodes {
        if selected.contains(&node.id) {
            out.push(node.id);
        }
        collect_selected_ids(&node.children, selected, out);
    }
}

/// Inverse of flattening: the nodes (at any depth) whose id is in `ids`,
/// in pre-order tree order. Used to pre-populate the tree-selection control
/// from a persisted flat id list. An empty `ids` set yields an empty result.
pub fn find_selected<'a>(ids: &HashSet<i64>, nodes: &'a [EntityNode]) -> Vec<&'a EntityNode> {
    let mut out = Vec::new();
    collect_selected_nodes(ids, nodes, &mut out);
    out
}

fn collect_selected_nodes<'a>(
    ids: &HashSet<i64>,
    nodes: &'a [EntityNode],
    out: &mut Vec<&'a EntityNode>,
) {
    for node in nodes {
        if ids.contains(&node.id) {
            out.push(node);
        }
        collect_selected_nodes(ids, &node.children, out);
    }
}
