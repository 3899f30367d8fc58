// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural operations on nested trees.
//!
//! Every transforming operation takes the tree by value and hands back the new tree, so a caller
//! holding the old value never observes a node changing under it. Untouched subtrees are moved,
//! not copied.

use crate::model::{NodeId, TreeNode};

/// Depth-first search for the first node with `id`.
pub fn find_item_deep<'a, T>(nodes: &'a [TreeNode<T>], id: &NodeId) -> Option<&'a TreeNode<T>> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_item_deep(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Ids from the root down to `id` (inclusive), or `None` if `id` is not in the tree.
pub fn find_path<T>(nodes: &[TreeNode<T>], id: &NodeId) -> Option<Vec<NodeId>> {
    for node in nodes {
        if node.id() == id {
            return Some(vec![node.id().clone()]);
        }
        if let Some(mut path) = find_path(node.children(), id) {
            path.insert(0, node.id().clone());
            return Some(path);
        }
    }
    None
}

/// Applies `f` to the first node with `id`. Other nodes are returned as they were.
pub fn update_item<T, F>(nodes: Vec<TreeNode<T>>, id: &NodeId, f: F) -> Vec<TreeNode<T>>
where
    F: FnOnce(&mut TreeNode<T>),
{
    let mut f = Some(f);
    update_in(nodes, id, &mut f)
}

fn update_in<T, F>(nodes: Vec<TreeNode<T>>, id: &NodeId, f: &mut Option<F>) -> Vec<TreeNode<T>>
where
    F: FnOnce(&mut TreeNode<T>),
{
    nodes
        .into_iter()
        .map(|mut node| {
            if f.is_none() {
                return node;
            }
            if node.id() == id {
                if let Some(f) = f.take() {
                    f(&mut node);
                }
                return node;
            }
            if node.has_children() {
                let children = std::mem::take(node.children_mut());
                *node.children_mut() = update_in(children, id, f);
            }
            node
        })
        .collect()
}

/// Replaces one field of the node with `id`.
///
/// `field` selects the field (for example [`TreeNode::collapsed_mut`]); `updater` maps the old
/// value to the new one.
///
/// ```
/// use canopy::model::{NodeId, TreeNode};
/// use canopy::ops::{find_item_deep, set_property};
///
/// let id = NodeId::new("a").unwrap();
/// let tree = vec![TreeNode::new(id.clone(), "A", ()).with_collapsed(true)];
/// let tree = set_property(tree, &id, TreeNode::collapsed_mut, |_| false);
/// assert!(!find_item_deep(&tree, &id).unwrap().collapsed());
/// ```
pub fn set_property<T, V, U>(
    nodes: Vec<TreeNode<T>>,
    id: &NodeId,
    field: fn(&mut TreeNode<T>) -> &mut V,
    updater: U,
) -> Vec<TreeNode<T>>
where
    U: FnOnce(&V) -> V,
{
    update_item(nodes, id, |node| {
        let slot = field(node);
        *slot = updater(&*slot);
    })
}

/// Removes the node with `id` and its whole subtree.
pub fn remove_item<T>(nodes: Vec<TreeNode<T>>, id: &NodeId) -> Vec<TreeNode<T>> {
    nodes
        .into_iter()
        .filter(|node| node.id() != id)
        .map(|mut node| {
            if node.has_children() {
                let children = std::mem::take(node.children_mut());
                *node.children_mut() = remove_item(children, id);
            }
            node
        })
        .collect()
}

/// Sets the collapse flag on every node. Leaves get it too; it just has no visible effect there.
pub fn collapsed_all<T>(nodes: Vec<TreeNode<T>>, collapsed: bool) -> Vec<TreeNode<T>> {
    nodes
        .into_iter()
        .map(|mut node| {
            *node.collapsed_mut() = collapsed;
            let children = std::mem::take(node.children_mut());
            *node.children_mut() = collapsed_all(children, collapsed);
            node
        })
        .collect()
}
