// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::set::SelectionSet;
use crate::model::{NodeId, TreeNode};
use crate::ops::find_item_deep;
use crate::tree::flatten_from;

/// `id` followed by every loaded descendant, in preorder.
///
/// Collapse state is ignored. Children that have not been fetched yet are not included, so the
/// result only covers what is materialized. An unknown id yields an empty list.
pub fn descendants_of<T>(nodes: &[TreeNode<T>], id: &NodeId) -> Vec<NodeId> {
    let Some(node) = find_item_deep(nodes, id) else {
        return Vec::new();
    };
    flatten_from(std::slice::from_ref(node), None, 0).iter().map(|row| row.id().clone()).collect()
}

/// Selects `id`, plus its loaded descendants when `include_descendants` is set.
///
/// Ids the tree does not know are still selected; they render as detached tokens. Returns the
/// number of newly selected ids.
pub fn select<T>(
    selection: &mut SelectionSet,
    nodes: &[TreeNode<T>],
    id: &NodeId,
    include_descendants: bool,
) -> usize {
    if !include_descendants {
        return usize::from(selection.insert(id.clone()));
    }

    let mut batch = descendants_of(nodes, id);
    if batch.is_empty() {
        batch.push(id.clone());
    }
    selection.insert_all(batch)
}

/// Inverse of [`select`]: removes `id` and, in cascade mode, exactly the set [`select`] would add.
pub fn deselect<T>(
    selection: &mut SelectionSet,
    nodes: &[TreeNode<T>],
    id: &NodeId,
    include_descendants: bool,
) -> usize {
    if !include_descendants {
        return usize::from(selection.remove(id));
    }

    let mut batch = descendants_of(nodes, id);
    if batch.is_empty() {
        batch.push(id.clone());
    }
    selection.remove_all(&batch)
}
