// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::flatten::FlatRow;
use crate::model::{NodeId, TreeNode};

/// Drops every row that sits below a collapsed node.
///
/// `rows` must be in preorder. A row whose parent is hidden is dropped, and if it has children
/// it is hidden in turn, so whole subtrees disappear in a single pass. Collapsed rows themselves
/// stay visible.
pub fn remove_children_of<'a, 'b, T>(
    rows: Vec<FlatRow<'a, T>>,
    collapsed_ids: impl IntoIterator<Item = &'b NodeId>,
) -> Vec<FlatRow<'a, T>>
where
    'a: 'b,
{
    let mut hidden: HashSet<&'b NodeId> = collapsed_ids.into_iter().collect();
    let mut visible = Vec::with_capacity(rows.len());

    for row in rows {
        if row.parent_id().is_some_and(|parent| hidden.contains(parent)) {
            if row.has_children() {
                hidden.insert(row.id());
            }
            continue;
        }
        visible.push(row);
    }

    visible
}

/// Ids of collapsed nodes that have something to hide, in preorder.
pub fn collapsed_ids<T>(nodes: &[TreeNode<T>]) -> Vec<&NodeId> {
    let mut out = Vec::new();
    push_collapsed(nodes, &mut out);
    out
}

fn push_collapsed<'a, T>(nodes: &'a [TreeNode<T>], out: &mut Vec<&'a NodeId>) {
    for node in nodes {
        if node.collapsed() && node.has_children() {
            out.push(node.id());
        }
        push_collapsed(node.children(), out);
    }
}
