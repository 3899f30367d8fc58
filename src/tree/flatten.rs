// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LoadState, NodeId, TreeNode};

/// One row of a linearized tree.
///
/// Borrows the node it describes; `children` of that node are not part of the row contract.
/// Rows are cheap to rebuild and are meant to be thrown away on every change.
#[derive(Debug)]
pub struct FlatRow<'a, T> {
    node: &'a TreeNode<T>,
    parent_id: Option<&'a NodeId>,
    depth: usize,
}

impl<'a, T> Clone for FlatRow<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for FlatRow<'a, T> {}

impl<'a, T> FlatRow<'a, T> {
    pub fn node(&self) -> &'a TreeNode<T> {
        self.node
    }

    pub fn id(&self) -> &'a NodeId {
        self.node.id()
    }

    pub fn name(&self) -> &'a str {
        self.node.name()
    }

    pub fn payload(&self) -> &'a T {
        self.node.payload()
    }

    pub fn parent_id(&self) -> Option<&'a NodeId> {
        self.parent_id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }

    pub fn collapsed(&self) -> bool {
        self.node.collapsed()
    }

    pub fn load_state(&self) -> LoadState {
        self.node.load_state()
    }
}

/// Preorder walk of the whole forest, roots at depth 0.
pub fn flatten<T>(nodes: &[TreeNode<T>]) -> Vec<FlatRow<'_, T>> {
    flatten_from(nodes, None, 0)
}

/// Preorder walk starting at `depth` under `parent_id`.
///
/// Passing a one-element slice walks a single subtree, which is how subtree lookups reuse the
/// renderer's traversal.
pub fn flatten_from<'a, T>(
    nodes: &'a [TreeNode<T>],
    parent_id: Option<&'a NodeId>,
    depth: usize,
) -> Vec<FlatRow<'a, T>> {
    let mut rows = Vec::new();
    push_rows(nodes, parent_id, depth, &mut rows);
    rows
}

fn push_rows<'a, T>(
    nodes: &'a [TreeNode<T>],
    parent_id: Option<&'a NodeId>,
    depth: usize,
    rows: &mut Vec<FlatRow<'a, T>>,
) {
    for node in nodes {
        rows.push(FlatRow { node, parent_id, depth });
        push_rows(node.children(), Some(node.id()), depth + 1, rows);
    }
}
