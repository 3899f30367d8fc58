// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::model::{NodeId, NodeRecord, PathError, TreeNode};

/// Assembles a nested tree from flat records using their ancestor paths.
///
/// Records are grouped by path depth and linked level by level, deepest first, so every node
/// receives its complete child list before it is attached to its own parent. A record whose
/// parent is not part of the batch is dropped together with its subtree; see
/// [`BuildReport::unattached`]. Callers that keep the full record set and rebuild from it get
/// those records back as soon as the parent arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    collapsed: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self { collapsed: true }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial collapse flag for every built node.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn build<T>(&self, records: impl IntoIterator<Item = NodeRecord<T>>) -> Vec<TreeNode<T>> {
        self.build_report(records).tree
    }

    pub fn build_report<T>(
        &self,
        records: impl IntoIterator<Item = NodeRecord<T>>,
    ) -> BuildReport<T> {
        let mut levels: Vec<Vec<(Option<NodeId>, NodeRecord<T>)>> = Vec::new();
        let mut malformed = Vec::new();

        for record in records {
            match record.path() {
                Ok(path) => {
                    let depth = path.depth();
                    if levels.len() < depth {
                        levels.resize_with(depth, Vec::new);
                    }
                    levels[depth - 1].push((path.parent().cloned(), record));
                }
                Err(err) => malformed.push((record.id().clone(), err)),
            }
        }

        let mut roots = Vec::new();
        let mut unattached = Vec::new();
        let mut pending: HashMap<NodeId, Vec<TreeNode<T>>> = HashMap::new();

        for level in levels.into_iter().rev() {
            let mut by_parent: HashMap<NodeId, Vec<TreeNode<T>>> = HashMap::new();
            for (parent, record) in level {
                let children = pending.remove(record.id()).unwrap_or_default();
                let node = TreeNode::from_record(record)
                    .with_children(children)
                    .with_collapsed(self.collapsed);
                match parent {
                    Some(parent) => by_parent.entry(parent).or_default().push(node),
                    None => roots.push(node),
                }
            }

            // Whatever is still pending found no parent one level up.
            for orphans in pending.into_values() {
                collect_ids(&orphans, &mut unattached);
            }
            pending = by_parent;
        }
        unattached.sort();

        if !unattached.is_empty() || !malformed.is_empty() {
            tracing::debug!(
                unattached = unattached.len(),
                malformed = malformed.len(),
                "dropped records while building tree"
            );
        }

        BuildReport { tree: roots, unattached, malformed }
    }
}

/// Builds with the default options (all nodes collapsed).
pub fn build_tree<T>(records: impl IntoIterator<Item = NodeRecord<T>>) -> Vec<TreeNode<T>> {
    TreeBuilder::default().build(records)
}

/// Result of a build, including what was left out of the tree.
#[derive(Debug, Clone)]
pub struct BuildReport<T> {
    pub tree: Vec<TreeNode<T>>,
    /// Records (and their descendants) whose parent was not in the batch. Sorted.
    pub unattached: Vec<NodeId>,
    /// Records skipped because their ancestor path could not be used.
    pub malformed: Vec<(NodeId, PathError)>,
}

impl<T> BuildReport<T> {
    pub fn into_tree(self) -> Vec<TreeNode<T>> {
        self.tree
    }
}

fn collect_ids<T>(nodes: &[TreeNode<T>], out: &mut Vec<NodeId>) {
    for node in nodes {
        out.push(node.id().clone());
        collect_ids(node.children(), out);
    }
}
