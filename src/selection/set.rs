// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::NodeId;

/// Ordered set of selected ids.
///
/// Insertion order is kept because it is the order tokens are shown in. Ids are never pruned
/// implicitly: an id stays selected until it is removed or the set is cleared, whether or not the
/// tree currently knows about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.members.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }

    /// Appends `id` unless it is already selected.
    pub fn insert(&mut self, id: NodeId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn remove(&mut self, id: &NodeId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|selected| selected != id);
        true
    }

    /// Appends every id not yet selected, keeping the batch order. Returns how many were added.
    pub fn insert_all(&mut self, ids: impl IntoIterator<Item = NodeId>) -> usize {
        let before = self.order.len();
        for id in ids {
            self.insert(id);
        }
        self.order.len() - before
    }

    /// Removes exactly the given ids in one pass. Returns how many were selected.
    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) -> usize {
        let before = self.order.len();
        for id in ids {
            self.members.remove(id);
        }
        let members = &self.members;
        self.order.retain(|selected| members.contains(selected));
        before - self.order.len()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

impl FromIterator<NodeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.insert_all(iter);
        set
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
