// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::NodeId;
use super::record::NodeRecord;

/// Lazy-loading state of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        })
    }
}

/// A node of the nested tree. Children are owned by value, so a node has exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    id: NodeId,
    name: String,
    kind: Option<String>,
    can_expand: bool,
    payload: T,
    children: Vec<TreeNode<T>>,
    collapsed: bool,
    load_state: LoadState,
}

impl<T> TreeNode<T> {
    pub fn new(id: NodeId, name: impl Into<String>, payload: T) -> Self {
        Self {
            id,
            name: name.into(),
            kind: None,
            can_expand: false,
            payload,
            children: Vec::new(),
            collapsed: false,
            load_state: LoadState::Unloaded,
        }
    }

    /// A record with `can_expand` unset is expandable; the source decides whether it has
    /// children once asked.
    pub fn from_record(record: NodeRecord<T>) -> Self {
        let (id, name, kind, can_expand, payload) = record.into_parts();
        let mut node = Self::new(id, name, payload);
        node.kind = kind;
        node.can_expand = can_expand.unwrap_or(true);
        node
    }

    pub fn with_children(mut self, children: Vec<TreeNode<T>>) -> Self {
        self.children = children;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn with_can_expand(mut self, can_expand: bool) -> Self {
        self.can_expand = can_expand;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_mut(&mut self) -> &mut String {
        &mut self.name
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn can_expand(&self) -> bool {
        self.can_expand
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    pub fn children(&self) -> &[TreeNode<T>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode<T>> {
        &mut self.children
    }

    pub fn into_children(self) -> Vec<TreeNode<T>> {
        self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn collapsed_mut(&mut self) -> &mut bool {
        &mut self.collapsed
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn load_state_mut(&mut self) -> &mut LoadState {
        &mut self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// True when expanding this node needs a fetch before anything can be shown.
    pub fn needs_fetch(&self) -> bool {
        self.children.is_empty()
            && self.can_expand
            && matches!(self.load_state, LoadState::Unloaded | LoadState::Failed)
    }
}
