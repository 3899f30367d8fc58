// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::NodeId;

/// Extra fields carried through from the source without interpretation.
pub type Passthrough = serde_json::Map<String, serde_json::Value>;

/// Raw entity as delivered by a node source.
///
/// `ancestor_path` is the slash-delimited id chain from the root down to (and including) this
/// record. A record without a path is a root. Unknown JSON fields land in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord<T = Passthrough> {
    id: NodeId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ancestor_path: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    can_expand: Option<bool>,
    #[serde(flatten)]
    payload: T,
}

impl<T> NodeRecord<T> {
    pub fn new(id: NodeId, name: impl Into<String>, payload: T) -> Self {
        Self { id, name: name.into(), ancestor_path: None, kind: None, can_expand: None, payload }
    }

    pub fn with_ancestor_path(mut self, path: impl Into<String>) -> Self {
        self.ancestor_path = Some(path.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_can_expand(mut self, can_expand: bool) -> Self {
        self.can_expand = Some(can_expand);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ancestor_path(&self) -> Option<&str> {
        self.ancestor_path.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn can_expand(&self) -> Option<bool> {
        self.can_expand
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub(crate) fn into_parts(self) -> (NodeId, String, Option<String>, Option<bool>, T) {
        (self.id, self.name, self.kind, self.can_expand, self.payload)
    }

    /// Parses the ancestor path and checks that it ends with this record's id.
    pub fn path(&self) -> Result<AncestorPath, PathError> {
        let path = match &self.ancestor_path {
            Some(raw) => AncestorPath::parse(raw)?,
            None => AncestorPath::root(self.id.clone()),
        };
        if path.self_id() != &self.id {
            let last = path.self_id().clone();
            return Err(PathError::MissingSelf { id: self.id.clone(), last });
        }
        Ok(path)
    }
}

/// Parsed ancestor path: root first, the node itself last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AncestorPath {
    segments: SmallVec<[NodeId; 8]>,
}

impl AncestorPath {
    pub fn root(id: NodeId) -> Self {
        let mut segments = SmallVec::new();
        segments.push(id);
        Self { segments }
    }

    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let bytes = raw.as_bytes();
        let mut segments = SmallVec::with_capacity(segment_count(raw));
        let mut start = 0;
        for end in memchr::memchr_iter(b'/', bytes).chain(std::iter::once(bytes.len())) {
            let index = segments.len();
            let segment = NodeId::new(&raw[start..end])
                .map_err(|_| PathError::EmptySegment { index })?;
            segments.push(segment);
            start = end + 1;
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[NodeId] {
        &self.segments
    }

    /// Number of segments; roots have depth 1.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn self_id(&self) -> &NodeId {
        &self.segments[self.segments.len() - 1]
    }

    pub fn parent(&self) -> Option<&NodeId> {
        let len = self.segments.len();
        (len >= 2).then(|| &self.segments[len - 2])
    }

    pub fn ancestors(&self) -> &[NodeId] {
        &self.segments[..self.segments.len() - 1]
    }
}

impl fmt::Display for AncestorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

/// Segment count of a raw path without parsing it.
pub fn segment_count(raw: &str) -> usize {
    memchr::memchr_iter(b'/', raw.as_bytes()).count() + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    EmptySegment { index: usize },
    MissingSelf { id: NodeId, last: NodeId },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("ancestor path must not be empty"),
            Self::EmptySegment { index } => {
                write!(f, "ancestor path has an empty segment (index={index})")
            }
            Self::MissingSelf { id, last } => {
                write!(f, "ancestor path must end with the node id (id={id}, last={last})")
            }
        }
    }
}

impl std::error::Error for PathError {}
