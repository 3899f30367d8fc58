// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{NodeId, NodeRecord, Passthrough};
use crate::query::KeywordMatcher;

/// Which part of the hierarchy a fetch is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentScope {
    /// The initial root batch.
    Root,
    /// Anywhere in the hierarchy; used together with a keyword.
    Any,
    /// Direct children of one node.
    Node(NodeId),
}

impl fmt::Display for ParentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Any => f.write_str("<any>"),
            Self::Node(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub parent: ParentScope,
    pub keyword: Option<String>,
    pub limit: Option<usize>,
}

impl FetchQuery {
    pub fn roots() -> Self {
        Self { parent: ParentScope::Root, keyword: None, limit: None }
    }

    pub fn children(id: NodeId) -> Self {
        Self { parent: ParentScope::Node(id), keyword: None, limit: None }
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self { parent: ParentScope::Any, keyword: Some(keyword.into()), limit: None }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchPage<T = Passthrough> {
    pub entries: Vec<NodeRecord<T>>,
}

impl<T> FetchPage<T> {
    pub fn new(entries: Vec<NodeRecord<T>>) -> Self {
        Self { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source could not answer; retrying may help.
    Unavailable { scope: ParentScope, reason: String },
    /// The source rejected the query itself.
    Rejected { reason: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { scope, reason } => {
                write!(f, "node source unavailable (scope={scope}): {reason}")
            }
            Self::Rejected { reason } => write!(f, "node source rejected query: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Remote capability that hands out batches of records.
///
/// Timeouts and cancellation belong to the implementation; callers simply await the page.
#[async_trait]
pub trait NodeSource<T: Send = Passthrough>: Send + Sync {
    async fn fetch_nodes(&self, query: FetchQuery) -> Result<FetchPage<T>, FetchError>;
}

/// In-memory [`NodeSource`] over a fixed record list.
///
/// Serves roots, direct children, and keyword matches together with their ancestors. Failures
/// can be scheduled per scope, which is how retry paths are exercised.
#[derive(Debug)]
pub struct MemorySource<T = Passthrough> {
    records: Vec<NodeRecord<T>>,
    index: HashMap<NodeId, usize>,
    failures: Mutex<HashSet<ParentScope>>,
    calls: AtomicUsize,
}

impl<T> MemorySource<T> {
    pub fn new(records: Vec<NodeRecord<T>>) -> Self {
        let index =
            records.iter().enumerate().map(|(at, record)| (record.id().clone(), at)).collect();
        Self { records, index, failures: Mutex::new(HashSet::new()), calls: AtomicUsize::new(0) }
    }

    /// Makes the next fetch for `scope` fail once.
    pub fn fail_next(&self, scope: ParentScope) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(scope);
        }
    }

    /// Number of `fetch_nodes` calls served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn take_failure(&self, scope: &ParentScope) -> bool {
        self.failures.lock().map(|mut failures| failures.remove(scope)).unwrap_or(false)
    }

    fn parent_of(record: &NodeRecord<T>) -> Option<NodeId> {
        record.path().ok().and_then(|path| path.parent().cloned())
    }

    fn select(&self, query: &FetchQuery) -> Vec<usize> {
        let matcher = query.keyword.as_deref().and_then(KeywordMatcher::new);
        let in_scope = |record: &NodeRecord<T>| match &query.parent {
            ParentScope::Root => record.path().is_ok_and(|path| path.depth() == 1),
            ParentScope::Any => true,
            ParentScope::Node(id) => Self::parent_of(record).as_ref() == Some(id),
        };

        let limit = query.limit.unwrap_or(usize::MAX);
        let hits = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| in_scope(record))
            .filter(|(_, record)| matcher.as_ref().map_or(true, |m| m.is_match(record.name())))
            .map(|(at, _)| at)
            .take(limit)
            .collect::<Vec<_>>();

        if matcher.is_none() {
            return hits;
        }

        // Keyword hits travel with their ancestors so the batch forms complete paths.
        let mut picked = hits.iter().copied().collect::<HashSet<_>>();
        for &at in &hits {
            if let Ok(path) = self.records[at].path() {
                picked.extend(path.ancestors().iter().filter_map(|id| self.index.get(id).copied()));
            }
        }
        let mut picked = picked.into_iter().collect::<Vec<_>>();
        picked.sort_unstable();
        picked
    }
}

#[async_trait]
impl<T> NodeSource<T> for MemorySource<T>
where
    T: Clone + Send + Sync,
{
    async fn fetch_nodes(&self, query: FetchQuery) -> Result<FetchPage<T>, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.take_failure(&query.parent) {
            return Err(FetchError::Unavailable {
                scope: query.parent,
                reason: "scheduled failure".to_owned(),
            });
        }
        if query.parent == ParentScope::Any && query.keyword.is_none() {
            let reason = "wildcard parent needs a keyword".to_owned();
            return Err(FetchError::Rejected { reason });
        }

        let entries = self.select(&query).into_iter().map(|at| self.records[at].clone()).collect();
        Ok(FetchPage { entries })
    }
}
