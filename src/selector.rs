// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stateful selector: the surface an enclosing widget talks to.
//!
//! The selector owns every record seen so far and rebuilds its tree from that whole set after
//! each fetch, so fetches may complete in any order. Remote work is split in two halves:
//! `begin_*` returns a ticket and the query to send, `complete_*` applies the answer unless a
//! newer request made it stale. The `async` helpers just await a [`NodeSource`] in between.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::SelectorConfig;
use crate::load::{
    Completion, FetchError, FetchPage, FetchQuery, LoadController, LoadTicket, NodeSource,
    ParentScope, SearchTicket,
};
use crate::model::{IdError, LoadState, NodeId, NodeRecord, Passthrough, TreeNode};
use crate::ops::{collapsed_all, find_item_deep, set_property};
use crate::query;
use crate::selection::{self, reconcile, Reconciled, SelectionSet};
use crate::tree::{flatten, visible_rows, TreeBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Pending { keyword: String },
    Ready { keyword: String, has_match: bool },
    /// The source failed; distinct from a search that found nothing.
    Failed { keyword: String, error: FetchError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    UnknownNode(NodeId),
    InvalidId(IdError),
    Fetch(FetchError),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown node: {id}"),
            Self::InvalidId(err) => write!(f, "invalid node id: {err}"),
            Self::Fetch(err) => write!(f, "fetch failed: {err}"),
        }
    }
}

impl std::error::Error for SelectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownNode(_) => None,
            Self::InvalidId(err) => Some(err),
            Self::Fetch(err) => Some(err),
        }
    }
}

impl From<IdError> for SelectorError {
    fn from(err: IdError) -> Self {
        Self::InvalidId(err)
    }
}

impl From<FetchError> for SelectorError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

/// A fetch to run for the roots or for one node's children.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub query: FetchQuery,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub query: FetchQuery,
}

#[derive(Debug)]
pub struct Selector<T = Passthrough> {
    config: SelectorConfig,
    builder: TreeBuilder,
    records: Vec<NodeRecord<T>>,
    positions: HashMap<NodeId, usize>,
    labels: HashMap<NodeId, String>,
    tree: Vec<TreeNode<T>>,
    // Tree built from the last keyword batch; shown instead of `tree` while set.
    search_view: Option<Vec<TreeNode<T>>>,
    selection: SelectionSet,
    include_descendants: bool,
    loads: LoadController,
    search_status: SearchStatus,
}

impl<T: Clone> Default for Selector<T> {
    fn default() -> Self {
        Self::new(SelectorConfig::default())
    }
}

impl<T: Clone> Selector<T> {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            builder: TreeBuilder::new().collapsed(config.collapsed_by_default),
            include_descendants: config.include_descendants,
            config,
            records: Vec::new(),
            positions: HashMap::new(),
            labels: HashMap::new(),
            tree: Vec::new(),
            search_view: None,
            selection: SelectionSet::new(),
            loads: LoadController::new(),
            search_status: SearchStatus::Idle,
        }
    }

    /// Seeds the record set, for callers that already hold a batch.
    pub fn with_records(mut self, records: impl IntoIterator<Item = NodeRecord<T>>) -> Self {
        self.merge(records);
        self.rebuild();
        self
    }

    /// Seeds the selection. Ids need not be known to the tree.
    pub fn with_selection(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.selection.insert_all(ids);
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// The tree currently shown: the keyword view while one is active, the main tree otherwise.
    pub fn tree(&self) -> &[TreeNode<T>] {
        self.search_view.as_deref().unwrap_or(&self.tree)
    }

    pub fn records(&self) -> &[NodeRecord<T>] {
        &self.records
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn include_descendants(&self) -> bool {
        self.include_descendants
    }

    pub fn search_status(&self) -> &SearchStatus {
        &self.search_status
    }

    pub fn has_search_match(&self) -> bool {
        matches!(self.search_status, SearchStatus::Ready { has_match: true, .. })
    }

    pub fn is_search_view(&self) -> bool {
        self.search_view.is_some()
    }

    pub fn load_state(&self, id: &NodeId) -> LoadState {
        self.loads.state(&ParentScope::Node(id.clone()))
    }

    pub fn roots_state(&self) -> LoadState {
        self.loads.state(&ParentScope::Root)
    }

    /// Visible rows followed by detached selections, plus the selection tokens.
    pub fn render(&self) -> Reconciled<'_, T> {
        reconcile(&self.selection, visible_rows(self.tree()), &self.labels)
    }

    pub fn select(&mut self, id: &NodeId) -> usize {
        let nodes = cascade_tree(&self.tree, self.search_view.as_deref(), id);
        selection::select(&mut self.selection, nodes, id, self.include_descendants)
    }

    pub fn deselect(&mut self, id: &NodeId) -> usize {
        let nodes = cascade_tree(&self.tree, self.search_view.as_deref(), id);
        selection::deselect(&mut self.selection, nodes, id, self.include_descendants)
    }

    /// Selects `id` if it is not selected, deselects it otherwise. Returns the new state.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if self.selection.contains(id) {
            self.deselect(id);
            false
        } else {
            self.select(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_include_descendants(&mut self, enabled: bool) {
        self.include_descendants = enabled;
    }

    pub fn collapse(&mut self, id: &NodeId) -> Result<(), SelectorError> {
        self.require(id)?;
        self.map_tree(|nodes| set_property(nodes, id, TreeNode::collapsed_mut, |_| true));
        Ok(())
    }

    pub fn collapse_all(&mut self) {
        self.map_tree(|nodes| collapsed_all(nodes, true));
    }

    /// Opens every loaded node. Never fetches.
    pub fn expand_all(&mut self) {
        self.map_tree(|nodes| collapsed_all(nodes, false));
    }

    /// Starts expanding `id`.
    ///
    /// Returns a request when the node's children must be fetched first. Otherwise the node is
    /// opened right away, or left alone while a fetch for it is already in flight. Nodes of
    /// the keyword view never fetch.
    pub fn begin_expand(&mut self, id: &NodeId) -> Result<Option<LoadRequest>, SelectorError> {
        let (needs_fetch, loading) = {
            let node = self.require(id)?;
            (node.needs_fetch(), node.is_loading())
        };
        if loading {
            return Ok(None);
        }

        if needs_fetch && self.search_view.is_none() {
            let ticket = self.loads.begin(ParentScope::Node(id.clone()));
            let tree = std::mem::take(&mut self.tree);
            self.tree = set_property(tree, id, TreeNode::load_state_mut, |_| LoadState::Loading);
            return Ok(Some(LoadRequest { ticket, query: FetchQuery::children(id.clone()) }));
        }

        self.map_tree(|nodes| set_property(nodes, id, TreeNode::collapsed_mut, |_| false));
        Ok(None)
    }

    pub fn begin_load_roots(&mut self) -> LoadRequest {
        LoadRequest { ticket: self.loads.begin(ParentScope::Root), query: FetchQuery::roots() }
    }

    /// Applies the answer to a [`LoadRequest`].
    ///
    /// On success the records join the accumulated set, the tree is rebuilt from the union and
    /// the expanded node opens. On failure the node is marked failed, its collapse state is
    /// kept and the error is returned. Stale tickets change nothing.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<FetchPage<T>, FetchError>,
    ) -> Result<Completion, SelectorError> {
        match result {
            Ok(page) => {
                if self.loads.succeed(ticket) == Completion::Stale {
                    return Ok(Completion::Stale);
                }
                self.merge(page.entries);
                self.rebuild();
                if let ParentScope::Node(id) = ticket.scope() {
                    let tree = std::mem::take(&mut self.tree);
                    self.tree = set_property(tree, id, TreeNode::collapsed_mut, |_| false);
                }
                Ok(Completion::Applied)
            }
            Err(error) => {
                if self.loads.fail(ticket) == Completion::Stale {
                    return Ok(Completion::Stale);
                }
                tracing::warn!(scope = %ticket.scope(), %error, "fetch failed");
                let tree = std::mem::take(&mut self.tree);
                self.tree = self.loads.stamp(tree);
                Err(SelectorError::Fetch(error))
            }
        }
    }

    /// Searches the loaded tree only, expanding the ancestors of every match.
    pub fn search_local(&mut self, keyword: &str) -> bool {
        self.clear_search();
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }

        let outcome = query::search(std::mem::take(&mut self.tree), keyword);
        self.tree = outcome.tree;
        self.search_status =
            SearchStatus::Ready { keyword: keyword.to_owned(), has_match: outcome.has_match };
        outcome.has_match
    }

    /// Starts a keyword search against the source. A blank keyword clears the search instead.
    pub fn begin_search(&mut self, keyword: &str) -> Option<SearchRequest> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.clear_search();
            return None;
        }

        let ticket = self.loads.begin_search(keyword);
        self.search_status = SearchStatus::Pending { keyword: keyword.to_owned() };
        let query = FetchQuery::search(keyword).with_limit(self.config.search_limit);
        Some(SearchRequest { ticket, query })
    }

    /// Applies a keyword batch unless a newer keyword was issued meanwhile.
    ///
    /// The batch is shown as its own tree, completed with already known ancestor records, and
    /// the paths to name matches are expanded. The batch is not merged into the main tree;
    /// its labels are kept so selections made from it still read well once it is gone.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<FetchPage<T>, FetchError>,
    ) -> Completion {
        if !self.loads.is_latest_search(ticket) {
            tracing::trace!(
                keyword = ticket.keyword(),
                generation = ticket.generation(),
                "ignoring stale search result"
            );
            return Completion::Stale;
        }

        let keyword = ticket.keyword().to_owned();
        match result {
            Ok(page) => {
                for record in &page.entries {
                    self.labels.insert(record.id().clone(), record.name().to_owned());
                }
                // The source decides what matches; an empty page is the only "no results".
                let found = !page.entries.is_empty();
                let view = self.search_batch_tree(page.entries);
                let outcome = query::search(view, &keyword);
                self.search_view = Some(outcome.tree);
                self.search_status =
                    SearchStatus::Ready { keyword, has_match: found || outcome.has_match };
            }
            Err(error) => {
                tracing::warn!(keyword = %keyword, %error, "search fetch failed");
                self.search_view = None;
                self.search_status = SearchStatus::Failed { keyword, error };
            }
        }
        Completion::Applied
    }

    /// Leaves the keyword view and drops any search still in flight.
    pub fn clear_search(&mut self) {
        self.loads.cancel_search();
        self.search_view = None;
        self.search_status = SearchStatus::Idle;
    }

    fn require(&self, id: &NodeId) -> Result<&TreeNode<T>, SelectorError> {
        find_item_deep(self.tree(), id).ok_or_else(|| SelectorError::UnknownNode(id.clone()))
    }

    fn map_tree(&mut self, f: impl FnOnce(Vec<TreeNode<T>>) -> Vec<TreeNode<T>>) {
        let slot = match &mut self.search_view {
            Some(view) => view,
            None => &mut self.tree,
        };
        let nodes = std::mem::take(slot);
        *slot = f(nodes);
    }

    /// Adds records to the accumulated set. A record whose id is already known replaces it.
    fn merge(&mut self, records: impl IntoIterator<Item = NodeRecord<T>>) {
        for record in records {
            self.labels.insert(record.id().clone(), record.name().to_owned());
            match self.positions.get(record.id()) {
                Some(&at) => {
                    tracing::trace!(id = %record.id(), "replacing record with newer copy");
                    self.records[at] = record;
                }
                None => {
                    self.positions.insert(record.id().clone(), self.records.len());
                    self.records.push(record);
                }
            }
        }
    }

    /// Rebuilds the main tree from every record, keeping known nodes' collapse flags.
    fn rebuild(&mut self) {
        let previous = flatten(&self.tree)
            .iter()
            .map(|row| (row.id().clone(), row.collapsed()))
            .collect::<HashMap<_, _>>();

        let report = self.builder.build_report(self.records.iter().cloned());
        tracing::debug!(
            records = self.records.len(),
            unattached = report.unattached.len(),
            malformed = report.malformed.len(),
            "rebuilt tree"
        );

        let tree = restore_collapsed(report.tree, &previous);
        self.tree = self.loads.stamp(tree);
    }

    /// Tree for a keyword batch, completed with known ancestor records.
    ///
    /// A path is kept from just below its deepest ancestor that is neither in the batch nor
    /// known, so a hit whose ancestors are missing becomes a top-level row instead of being
    /// dropped.
    fn search_batch_tree(&self, entries: Vec<NodeRecord<T>>) -> Vec<TreeNode<T>> {
        let batch = entries.iter().map(|record| record.id().clone()).collect::<HashSet<_>>();
        let available = |id: &NodeId| batch.contains(id) || self.positions.contains_key(id);
        let mut seen = HashSet::new();
        let mut ancestors = Vec::new();
        let mut hits = Vec::with_capacity(entries.len());

        for entry in entries {
            let Ok(path) = entry.path() else {
                hits.push(entry);
                continue;
            };
            let segments = path.segments();
            let parent_end = segments.len() - 1;
            let start = segments[..parent_end]
                .iter()
                .rposition(|id| !available(id))
                .map_or(0, |missing| missing + 1);

            for (offset, ancestor) in segments[start..parent_end].iter().enumerate() {
                if batch.contains(ancestor) || !seen.insert(ancestor.clone()) {
                    continue;
                }
                if let Some(&at) = self.positions.get(ancestor) {
                    let anchored = join_path(&segments[start..=start + offset]);
                    ancestors.push(self.records[at].clone().with_ancestor_path(anchored));
                }
            }

            if start == 0 {
                hits.push(entry);
            } else {
                tracing::debug!(
                    id = %entry.id(),
                    missing = %segments[start - 1],
                    "showing search hit without its unknown ancestors"
                );
                hits.push(entry.with_ancestor_path(join_path(&segments[start..])));
            }
        }

        ancestors.extend(hits);
        self.builder.build(ancestors)
    }
}

impl<T: Clone + Send> Selector<T> {
    pub async fn load_roots<S>(&mut self, source: &S) -> Result<Completion, SelectorError>
    where
        S: NodeSource<T> + ?Sized,
    {
        let request = self.begin_load_roots();
        let result = source.fetch_nodes(request.query).await;
        self.complete_load(&request.ticket, result)
    }

    /// Expands `id`, fetching its children first when needed.
    pub async fn expand<S>(&mut self, source: &S, id: &NodeId) -> Result<Completion, SelectorError>
    where
        S: NodeSource<T> + ?Sized,
    {
        match self.begin_expand(id)? {
            Some(request) => {
                let result = source.fetch_nodes(request.query).await;
                self.complete_load(&request.ticket, result)
            }
            None => Ok(Completion::Applied),
        }
    }

    pub async fn search<S>(&mut self, source: &S, keyword: &str) -> Completion
    where
        S: NodeSource<T> + ?Sized,
    {
        match self.begin_search(keyword) {
            Some(request) => {
                let result = source.fetch_nodes(request.query).await;
                self.complete_search(&request.ticket, result)
            }
            None => Completion::Applied,
        }
    }
}

/// Tree to resolve a cascade against: the shown tree if it knows `id`, else the main tree.
fn join_path(segments: &[NodeId]) -> String {
    segments.iter().map(NodeId::as_str).collect::<Vec<_>>().join("/")
}

fn cascade_tree<'a, T>(
    tree: &'a [TreeNode<T>],
    view: Option<&'a [TreeNode<T>]>,
    id: &NodeId,
) -> &'a [TreeNode<T>] {
    match view {
        Some(view) if find_item_deep(view, id).is_some() => view,
        _ => tree,
    }
}

fn restore_collapsed<T>(
    nodes: Vec<TreeNode<T>>,
    previous: &HashMap<NodeId, bool>,
) -> Vec<TreeNode<T>> {
    nodes
        .into_iter()
        .map(|mut node| {
            if let Some(&collapsed) = previous.get(node.id()) {
                *node.collapsed_mut() = collapsed;
            }
            let children = std::mem::take(node.children_mut());
            *node.children_mut() = restore_collapsed(children, previous);
            node
        })
        .collect()
}

#[cfg(test)]
mod tests;
