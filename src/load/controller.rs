// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::source::ParentScope;
use crate::model::{LoadState, TreeNode};

/// Handle for one in-flight fetch.
///
/// Only the most recent ticket for a scope may settle it; older tickets are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    scope: ParentScope,
    seq: u64,
}

impl LoadTicket {
    pub fn scope(&self) -> &ParentScope {
        &self.scope
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Handle for one keyword search. Only the latest generation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    keyword: String,
    generation: u64,
}

impl SearchTicket {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Whether a completion changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Completion {
    Applied,
    /// A newer request for the same scope (or a newer keyword) was issued meanwhile.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    state: LoadState,
    seq: u64,
}

/// Per-scope loading state machine.
///
/// `Unloaded -> Loading -> Loaded`, and `Loading -> Failed -> Loading` on retry. State lives
/// here rather than on tree nodes, so it survives tree rebuilds and is stamped back onto the
/// nodes afterwards.
#[derive(Debug, Default)]
pub struct LoadController {
    slots: HashMap<ParentScope, Slot>,
    next_seq: u64,
    search_generation: u64,
}

impl LoadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, scope: &ParentScope) -> LoadState {
        self.slots.get(scope).map_or(LoadState::Unloaded, |slot| slot.state)
    }

    /// Moves `scope` to `Loading` and supersedes any fetch already in flight for it.
    pub fn begin(&mut self, scope: ParentScope) -> LoadTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.slots.insert(scope.clone(), Slot { state: LoadState::Loading, seq });
        LoadTicket { scope, seq }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.slots
            .get(&ticket.scope)
            .is_some_and(|slot| slot.seq == ticket.seq && slot.state == LoadState::Loading)
    }

    pub fn succeed(&mut self, ticket: &LoadTicket) -> Completion {
        self.settle(ticket, LoadState::Loaded)
    }

    pub fn fail(&mut self, ticket: &LoadTicket) -> Completion {
        self.settle(ticket, LoadState::Failed)
    }

    fn settle(&mut self, ticket: &LoadTicket, state: LoadState) -> Completion {
        if !self.is_current(ticket) {
            tracing::trace!(scope = %ticket.scope, seq = ticket.seq, "ignoring stale fetch result");
            return Completion::Stale;
        }
        if let Some(slot) = self.slots.get_mut(&ticket.scope) {
            slot.state = state;
        }
        Completion::Applied
    }

    /// Starts a new search generation; every older [`SearchTicket`] becomes stale.
    pub fn begin_search(&mut self, keyword: impl Into<String>) -> SearchTicket {
        self.search_generation += 1;
        SearchTicket { keyword: keyword.into(), generation: self.search_generation }
    }

    /// Invalidates any search in flight without starting a new one.
    pub fn cancel_search(&mut self) {
        self.search_generation += 1;
    }

    pub fn is_latest_search(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.search_generation
    }

    /// Writes the tracked state of every node onto `nodes`. Untracked nodes become `Unloaded`.
    pub fn stamp<T>(&self, nodes: Vec<TreeNode<T>>) -> Vec<TreeNode<T>> {
        nodes
            .into_iter()
            .map(|mut node| {
                let scope = ParentScope::Node(node.id().clone());
                *node.load_state_mut() = self.state(&scope);
                let children = std::mem::take(node.children_mut());
                *node.children_mut() = self.stamp(children);
                node
            })
            .collect()
    }
}
