// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::{Regex, RegexBuilder};

use crate::model::{NodeId, TreeNode};

/// Case-insensitive literal substring matcher for node names.
///
/// The keyword is escaped before it becomes a pattern, so input such as `(`, `[` or `.` is
/// matched literally. Neither side needs to be normalized beforehand.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    needle: Needle,
}

#[derive(Debug, Clone)]
enum Needle {
    Regex(Regex),
    // Keywords too large for the regex size limit.
    Lowercase(String),
}

impl KeywordMatcher {
    /// Returns `None` for a blank keyword, which disables matching altogether.
    pub fn new(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }

        let needle = match RegexBuilder::new(&regex::escape(keyword)).case_insensitive(true).build()
        {
            Ok(regex) => Needle::Regex(regex),
            Err(err) => {
                tracing::debug!(%err, "keyword regex rejected; using lowercase substring match");
                Needle::Lowercase(keyword.to_lowercase())
            }
        };
        Some(Self { keyword: keyword.to_owned(), needle })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.needle {
            Needle::Regex(regex) => regex.is_match(name),
            Needle::Lowercase(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Result of [`search`]: the updated tree plus what the search found.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    pub tree: Vec<TreeNode<T>>,
    /// True if any node name matched.
    pub has_match: bool,
    /// Nodes whose own name matched, in preorder.
    pub matched: Vec<NodeId>,
    /// Ancestors of matches whose `collapsed` flag was forced to `false`, in preorder.
    pub expanded: Vec<NodeId>,
}

/// Matches node names against `keyword` and expands every ancestor of a match.
///
/// All subtrees are searched so that every match ends up visible. Nodes that are not ancestors
/// of a match keep their collapse state. A blank keyword returns the tree untouched with
/// `has_match == false`.
pub fn search<T>(nodes: Vec<TreeNode<T>>, keyword: &str) -> SearchOutcome<T> {
    let Some(matcher) = KeywordMatcher::new(keyword) else {
        return SearchOutcome {
            tree: nodes,
            has_match: false,
            matched: Vec::new(),
            expanded: Vec::new(),
        };
    };

    let mut matched = Vec::new();
    let mut expanded = Vec::new();
    let (tree, has_match) = search_in(nodes, &matcher, &mut matched, &mut expanded);
    SearchOutcome { tree, has_match, matched, expanded }
}

fn search_in<T>(
    nodes: Vec<TreeNode<T>>,
    matcher: &KeywordMatcher,
    matched: &mut Vec<NodeId>,
    expanded: &mut Vec<NodeId>,
) -> (Vec<TreeNode<T>>, bool) {
    let mut any = false;
    let nodes = nodes
        .into_iter()
        .map(|mut node| {
            let own_match = matcher.is_match(node.name());
            if own_match {
                matched.push(node.id().clone());
            }

            let mut descendant_match = false;
            if node.has_children() {
                let slot = expanded.len();
                let children = std::mem::take(node.children_mut());
                let (children, hit) = search_in(children, matcher, matched, expanded);
                *node.children_mut() = children;
                if hit {
                    *node.collapsed_mut() = false;
                    expanded.insert(slot, node.id().clone());
                    descendant_match = true;
                }
            }

            any |= own_match || descendant_match;
            node
        })
        .collect();
    (nodes, any)
}
