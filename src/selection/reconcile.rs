// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::set::SelectionSet;
use crate::model::NodeId;
use crate::tree::FlatRow;

/// One line of the rendered list.
#[derive(Debug, Clone)]
pub enum RenderRow<'a, T> {
    /// A visible tree row.
    Node { row: FlatRow<'a, T>, selected: bool },
    /// A selected id with no visible row (unloaded, collapsed away, or from a search batch).
    Detached { id: NodeId, label: String },
}

impl<'a, T> RenderRow<'a, T> {
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Node { row, .. } => row.id(),
            Self::Detached { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Node { row, .. } => row.name(),
            Self::Detached { label, .. } => label,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Self::Node { selected, .. } => *selected,
            Self::Detached { .. } => true,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached { .. })
    }
}

/// A removable selection tag, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionToken {
    pub id: NodeId,
    pub label: String,
    pub detached: bool,
}

#[derive(Debug, Clone)]
pub struct Reconciled<'a, T> {
    pub rows: Vec<RenderRow<'a, T>>,
    pub tokens: Vec<SelectionToken>,
}

impl<'a, T> Reconciled<'a, T> {
    pub fn detached(&self) -> impl Iterator<Item = &SelectionToken> + '_ {
        self.tokens.iter().filter(|token| token.detached)
    }
}

/// Merges the selection into `rows`.
///
/// Selected ids that have a row mark it selected. The others are appended as
/// [`RenderRow::Detached`] in selection order, labelled from `labels` or, failing that, with the
/// raw id. Every selected id ends up in both `rows` and `tokens`.
pub fn reconcile<'a, T>(
    selection: &SelectionSet,
    rows: Vec<FlatRow<'a, T>>,
    labels: &HashMap<NodeId, String>,
) -> Reconciled<'a, T> {
    let visible: HashMap<&NodeId, &'a str> =
        rows.iter().map(|row| (row.id(), row.name())).collect();

    let tokens = selection
        .iter()
        .map(|id| match visible.get(id) {
            Some(name) => {
                SelectionToken { id: id.clone(), label: (*name).to_owned(), detached: false }
            }
            None => SelectionToken {
                id: id.clone(),
                label: labels.get(id).cloned().unwrap_or_else(|| id.to_string()),
                detached: true,
            },
        })
        .collect::<Vec<_>>();

    let mut out = rows
        .iter()
        .map(|row| RenderRow::Node { row: *row, selected: selection.contains(row.id()) })
        .collect::<Vec<_>>();
    out.extend(
        tokens
            .iter()
            .filter(|token| token.detached)
            .map(|token| RenderRow::Detached { id: token.id.clone(), label: token.label.clone() }),
    );

    Reconciled { rows: out, tokens }
}
