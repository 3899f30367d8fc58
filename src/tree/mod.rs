// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tree assembly and linearization.
//!
//! Records are grouped into a nested tree by [`builder`], walked into preorder rows by
//! [`flatten`], and trimmed to what is visible by [`collapse`].

pub mod builder;
pub mod collapse;
pub mod flatten;

pub use builder::{build_tree, BuildReport, TreeBuilder};
pub use collapse::{collapsed_ids, remove_children_of};
pub use flatten::{flatten, flatten_from, FlatRow};

use crate::model::TreeNode;

/// Rows the user can currently see: flattened, with collapsed subtrees removed.
pub fn visible_rows<T>(nodes: &[TreeNode<T>]) -> Vec<FlatRow<'_, T>> {
    remove_children_of(flatten(nodes), collapsed_ids(nodes))
}
