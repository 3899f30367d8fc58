// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Sources deliver flat [`NodeRecord`]s; the tree module turns them into nested [`TreeNode`]s.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod record;

pub use ids::{IdError, NodeId};
pub use node::{LoadState, TreeNode};
pub use record::{segment_count, AncestorPath, NodeRecord, Passthrough, PathError};
