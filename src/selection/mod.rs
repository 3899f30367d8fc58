// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-selection over a partially loaded tree.

pub mod cascade;
pub mod reconcile;
pub mod set;

pub use cascade::{descendants_of, deselect, select};
pub use reconcile::{reconcile, Reconciled, RenderRow, SelectionToken};
pub use set::SelectionSet;
