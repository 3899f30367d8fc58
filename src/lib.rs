// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canopy: hierarchical entity selector core.
//!
//! Flat records carrying an ancestor path become a nested tree ([`tree`]), which renders as
//! collapse-aware rows, loads subtrees on demand ([`load`]), and backs cascading selection
//! ([`selection`]) and keyword search ([`query`]). [`selector::Selector`] ties them together.

pub mod config;
pub mod load;
pub mod model;
pub mod ops;
pub mod query;
pub mod selection;
pub mod selector;
pub mod tree;

pub use config::{ConfigError, SelectorConfig};
pub use selector::{SearchStatus, Selector, SelectorError};
