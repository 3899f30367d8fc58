// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lazy loading: the fetch capability, per-node load tracking, and keyword debouncing.

pub mod controller;
pub mod debounce;
pub mod source;

pub use controller::{Completion, LoadController, LoadTicket, SearchTicket};
pub use debounce::{keyword_channel, KeywordDebouncer, KeywordInput};
pub use source::{FetchError, FetchPage, FetchQuery, MemorySource, NodeSource, ParentScope};
