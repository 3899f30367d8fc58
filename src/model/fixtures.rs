// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::record::NodeRecord;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn ids(values: &[&str]) -> Vec<NodeId> {
    values.iter().map(|value| nid(value)).collect()
}

pub(crate) fn named(id: &str, name: &str, path: &str) -> NodeRecord<()> {
    NodeRecord::new(nid(id), name, ()).with_ancestor_path(path)
}

/// Record whose display name equals its id.
pub(crate) fn rec(id: &str, path: &str) -> NodeRecord<()> {
    named(id, id, path)
}

/// `a` with children `b` and `c`.
pub(crate) fn abc_records() -> Vec<NodeRecord<()>> {
    vec![rec("a", "a"), rec("b", "a/b"), rec("c", "a/c")]
}

/// Two roots, up to four levels deep:
///
/// ```text
/// org      Acme Corp
///   eng      Engineering
///     platform Platform
///       infra    Infrastructure
///     apps     Applications
///   sales    Sales
///     emea     EMEA Sales
///     apac     APAC Sales
///   hr       People Ops
/// labs     Research Labs
///   ml       Machine Learning
/// ```
pub(crate) fn org_records() -> Vec<NodeRecord<()>> {
    vec![
        named("org", "Acme Corp", "org"),
        named("eng", "Engineering", "org/eng"),
        named("platform", "Platform", "org/eng/platform"),
        named("infra", "Infrastructure", "org/eng/platform/infra"),
        named("apps", "Applications", "org/eng/apps"),
        named("sales", "Sales", "org/sales"),
        named("emea", "EMEA Sales", "org/sales/emea"),
        named("apac", "APAC Sales", "org/sales/apac"),
        named("hr", "People Ops", "org/hr"),
        named("labs", "Research Labs", "labs"),
        named("ml", "Machine Learning", "labs/ml"),
    ]
}
