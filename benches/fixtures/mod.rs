// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use canopy::model::{NodeId, NodeRecord};

const UNIT_NAMES: [&str; 8] =
    ["Finance", "Platform", "Sales", "Support", "Research", "Legal", "Design", "Operations"];

/// Complete hierarchy with `fanout` children per node, `depth` levels deep.
///
/// Records are emitted deepest level first, the worst case for the builder's bookkeeping.
pub fn hierarchy(fanout: usize, depth: usize) -> Vec<NodeRecord<()>> {
    let mut levels: Vec<Vec<(String, String)>> = Vec::with_capacity(depth);
    let mut frontier = vec![(String::new(), String::new())];

    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fanout);
        for (parent_path, parent_id) in &frontier {
            for slot in 0..fanout {
                let id = if parent_id.is_empty() {
                    format!("u{slot}")
                } else {
                    format!("{parent_id}.{slot}")
                };
                let path = if parent_path.is_empty() {
                    id.clone()
                } else {
                    format!("{parent_path}/{id}")
                };
                next.push((path, id));
            }
        }
        levels.push(next.clone());
        frontier = next;
    }

    levels
        .into_iter()
        .rev()
        .flatten()
        .map(|(path, id)| {
            let name = format!("{} {id}", UNIT_NAMES[id.len() % UNIT_NAMES.len()]);
            NodeRecord::new(NodeId::new(&id).expect("bench id"), name, ()).with_ancestor_path(path)
        })
        .collect()
}

pub fn small() -> Vec<NodeRecord<()>> {
    hierarchy(4, 3)
}

pub fn medium() -> Vec<NodeRecord<()>> {
    hierarchy(6, 4)
}

pub fn large() -> Vec<NodeRecord<()>> {
    hierarchy(6, 5)
}
