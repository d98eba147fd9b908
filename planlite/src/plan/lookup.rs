// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Read-only lookups over an analyzed plan

use crate::plan::model::PlanContent;
use crate::plan::node::PlanNode;

/// Subplan names of CTE subtree roots carry this prefix.
const CTE_PREFIX: &str = "CTE ";

impl PlanNode {
    /// Depth-first search for a node id in this subtree, self included.
    /// Node ids are unique within a plan, so the first match is the only one.
    pub fn find_by_id(&self, id: i64) -> Option<&PlanNode> {
        if self.node_id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }
}

impl PlanContent {
    /// Find a node by id, searching the root tree first and the CTE forest
    /// second. Returns `None` when no node carries the id.
    pub fn find_node_by_id(&self, id: i64) -> Option<&PlanNode> {
        self.root
            .find_by_id(id)
            .or_else(|| self.ctes.iter().find_map(|cte| cte.find_by_id(id)))
    }

    /// Find the CTE subtree declared under `name`.
    ///
    /// Scans only the top-level CTE list for a root whose subplan name is
    /// literally `"CTE "` + `name`.
    pub fn find_cte(&self, name: &str) -> Option<&PlanNode> {
        let tagged = format!("{}{}", CTE_PREFIX, name);
        self.ctes
            .iter()
            .find(|cte| cte.subplan_name.as_deref() == Some(tagged.as_str()))
    }
}
