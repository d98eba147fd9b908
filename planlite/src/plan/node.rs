// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Execution plan node representation
//!
//! A [`PlanNode`] carries two clearly separated groups of fields: the raw
//! attributes reported by the database's explain facility (immutable once
//! materialized) and the derived metrics computed by the analyzer (populated
//! exactly once per analysis pass).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Node type reported for common-table-expression scans.
///
/// A CTE scan's reported time already includes the materialization work done
/// in the CTE's own subtree, so the analyzer treats these children specially.
pub const CTE_SCAN: &str = "CTE Scan";

/// Explain property names for raw fields that stay in the [`PlanNode::extra`]
/// map. Consumers use these with [`PlanNode::property`] instead of re-spelling
/// the key strings.
pub mod keys {
    pub const RELATION_NAME: &str = "Relation Name";
    pub const SCHEMA: &str = "Schema";
    pub const ALIAS: &str = "Alias";
    pub const GROUP_KEY: &str = "Group Key";
    pub const SORT_KEY: &str = "Sort Key";
    pub const JOIN_TYPE: &str = "Join Type";
    pub const INDEX_NAME: &str = "Index Name";
    pub const HASH_CONDITION: &str = "Hash Cond";
    pub const CTE_NAME: &str = "CTE Name";
    pub const PLANNING_TIME: &str = "Planning Time";
    pub const EXECUTION_TIME: &str = "Execution Time";
}

/// Direction of the planner's row estimate mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateDirection {
    /// The planner predicted more rows than were actually produced.
    Over,
    /// The planner predicted fewer rows than were actually produced.
    Under,
}

/// Metrics derived for a single node by the analyzer.
///
/// All values are written together in one analysis pass. A non-finite number
/// means the underlying raw field was missing from the explain output; it is
/// the consumer's responsibility to render such values as unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Cost contributed by this node alone, children subtracted, clamped to 0.
    pub self_cost: f64,
    /// Wall time contributed by this node alone across all loop executions.
    /// Not clamped: slightly negative values surface measurement noise.
    pub self_duration: f64,
    /// Ratio between actual and estimated row counts, always >= 1 when finite.
    pub estimate_factor: f64,
    /// Which way the planner's estimate missed.
    pub estimate_direction: EstimateDirection,
    /// This node's self cost equals the plan-wide maximum.
    pub costliest: bool,
    /// This node's actual row count equals the plan-wide maximum.
    pub largest: bool,
    /// This node's self duration equals the plan-wide maximum.
    pub slowest: bool,
}

/// One node of an execution plan tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanNode {
    /// Identifier assigned by an external sequencing component before
    /// analysis. Unique within a plan including its CTE forest. This crate
    /// never assigns or changes it.
    #[serde(rename = "nodeId", default)]
    pub node_id: i64,

    /// Operator name, e.g. "Seq Scan" or "CTE Scan".
    #[serde(rename = "Node Type", default)]
    pub node_type: String,

    /// Row count predicted by the planner.
    #[serde(rename = "Plan Rows", default = "nan", deserialize_with = "numeric_or_nan")]
    pub plan_rows: f64,

    /// Row count actually produced.
    #[serde(rename = "Actual Rows", default = "nan", deserialize_with = "numeric_or_nan")]
    pub actual_rows: f64,

    /// Total cost estimated by the planner, children included.
    #[serde(rename = "Total Cost", default = "nan", deserialize_with = "numeric_or_nan")]
    pub total_cost: f64,

    /// Measured total time, children included, reported per loop.
    #[serde(
        rename = "Actual Total Time",
        default = "nan",
        deserialize_with = "numeric_or_nan"
    )]
    pub actual_total_time: f64,

    /// How many times this node was executed.
    #[serde(rename = "Actual Loops", default = "nan", deserialize_with = "numeric_or_nan")]
    pub actual_loops: f64,

    /// Subplan tag, set on CTE subtree roots as `"CTE "` + name.
    #[serde(rename = "Subplan Name", default, skip_serializing_if = "Option::is_none")]
    pub subplan_name: Option<String>,

    /// Child nodes in plan order. Empty for leaves.
    #[serde(rename = "Plans", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PlanNode>,

    /// Remaining explain fields (relation name, sort keys, ...). The analyzer
    /// ignores these; UI code reads them through [`PlanNode::property`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Derived metrics. `None` until the containing plan has been analyzed.
    #[serde(skip)]
    pub metrics: Option<NodeMetrics>,
}

impl PlanNode {
    /// Look up a raw explain field that is not modeled as a typed attribute.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Whether this node is a scan over a materialized CTE.
    pub fn is_cte_scan(&self) -> bool {
        self.node_type == CTE_SCAN
    }
}

impl Default for PlanNode {
    /// A node with every raw numeric field marked missing.
    fn default() -> Self {
        PlanNode {
            node_id: 0,
            node_type: String::new(),
            plan_rows: f64::NAN,
            actual_rows: f64::NAN,
            total_cost: f64::NAN,
            actual_total_time: f64::NAN,
            actual_loops: f64::NAN,
            subplan_name: None,
            children: Vec::new(),
            extra: Map::new(),
            metrics: None,
        }
    }
}

/// Serde default for raw numeric fields: absent means not-a-number, so every
/// dependent computation propagates the gap instead of inventing a zero.
pub(crate) fn nan() -> f64 {
    f64::NAN
}

/// Accept any JSON value where explain output should carry a number. A
/// non-numeric value degrades to NaN rather than failing materialization.
pub(crate) fn numeric_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(f64::NAN))
}
