// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! PlanLite - A lightweight query execution plan analyzer
//!
//! PlanLite takes the tree a database's explain facility produces and derives
//! the metrics the raw output leaves out: each node's isolated cost and
//! duration, how far the planner's row estimates missed, and which nodes are
//! the plan-wide outliers.
//!
//! # Features
//!
//! - **Self cost and duration**: per-node contributions with children's work
//!   subtracted out, CTE scans handled without double counting
//! - **Estimate accuracy**: planner row estimate factor and miss direction
//! - **Outlier flags**: costliest, largest, and slowest nodes across the main
//!   tree and the CTE forest, ties included
//! - **Node lookups**: find a node by id or a CTE subtree by name
//! - **Balanced splitting**: tokenize delimited plan text fields without
//!   cutting inside brackets or quotes
//!
//! # Usage
//!
//! ```ignore
//! use planlite::Plan;
//!
//! let plan = Plan::from_json("nightly run", explain_json, query_text)?;
//! let maxima = plan.content.maxima.expect("analyzed at creation");
//! for child in &plan.content.root.children {
//!     let metrics = child.metrics.expect("analyzed at creation");
//!     println!("{}: {:.2}", child.node_type, metrics.self_cost);
//! }
//! ```

// Public modules - exposed to external users
pub mod plan;
pub mod text;

// Re-export the public API
pub use plan::{
    analyze, EstimateDirection, NodeMetrics, Plan, PlanContent, PlanError, PlanMaxima, PlanNode,
    CTE_SCAN,
};
pub use plan::node::keys;
pub use text::split_balanced;

/// PlanLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PlanLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
