// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan representation and analysis
//!
//! This module holds the plan tree data model, the analyzer that derives
//! per-node metrics and plan-wide maxima, and read-only lookups used by
//! navigation code.

pub mod analyzer;
pub mod error;
pub mod lookup;
pub mod model;
pub mod node;

pub use analyzer::analyze;
pub use error::PlanError;
pub use model::{Plan, PlanContent, PlanMaxima};
pub use node::{EstimateDirection, NodeMetrics, PlanNode, CTE_SCAN};
