// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-node metric computation and outlier flagging
//!
//! Analysis runs in two passes. The first pass walks the root tree and every
//! CTE subtree, computing each node's planner estimate accuracy and its self
//! cost/duration while one accumulator tracks the running maxima. The second
//! pass revisits every node and flags the ones whose values equal those
//! maxima. Two passes are unavoidable: a node's outlier status depends on
//! maxima that are only known once the whole plan has been walked.

use crate::plan::model::{PlanContent, PlanMaxima};
use crate::plan::node::{EstimateDirection, NodeMetrics, PlanNode};
use log::debug;

/// Analyze a plan tree in place.
///
/// Populates [`NodeMetrics`] on every node of the root tree and the CTE
/// forest, and writes the plan-wide maxima onto the content. The maxima
/// accumulator is local to this call, so analyzing two plans concurrently
/// from different threads needs no coordination.
///
/// Never fails: missing raw fields surface as non-finite derived values that
/// callers are expected to treat as unavailable.
pub fn analyze(content: &mut PlanContent) {
    let mut maxima = PlanMaxima::default();

    compute_metrics(&mut content.root, &mut maxima);
    for cte in &mut content.ctes {
        compute_metrics(cte, &mut maxima);
    }
    content.maxima = Some(maxima);

    flag_outliers(&mut content.root, &maxima);
    for cte in &mut content.ctes {
        flag_outliers(cte, &maxima);
    }

    debug!(
        "analyzed plan: max rows {}, max self cost {}, max self duration {}",
        maxima.rows, maxima.cost, maxima.duration
    );
}

/// Pass 1: compute derived metrics for `node` and its subtree, updating the
/// running maxima along the way.
fn compute_metrics(node: &mut PlanNode, maxima: &mut PlanMaxima) {
    let ratio = node.actual_rows / node.plan_rows;
    // Report the factor as a magnitude >= 1 and keep the miss direction
    // separately. A zero or missing row estimate divides to a non-finite
    // factor, which is passed through untouched.
    let (estimate_factor, estimate_direction) = if ratio < 1.0 {
        (node.plan_rows / node.actual_rows, EstimateDirection::Over)
    } else {
        (ratio, EstimateDirection::Under)
    };

    let mut self_cost = node.total_cost;
    let mut self_duration = node.actual_total_time;
    for child in &node.children {
        // A CTE scan's reported time and cost are already counted inside the
        // CTE's own materialization subtree; subtracting them here would
        // remove that work from the parent twice.
        if !child.is_cte_scan() {
            self_cost -= child.total_cost;
            self_duration -= child.actual_total_time;
        }
    }
    // Child cost estimates are only loosely related to the parent's total, so
    // the subtraction can dip below zero. Duration is left unclamped: a
    // negative self duration signals measurement noise and is preserved.
    if self_cost < 0.0 {
        self_cost = 0.0;
    }
    // Reported time is a per-loop average.
    let self_duration = self_duration * node.actual_loops;

    node.metrics = Some(NodeMetrics {
        self_cost,
        self_duration,
        estimate_factor,
        estimate_direction,
        costliest: false,
        largest: false,
        slowest: false,
    });

    // Strict comparisons: ties keep the earlier holder, and NaN never wins.
    if node.actual_rows > maxima.rows {
        maxima.rows = node.actual_rows;
    }
    if self_cost > maxima.cost {
        maxima.cost = self_cost;
    }
    if self_duration > maxima.duration {
        maxima.duration = self_duration;
    }

    for child in &mut node.children {
        compute_metrics(child, maxima);
    }
}

/// Pass 2: flag every node whose metric equals the plan-wide maximum. Exact
/// equality on purpose, so ties produce multiple flagged nodes.
fn flag_outliers(node: &mut PlanNode, maxima: &PlanMaxima) {
    let actual_rows = node.actual_rows;
    if let Some(metrics) = node.metrics.as_mut() {
        metrics.costliest = metrics.self_cost == maxima.cost;
        metrics.largest = actual_rows == maxima.rows;
        metrics.slowest = metrics.self_duration == maxima.duration;
    }
    for child in &mut node.children {
        flag_outliers(child, maxima);
    }
}
