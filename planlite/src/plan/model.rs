// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! The analyzed plan artifact
//!
//! A [`Plan`] bundles one query's execution tree, its optional CTE forest,
//! and the metadata recorded at creation time. Creating a plan immediately
//! runs a full analysis pass, so a constructed `Plan` always carries derived
//! metrics on every node.

use crate::plan::analyzer;
use crate::plan::error::PlanError;
use crate::plan::node::PlanNode;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Prefix for generated plan identifiers.
const PLAN_ID_TAG: &str = "plan_";

/// Matches a non-whitespace character followed by a run of 2 or more
/// whitespace characters. Runs starting with a line break are left alone so
/// indentation survives normalization.
static EXTRA_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S)(\s{2,})").expect("whitespace pattern is valid"));

/// Plan-wide maxima observed across the root tree and every CTE subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMaxima {
    /// Largest actual row count of any node.
    pub rows: f64,
    /// Largest self cost of any node.
    pub cost: f64,
    /// Largest self duration of any node.
    pub duration: f64,
}

/// The tree artifact of one explain run: the root node, the CTE forest, and
/// plan-level explain fields the analyzer does not interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanContent {
    /// Root of the main execution tree.
    #[serde(rename = "Plan")]
    pub root: PlanNode,

    /// Common-table-expression subtrees, each root tagged with a
    /// `"CTE "`-prefixed subplan name. Ordered as declared.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctes: Vec<PlanNode>,

    /// Plan-level explain fields ("Planning Time", "Triggers", ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// Maxima written once per analysis pass. `None` until analyzed.
    #[serde(skip)]
    pub maxima: Option<PlanMaxima>,
}

/// One analyzed query execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Opaque identifier generated at creation time.
    pub id: String,
    /// Display name. Falls back to a timestamped default when empty.
    pub name: String,
    /// When this plan object was created.
    pub created_on: DateTime<Utc>,
    /// The query text, whitespace-normalized.
    pub query: String,
    /// The analyzed tree.
    pub content: PlanContent,
}

impl Plan {
    /// Create a plan from an already materialized tree and analyze it.
    ///
    /// `node_id` values are expected to be assigned by the caller's
    /// sequencing component beforehand; this constructor leaves them as-is.
    pub fn new(
        name: impl Into<String>,
        mut content: PlanContent,
        query: impl Into<String>,
    ) -> Plan {
        let created_on = Utc::now();
        let name = name.into();
        let name = if name.is_empty() {
            format!(
                "plan created on {}",
                created_on.format("%B %-d, %Y %-I:%M %p")
            )
        } else {
            name
        };

        analyzer::analyze(&mut content);

        Plan {
            id: format!("{}{}", PLAN_ID_TAG, Uuid::new_v4()),
            name,
            created_on,
            query: normalize_query(&query.into()),
            content,
        }
    }

    /// Materialize plan content from explain JSON text and create a plan.
    ///
    /// Accepts both the bare content object and the one-element array form
    /// the explain facility emits.
    pub fn from_json(
        name: impl Into<String>,
        content: &str,
        query: impl Into<String>,
    ) -> Result<Plan, PlanError> {
        let mut value: Value = serde_json::from_str(content)?;
        if let Value::Array(items) = value {
            value = items.into_iter().next().ok_or(PlanError::MissingRoot)?;
        }
        if value.get("Plan").is_none() {
            return Err(PlanError::MissingRoot);
        }
        let content: PlanContent = serde_json::from_value(value)?;
        Ok(Plan::new(name, content, query))
    }
}

/// Collapse interior whitespace runs in the query text.
///
/// A run of 2 or more whitespace characters after a non-whitespace character
/// becomes a single space, except when the run starts at end-of-line. That
/// exception keeps line breaks and the indentation that follows them.
fn normalize_query(query: &str) -> String {
    EXTRA_WHITESPACE
        .replace_all(query, |caps: &Captures| {
            let run = &caps[2];
            if run.starts_with('\n') || run.starts_with('\r') {
                caps[0].to_string()
            } else {
                format!("{} ", &caps[1])
            }
        })
        .into_owned()
}
