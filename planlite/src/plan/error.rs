// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan materialization error types

use thiserror::Error;

/// Errors raised while materializing plan content from explain JSON.
///
/// Analysis itself never fails; materialization is the only fallible
/// operation in this crate.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid plan content: {0}")]
    InvalidContent(#[from] serde_json::Error),

    #[error("Plan content has no root node")]
    MissingRoot,
}
