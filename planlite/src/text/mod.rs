// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Text utilities for plan fields

pub mod splitter;

pub use splitter::split_balanced;
