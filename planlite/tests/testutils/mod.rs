//! Test utilities for PlanLite integration tests
//!
//! Provides a realistic explain fixture and small tree helpers. Tests must
//! not access internal components - use only the public planlite API.

pub mod plan_fixture;
