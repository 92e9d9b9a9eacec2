//! Shared test utilities for kubesource integration tests.
//!
//! This module provides:
//! - `TestHarness` for laying out kubesource directories in a temp tree
//! - `ScriptedExecutor` standing in for the kustomize binary
//! - Builders for creating configurations programmatically

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{ScriptedExecutor, TestHarness};
