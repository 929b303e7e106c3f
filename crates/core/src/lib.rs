//! pod-testing - run the unit tests of a pod checkout without prior knowledge of it
//!
//! This crate provides functionality to:
//! - Discover Xcode workspaces and projects under a directory tree
//! - Map unit-test targets to the schemes that run them
//! - Plan and dispatch one build driver invocation per test target
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod interfaces;
pub mod runner;
pub mod scheme;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::ExecutionPlan;
pub use config::Config;
pub use runner::{RunOptions, RunSummary, TestRunner};
