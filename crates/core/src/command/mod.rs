//! Execution plan generation

pub mod plan;

// Re-export commonly used types
pub use plan::ExecutionPlan;
