//! Build driver interface

use crate::command::ExecutionPlan;
use crate::error::Result;

/// Runs an execution plan to completion
pub trait BuildDriver: Send + Sync {
    /// Blocks until the build tool exits; a failed run is an error
    fn run(&self, plan: &ExecutionPlan) -> Result<()>;

    /// Name shown in logs and errors
    fn name(&self) -> &str;
}
