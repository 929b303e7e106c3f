//! Project model interface

use std::path::Path;

use crate::error::Result;
use crate::types::BuildTarget;

/// Enumerates the build targets declared by a project
pub trait ProjectModel: Send + Sync {
    /// All targets of `project`, in declaration order
    fn targets(&self, project: &Path) -> Result<Vec<BuildTarget>>;
}
