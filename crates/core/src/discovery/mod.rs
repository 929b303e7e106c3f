//! Discovery of workspace and project artifacts and their unit-test targets

pub mod classifier;
pub mod scanner;
pub mod walker;
pub mod workspace;

pub use scanner::ArtifactScanner;
pub use walker::{ProcessedProjects, ProjectWalker};
pub use workspace::{WorkspaceReader, WorkspaceReference};
