pub mod artifact;
pub mod target;

// Re-export commonly used types
pub use artifact::{ArtifactKind, Container};
pub use target::{BuildTarget, TestMatch};
