use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory extension of an Xcode workspace bundle
pub const WORKSPACE_EXTENSION: &str = "xcworkspace";

/// Directory extension of an Xcode project bundle
pub const PROJECT_EXTENSION: &str = "xcodeproj";

/// The two kinds of build artifact the scanner recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Workspace,
    Project,
}

impl ArtifactKind {
    /// Directory extension of bundles of this kind, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Workspace => WORKSPACE_EXTENSION,
            ArtifactKind::Project => PROJECT_EXTENSION,
        }
    }

    /// Classify a path by its extension
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(WORKSPACE_EXTENSION) => Some(ArtifactKind::Workspace),
            Some(PROJECT_EXTENSION) => Some(ArtifactKind::Project),
            _ => None,
        }
    }

    /// The build driver flag selecting this kind of container
    pub fn driver_flag(self) -> &'static str {
        match self {
            ArtifactKind::Workspace => "-workspace",
            ArtifactKind::Project => "-project",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Workspace => write!(f, "workspace"),
            ArtifactKind::Project => write!(f, "project"),
        }
    }
}

/// The artifact a test run is executed against.
///
/// A target found through a workspace member runs against the workspace,
/// even though its scheme was resolved from the member project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

impl Container {
    pub fn workspace(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ArtifactKind::Workspace,
            path: path.into(),
        }
    }

    pub fn project(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ArtifactKind::Project,
            path: path.into(),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path.display())
    }
}
