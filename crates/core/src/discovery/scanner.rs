//! Recursive scan for `.xcworkspace` and `.xcodeproj` bundles

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::types::ArtifactKind;

/// Finds build artifacts beneath a directory and drops the redundant ones
pub struct ArtifactScanner {
    excluded_projects: Vec<String>,
}

impl ArtifactScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            excluded_projects: config
                .excluded_projects
                .iter()
                .map(|name| format!("{name}.{}", ArtifactKind::Project.extension()))
                .collect(),
        }
    }

    /// All artifacts under `root` that are discovery targets in their own right
    pub fn scan(&self, root: &Path) -> BTreeSet<PathBuf> {
        let discovered = collect_artifacts(root);
        debug!(
            "Found {} artifacts under {} before exclusions",
            discovered.len(),
            root.display()
        );
        self.apply_exclusions(&discovered)
    }

    /// Artifacts of a single kind under `root`
    pub fn scan_kind(&self, root: &Path, kind: ArtifactKind) -> Vec<PathBuf> {
        self.scan(root)
            .into_iter()
            .filter(|path| ArtifactKind::of(path) == Some(kind))
            .collect()
    }

    pub fn apply_exclusions(&self, discovered: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        discovered
            .iter()
            .filter(|path| {
                if self.is_managed_dependency(path) {
                    debug!("Excluding managed dependency artifact {}", path.display());
                    return false;
                }
                if is_inner_workspace(path) {
                    debug!("Excluding inner project workspace {}", path.display());
                    return false;
                }
                if has_sister_workspace(path, discovered) {
                    debug!("Excluding {} in favor of its workspace", path.display());
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    fn is_managed_dependency(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let component = component.as_os_str();
            self.excluded_projects
                .iter()
                .any(|excluded| component == excluded.as_str())
        })
    }
}

fn collect_artifacts(root: &Path) -> BTreeSet<PathBuf> {
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_dir() && ArtifactKind::of(e.path()).is_some())
        .map(|e| fs::canonicalize(e.path()).unwrap_or_else(|_| e.path().to_path_buf()))
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// `App.xcodeproj/project.xcworkspace` belongs to its project
fn is_inner_workspace(path: &Path) -> bool {
    path.parent()
        .is_some_and(|parent| ArtifactKind::of(parent) == Some(ArtifactKind::Project))
}

/// `Dir/App.xcodeproj` is represented by `Dir/App.xcworkspace` when both exist
fn has_sister_workspace(path: &Path, discovered: &BTreeSet<PathBuf>) -> bool {
    if ArtifactKind::of(path) != Some(ArtifactKind::Project) {
        return false;
    }
    discovered.contains(&path.with_extension(ArtifactKind::Workspace.extension()))
}
