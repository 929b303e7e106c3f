//! Member projects of an `.xcworkspace`

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ArtifactKind;
use crate::utils::xml::{XmlNode, visit_elements};

const CONTENTS_FILE: &str = "contents.xcworkspacedata";

/// A `FileRef` entry of a workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceReference {
    /// The raw `location` attribute, e.g. `group:Sub/App.xcodeproj`
    pub location: String,
    /// The location resolved against the workspace's directory, if its kind is resolvable
    pub path: Option<PathBuf>,
}

pub struct WorkspaceReader;

impl WorkspaceReader {
    /// Every file reference in the workspace, in document order.
    ///
    /// A workspace without a contents file has no references.
    pub fn references(workspace: &Path) -> Result<Vec<WorkspaceReference>> {
        let contents_path = workspace.join(CONTENTS_FILE);
        if !contents_path.is_file() {
            debug!("No {} in {}", CONTENTS_FILE, workspace.display());
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&contents_path)?;

        // Relative references are anchored at the directory holding the workspace
        let container_dir = workspace.parent().unwrap_or(Path::new("")).to_path_buf();
        let mut groups: Vec<PathBuf> = Vec::new();
        let mut references = Vec::new();

        visit_elements(&contents, |node| match node {
            XmlNode::Open { name, .. } if name == "Group" => {
                let base = groups.last().unwrap_or(&container_dir);
                let dir = node
                    .attribute("location")
                    .and_then(|location| resolve_location(location, base, &container_dir))
                    .unwrap_or_else(|| base.clone());
                groups.push(dir);
            }
            XmlNode::Close { name } if name == "Group" => {
                groups.pop();
            }
            XmlNode::Open { name, .. } if name == "FileRef" => {
                if let Some(location) = node.attribute("location") {
                    let base = groups.last().unwrap_or(&container_dir);
                    references.push(WorkspaceReference {
                        location: location.to_string(),
                        path: resolve_location(location, base, &container_dir),
                    });
                }
            }
            _ => {}
        })
        .map_err(|message| Error::WorkspaceParseError {
            path: contents_path.clone(),
            message,
        })?;

        Ok(references)
    }

    /// Member projects that exist on disk, canonicalized
    pub fn member_projects(workspace: &Path) -> Result<Vec<PathBuf>> {
        let mut projects = Vec::new();
        for reference in Self::references(workspace)? {
            let Some(path) = reference.path else {
                debug!("Unresolvable workspace reference {}", reference.location);
                continue;
            };
            if ArtifactKind::of(&path) != Some(ArtifactKind::Project) {
                continue;
            }
            if !path.exists() {
                debug!(
                    "Workspace {} references missing project {}",
                    workspace.display(),
                    path.display()
                );
                continue;
            }
            projects.push(fs::canonicalize(&path).unwrap_or(path));
        }
        Ok(projects)
    }
}

fn resolve_location(location: &str, group_base: &Path, container_dir: &Path) -> Option<PathBuf> {
    let (kind, path) = location.split_once(':')?;
    match kind {
        "group" => Some(group_base.join(path)),
        "container" => Some(container_dir.join(path)),
        "absolute" => Some(PathBuf::from(path)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_workspace(dir: &Path, name: &str, body: &str) -> PathBuf {
        let workspace = dir.join(name);
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join(CONTENTS_FILE),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Workspace version = \"1.0\">\n{body}\n</Workspace>\n"
            ),
        )
        .unwrap();
        workspace
    }

    #[test]
    fn test_references_resolve_against_workspace_directory() {
        let workspace = PathBuf::from("/repo/Proj.xcworkspace");
        let base = workspace.parent().unwrap();
        assert_eq!(
            resolve_location("group:Sub/App.xcodeproj", base, base),
            Some(PathBuf::from("/repo/Sub/App.xcodeproj"))
        );
        assert_eq!(
            resolve_location("container:App.xcodeproj", Path::new("/repo/Group"), base),
            Some(PathBuf::from("/repo/App.xcodeproj"))
        );
        assert_eq!(
            resolve_location("absolute:/elsewhere/Lib.xcodeproj", base, base),
            Some(PathBuf::from("/elsewhere/Lib.xcodeproj"))
        );
        assert_eq!(resolve_location("self:", base, base), None);
        assert_eq!(resolve_location("no-kind", base, base), None);
    }

    #[test]
    fn test_member_projects_are_relative_to_workspace_not_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("repo/Sub/App.xcodeproj")).unwrap();
        let workspace = write_workspace(
            &root.join("repo"),
            "Proj.xcworkspace",
            r#"<FileRef location = "group:Sub/App.xcodeproj"></FileRef>"#,
        );

        let projects = WorkspaceReader::member_projects(&workspace).unwrap();
        assert_eq!(projects, vec![root.join("repo/Sub/App.xcodeproj")]);
    }

    #[test]
    fn test_groups_nest_locations() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("Libs/Core/Core.xcodeproj")).unwrap();
        fs::create_dir_all(root.join("App.xcodeproj")).unwrap();
        let workspace = write_workspace(
            &root,
            "All.xcworkspace",
            r#"<Group location = "group:Libs" name = "Libs">
                 <FileRef location = "group:Core/Core.xcodeproj"/>
                 <FileRef location = "container:App.xcodeproj"/>
               </Group>
               <FileRef location = "group:Podfile"/>"#,
        );

        let references = WorkspaceReader::references(&workspace).unwrap();
        assert_eq!(references.len(), 3);
        assert_eq!(
            references[0].path.as_deref(),
            Some(root.join("Libs/Core/Core.xcodeproj").as_path())
        );

        let projects = WorkspaceReader::member_projects(&workspace).unwrap();
        assert_eq!(
            projects,
            vec![root.join("Libs/Core/Core.xcodeproj"), root.join("App.xcodeproj")]
        );
    }

    #[test]
    fn test_missing_member_project_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = write_workspace(
            temp_dir.path(),
            "Proj.xcworkspace",
            r#"<FileRef location = "group:Gone.xcodeproj"></FileRef>"#,
        );
        assert!(WorkspaceReader::member_projects(&workspace).unwrap().is_empty());
    }

    #[test]
    fn test_workspace_without_contents_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("Empty.xcworkspace");
        fs::create_dir_all(&workspace).unwrap();
        assert!(WorkspaceReader::references(&workspace).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_contents_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("Broken.xcworkspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(workspace.join(CONTENTS_FILE), "<Workspace><FileRef></Workspace>").unwrap();

        let err = WorkspaceReader::references(&workspace).unwrap_err();
        assert!(matches!(err, Error::WorkspaceParseError { .. }));
    }
}
