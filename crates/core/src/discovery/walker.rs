//! Walks a directory's workspaces and projects down to test matches

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ArtifactScanner, WorkspaceReader, classifier};
use crate::config::Config;
use crate::error::Result;
use crate::interfaces::ProjectModel;
use crate::scheme::SchemeResolver;
use crate::types::{ArtifactKind, Container, TestMatch};

/// Projects already handed out during a run
#[derive(Debug, Default)]
pub struct ProcessedProjects {
    seen: HashSet<PathBuf>,
}

impl ProcessedProjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `project`; `false` if it was already recorded
    pub fn mark(&mut self, project: &Path) -> bool {
        self.seen.insert(project.to_path_buf())
    }

    pub fn contains(&self, project: &Path) -> bool {
        self.seen.contains(project)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

pub struct ProjectWalker<'a> {
    scanner: ArtifactScanner,
    schemes: SchemeResolver,
    model: &'a dyn ProjectModel,
}

impl<'a> ProjectWalker<'a> {
    pub fn new(config: &Config, model: &'a dyn ProjectModel) -> Self {
        Self {
            scanner: ArtifactScanner::new(config),
            schemes: SchemeResolver::new(config),
            model,
        }
    }

    pub fn with_scheme_resolver(mut self, schemes: SchemeResolver) -> Self {
        self.schemes = schemes;
        self
    }

    pub fn workspaces_in(&self, dir: &Path) -> Vec<PathBuf> {
        self.scanner.scan_kind(dir, ArtifactKind::Workspace)
    }

    pub fn projects_in(&self, dir: &Path) -> Vec<PathBuf> {
        self.scanner.scan_kind(dir, ArtifactKind::Project)
    }

    /// Test matches for every workspace and standalone project under `dir`.
    ///
    /// Workspaces are expanded first. Projects in `processed` are skipped and
    /// every project visited is added to it.
    pub fn walk(&self, dir: &Path, processed: &mut ProcessedProjects) -> Result<Vec<TestMatch>> {
        let artifacts = self.scanner.scan(dir);
        let (workspaces, projects): (Vec<_>, Vec<_>) = artifacts
            .into_iter()
            .partition(|path| ArtifactKind::of(path) == Some(ArtifactKind::Workspace));

        let mut matches = Vec::new();

        for workspace in &workspaces {
            debug!("Expanding workspace {}", workspace.display());
            let container = Container::workspace(workspace);
            for project in WorkspaceReader::member_projects(workspace)? {
                self.process_project(&project, &container, processed, &mut matches)?;
            }
        }

        for project in &projects {
            let container = Container::project(project);
            self.process_project(project, &container, processed, &mut matches)?;
        }

        Ok(matches)
    }

    fn process_project(
        &self,
        project: &Path,
        container: &Container,
        processed: &mut ProcessedProjects,
        matches: &mut Vec<TestMatch>,
    ) -> Result<()> {
        if !processed.mark(project) {
            debug!("Already processed {}", project.display());
            return Ok(());
        }

        let schemes = self.schemes.resolve(project)?;
        let targets = self.model.targets(project)?;

        for target in classifier::unit_test_targets(&targets) {
            let Some(scheme) = schemes.scheme_for(&target.name) else {
                debug!(
                    "No scheme in {} to run target '{}'",
                    project.display(),
                    target.name
                );
                continue;
            };
            debug!("Target '{}' runs with scheme '{}'", target.name, scheme);
            matches.push(TestMatch {
                container: container.clone(),
                project: project.to_path_buf(),
                target: target.name.clone(),
                scheme: scheme.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildTarget;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Targets keyed by project file name
    struct FakeModel(HashMap<String, Vec<BuildTarget>>);

    impl ProjectModel for FakeModel {
        fn targets(&self, project: &Path) -> Result<Vec<BuildTarget>> {
            let name = project.file_name().unwrap().to_str().unwrap();
            Ok(self.0.get(name).cloned().unwrap_or_default())
        }
    }

    fn unit_tests(name: &str) -> BuildTarget {
        BuildTarget::new(name, "com.apple.product-type.bundle.unit-test")
    }

    fn shared_scheme(project: &Path, scheme: &str, blueprint: &str) {
        let dir = SchemeResolver::shared_dir(project);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{scheme}.xcscheme")),
            format!(
                r#"<Scheme><TestAction><Testables><TestableReference>
                   <BuildableReference BlueprintName = "{blueprint}"/>
                   </TestableReference></Testables></TestAction></Scheme>"#
            ),
        )
        .unwrap();
    }

    fn workspace(path: &Path, members: &[&str]) {
        fs::create_dir_all(path).unwrap();
        let refs: String = members
            .iter()
            .map(|m| format!(r#"<FileRef location = "group:{m}"></FileRef>"#))
            .collect();
        fs::write(
            path.join("contents.xcworkspacedata"),
            format!(r#"<Workspace version = "1.0">{refs}</Workspace>"#),
        )
        .unwrap();
    }

    fn walker(model: &FakeModel) -> ProjectWalker<'_> {
        ProjectWalker::new(&Config::default(), model).with_scheme_resolver(SchemeResolver::for_user(None))
    }

    #[test]
    fn test_workspace_member_runs_against_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let project = root.join("Example/App.xcodeproj");
        fs::create_dir_all(&project).unwrap();
        shared_scheme(&project, "AppTests", "AppTests");
        workspace(&root.join("Example/App.xcworkspace"), &["App.xcodeproj", "Pods/Pods.xcodeproj"]);

        let model = FakeModel(HashMap::from([(
            "App.xcodeproj".to_string(),
            vec![BuildTarget::new("App", "com.apple.product-type.application"), unit_tests("AppTests")],
        )]));

        let mut processed = ProcessedProjects::new();
        let matches = walker(&model).walk(&root, &mut processed).unwrap();
        assert_eq!(
            matches,
            vec![TestMatch {
                container: Container::workspace(root.join("Example/App.xcworkspace")),
                project: project.clone(),
                target: "AppTests".to_string(),
                scheme: "AppTests".to_string(),
            }]
        );
        assert!(processed.contains(&project));
    }

    #[test]
    fn test_project_in_two_workspaces_is_processed_once() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let project = root.join("Shared/Lib.xcodeproj");
        fs::create_dir_all(&project).unwrap();
        shared_scheme(&project, "Lib", "LibTests");
        workspace(&root.join("A.xcworkspace"), &["Shared/Lib.xcodeproj"]);
        workspace(&root.join("B.xcworkspace"), &["Shared/Lib.xcodeproj"]);

        let model = FakeModel(HashMap::from([(
            "Lib.xcodeproj".to_string(),
            vec![unit_tests("LibTests")],
        )]));

        let mut processed = ProcessedProjects::new();
        let matches = walker(&model).walk(&root, &mut processed).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].container, Container::workspace(root.join("A.xcworkspace")));
        assert_eq!(processed.len(), 1);

        // A second walk over the same tree finds nothing new
        let again = walker(&model).walk(&root, &mut processed).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_target_without_any_scheme_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("App.xcodeproj")).unwrap();

        let model = FakeModel(HashMap::from([(
            "App.xcodeproj".to_string(),
            vec![unit_tests("AppTests")],
        )]));

        let matches = walker(&model).walk(&root, &mut ProcessedProjects::new()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_target_falls_back_to_another_scheme() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let project = root.join("App.xcodeproj");
        fs::create_dir_all(&project).unwrap();
        shared_scheme(&project, "Everything", "AppTests");

        let model = FakeModel(HashMap::from([(
            "App.xcodeproj".to_string(),
            vec![unit_tests("AppTests"), unit_tests("NetworkingTests")],
        )]));

        let matches = walker(&model).walk(&root, &mut ProcessedProjects::new()).unwrap();
        let pairs: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.target.as_str(), m.scheme.as_str()))
            .collect();
        assert_eq!(pairs, [("AppTests", "Everything"), ("NetworkingTests", "Everything")]);
        assert_eq!(matches[0].container, Container::project(&project));
    }

    #[test]
    fn test_workspaces_and_projects_in() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("App.xcworkspace")).unwrap();
        fs::create_dir_all(root.join("App.xcodeproj")).unwrap();
        fs::create_dir_all(root.join("Tool/Tool.xcodeproj")).unwrap();

        let model = FakeModel(HashMap::new());
        let walker = walker(&model);
        assert_eq!(walker.workspaces_in(&root), vec![root.join("App.xcworkspace")]);
        assert_eq!(walker.projects_in(&root), vec![root.join("Tool/Tool.xcodeproj")]);
    }
}
