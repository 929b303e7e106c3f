//! Reads `.xcscheme` files of a project into a [`SchemeMap`]

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::SchemeMap;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::utils::xml::{XmlNode, visit_elements};

const SCHEME_EXTENSION: &str = "xcscheme";

/// Element path from a test action down to a testable's buildable reference
const TESTABLE_PATH: [&str; 3] = ["TestAction", "Testables", "TestableReference"];

pub struct SchemeResolver {
    user: Option<String>,
}

impl SchemeResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            user: config.user_name(),
        }
    }

    pub fn for_user(user: Option<String>) -> Self {
        Self { user }
    }

    /// Checked-in schemes shared by the team
    pub fn shared_dir(project: &Path) -> PathBuf {
        project.join("xcshareddata").join("xcschemes")
    }

    /// Schemes local to the current user
    pub fn user_dir(&self, project: &Path) -> Option<PathBuf> {
        self.user.as_ref().map(|user| {
            project
                .join("xcuserdata")
                .join(format!("{user}.xcuserdatad"))
                .join("xcschemes")
        })
    }

    /// Build the blueprint to scheme mapping of `project`.
    ///
    /// Shared schemes are read before user schemes, each directory in file
    /// name order; a later scheme testing the same blueprint replaces an
    /// earlier one. Any malformed scheme file fails the whole resolution.
    pub fn resolve(&self, project: &Path) -> Result<SchemeMap> {
        let mut map = SchemeMap::new();

        let dirs = std::iter::once(Self::shared_dir(project)).chain(self.user_dir(project));
        for dir in dirs {
            for scheme_file in scheme_files(&dir)? {
                let Some(scheme) = scheme_file.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                for blueprint in Self::blueprints_in(&scheme_file)? {
                    debug!("Scheme '{}' tests blueprint '{}'", scheme, blueprint);
                    map.insert(blueprint, scheme);
                }
            }
        }

        Ok(map)
    }

    /// Blueprint names referenced by the test actions of one scheme file
    pub fn blueprints_in(scheme_file: &Path) -> Result<Vec<String>> {
        let contents = fs::read_to_string(scheme_file)?;
        parse_test_blueprints(&contents).map_err(|message| Error::SchemeParseError {
            path: scheme_file.to_path_buf(),
            message,
        })
    }
}

fn scheme_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(SCHEME_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse_test_blueprints(contents: &str) -> std::result::Result<Vec<String>, String> {
    let mut stack: Vec<String> = Vec::new();
    let mut blueprints = Vec::new();

    visit_elements(contents, |node| match node {
        XmlNode::Open { name, .. } => {
            if name == "BuildableReference" && under_testable(&stack) {
                if let Some(blueprint) = node.attribute("BlueprintName") {
                    blueprints.push(blueprint.to_string());
                }
            }
            stack.push(name.clone());
        }
        XmlNode::Close { .. } => {
            stack.pop();
        }
    })?;

    Ok(blueprints)
}

fn under_testable(stack: &[String]) -> bool {
    stack.len() >= TESTABLE_PATH.len()
        && stack[stack.len() - TESTABLE_PATH.len()..]
            .iter()
            .zip(TESTABLE_PATH)
            .all(|(actual, expected)| actual == expected)
}
