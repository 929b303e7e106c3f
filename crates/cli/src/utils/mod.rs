use anyhow::{Context, Result};
use std::{env, path::PathBuf};

/// The directory a command operates on: `--cwd` when given, else the current directory
pub fn resolve_project_root(cwd: Option<&str>) -> Result<PathBuf> {
    let project_root = if let Some(cwd) = cwd {
        PathBuf::from(cwd)
    } else {
        env::current_dir().context("Failed to get current directory")?
    };

    project_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory {}", project_root.display()))
}
