use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: [&str; 2] = [".pod-testing.json", "pod-testing.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Program invoked for every execution plan
    pub build_driver: String,
    /// Program (and arguments) the driver's stdout is piped through when not verbose.
    /// An empty list shows the raw driver output.
    pub formatter: Vec<String>,
    /// Actions run before any user supplied ones
    pub default_actions: Vec<String>,
    /// Destination used when the simulator probe reports nothing
    pub default_destination: String,
    /// Platform named in simulator runtime headers and destinations
    pub simulator_platform: String,
    /// SDK family passed to the build driver
    pub sdk_platform: String,
    /// Project names managed by a dependency manager, never discovered as targets
    pub excluded_projects: Vec<String>,
    /// File extensions identifying a manifest in the working directory
    pub manifest_extensions: Vec<String>,
    /// Owner of the user scheme directory; falls back to `$USER`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_driver: "xcodebuild".to_string(),
            formatter: vec!["xcpretty".to_string(), "-c".to_string()],
            default_actions: vec!["clean".to_string(), "build".to_string(), "test".to_string()],
            default_destination: "platform=iOS Simulator,name=iPhone 6".to_string(),
            simulator_platform: "iOS".to_string(),
            sdk_platform: "iphonesimulator".to_string(),
            excluded_projects: vec!["Pods".to_string()],
            manifest_extensions: vec!["podspec".to_string(), "podspec.json".to_string()],
            user: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Load the nearest config file at or above `start_path`, or the defaults
    pub fn load(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// The user whose scheme directory is consulted, if any
    pub fn user_name(&self) -> Option<String> {
        self.user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .filter(|name| !name.is_empty())
    }

    /// Whether `file_name` is a manifest this tool should run against
    pub fn is_manifest(&self, file_name: &str) -> bool {
        self.manifest_extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
        })
    }
}
