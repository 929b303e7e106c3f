use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::interfaces::Sdk;
use crate::types::{Container, TestMatch};

/// Everything the build driver needs to run one test target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub container: Container,
    /// The project the scheme was resolved from
    pub project: PathBuf,
    pub target: String,
    pub scheme: String,
    /// SDK family, e.g. `iphonesimulator`
    pub sdk_platform: String,
    /// `None` runs against whatever SDK of the family the driver defaults to
    pub sdk_version: Option<String>,
    pub destination: String,
    pub actions: Vec<String>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl ExecutionPlan {
    pub fn new(test: TestMatch, sdk_platform: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            container: test.container,
            project: test.project,
            target: test.target,
            scheme: test.scheme,
            sdk_platform: sdk_platform.into(),
            sdk_version: None,
            destination: destination.into(),
            actions: Vec::new(),
            dry_run: false,
            verbose: false,
        }
    }

    pub fn with_sdk(mut self, sdk: Option<Sdk>) -> Self {
        self.sdk_version = sdk.map(|sdk| sdk.version);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = String>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The `-sdk` argument value
    pub fn sdk(&self) -> String {
        match &self.sdk_version {
            Some(version) => format!("{}{}", self.sdk_platform, version),
            None => self.sdk_platform.clone(),
        }
    }

    /// Arguments passed to the build driver, in order
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.container.kind.driver_flag().to_string(),
            self.container.path.display().to_string(),
            "-scheme".to_string(),
            self.scheme.clone(),
            "-sdk".to_string(),
            self.sdk(),
            "-destination".to_string(),
            self.destination.clone(),
        ];
        args.extend(self.actions.iter().cloned());
        args
    }

    pub fn to_shell_command(&self, program: &str) -> String {
        let mut cmd = String::from(program);
        for arg in self.args() {
            cmd.push(' ');
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(&arg);
            }
        }
        cmd
    }
}
