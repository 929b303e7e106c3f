//! Main runner that coordinates discovery, planning, and dispatch

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{
    command::ExecutionPlan,
    config::Config,
    discovery::{ProcessedProjects, ProjectWalker},
    error::{Error, Result},
    interfaces::{BuildDriver, EnvironmentProbe, ProjectModel},
    services::{PbxprojModel, XcodebuildDriver, XcrunProbe},
    types::TestMatch,
};

/// Per-invocation switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Build plans but never invoke the build driver
    pub dry_run: bool,
    /// Show the build driver's raw output
    pub verbose: bool,
    /// Actions appended after the configured default actions
    pub extra_actions: Vec<String>,
}

/// Mutable bookkeeping for one run
#[derive(Debug, Default)]
pub struct RunState {
    pub processed: ProcessedProjects,
    pub found_tests: bool,
    pub plans: Vec<ExecutionPlan>,
}

/// What a completed run planned, in dispatch order
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub plans: Vec<ExecutionPlan>,
    pub dry_run: bool,
}

pub struct TestRunner {
    config: Config,
    model: Box<dyn ProjectModel>,
    probe: Box<dyn EnvironmentProbe>,
    driver: Box<dyn BuildDriver>,
}

impl TestRunner {
    /// A runner backed by the Xcode command line tools
    pub fn new(config: Config) -> Self {
        let probe = XcrunProbe::new(&config);
        let driver = XcodebuildDriver::new(&config);
        Self::with_services(
            config,
            Box::new(PbxprojModel::new()),
            Box::new(probe),
            Box::new(driver),
        )
    }

    pub fn with_services(
        config: Config,
        model: Box<dyn ProjectModel>,
        probe: Box<dyn EnvironmentProbe>,
        driver: Box<dyn BuildDriver>,
    ) -> Self {
        Self {
            config,
            model,
            probe,
            driver,
        }
    }

    pub fn driver_name(&self) -> &str {
        self.driver.name()
    }

    /// The manifest that makes `dir` a package checkout
    pub fn find_manifest(&self, dir: &Path) -> Result<PathBuf> {
        let mut manifests: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| self.config.is_manifest(name))
            })
            .collect();
        manifests.sort();
        manifests
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoManifestError(dir.to_path_buf()))
    }

    /// Test matches under `dir` without planning or running anything
    pub fn discover(&self, dir: &Path) -> Result<Vec<TestMatch>> {
        let dir = self.prepare(dir)?;
        let walker = ProjectWalker::new(&self.config, self.model.as_ref());
        let mut processed = ProcessedProjects::new();

        let mut matches = Vec::new();
        for search_dir in search_dirs(&dir)? {
            matches.extend(walker.walk(&search_dir, &mut processed)?);
        }
        Ok(matches)
    }

    /// Discover, plan, and run every unit-test target under `dir`.
    ///
    /// Each directory's matches are dispatched before the next directory is
    /// scanned. Fails with `NoTestTargetsError` when nothing was planned.
    pub fn run(&self, dir: &Path, options: &RunOptions) -> Result<RunSummary> {
        let dir = self.prepare(dir)?;
        let walker = ProjectWalker::new(&self.config, self.model.as_ref());
        let mut state = RunState::default();

        for search_dir in search_dirs(&dir)? {
            debug!("Searching {}", search_dir.display());
            for test in walker.walk(&search_dir, &mut state.processed)? {
                let plan = self.plan(test, options);
                state.found_tests = true;
                if plan.dry_run {
                    debug!("Would run: {}", plan.to_shell_command(self.driver.name()));
                } else {
                    self.driver.run(&plan)?;
                }
                state.plans.push(plan);
            }
        }

        if !state.found_tests {
            return Err(Error::NoTestTargetsError);
        }
        Ok(RunSummary {
            plans: state.plans,
            dry_run: options.dry_run,
        })
    }

    /// Resolve the environment for one match
    pub fn plan(&self, test: TestMatch, options: &RunOptions) -> ExecutionPlan {
        let sdk = self.probe.latest_sdk().unwrap_or_else(|e| {
            warn!("SDK probe failed: {}", e);
            None
        });
        let destination = match self.probe.first_simulator() {
            Ok(Some(simulator)) => format!(
                "platform={} Simulator,name={}",
                self.config.simulator_platform, simulator.name
            ),
            Ok(None) => self.config.default_destination.clone(),
            Err(e) => {
                warn!("Simulator probe failed: {}", e);
                self.config.default_destination.clone()
            }
        };

        ExecutionPlan::new(test, &self.config.sdk_platform, destination)
            .with_sdk(sdk)
            .with_actions(self.config.default_actions.iter().cloned())
            .with_actions(options.extra_actions.iter().cloned())
            .with_dry_run(options.dry_run)
            .with_verbose(options.verbose)
    }

    fn prepare(&self, dir: &Path) -> Result<PathBuf> {
        let dir = fs::canonicalize(dir)?;
        let manifest = self.find_manifest(&dir)?;
        debug!("Using manifest {}", manifest.display());
        Ok(dir)
    }
}

/// `dir` itself followed by its non-hidden immediate subdirectories, in name order
pub fn search_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            !path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'))
        })
        .collect();
    children.sort();

    let mut dirs = vec![dir.to_path_buf()];
    dirs.extend(children);
    Ok(dirs)
}
