//! Build driver that runs `xcodebuild`, optionally through an output formatter

use std::process::{Command, ExitStatus, Stdio};
use tracing::{info, warn};

use crate::command::ExecutionPlan;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interfaces::BuildDriver;

pub struct XcodebuildDriver {
    program: String,
    formatter: Vec<String>,
}

impl XcodebuildDriver {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.build_driver.clone(),
            formatter: config.formatter.clone(),
        }
    }

    fn command(&self, plan: &ExecutionPlan) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(plan.args());
        cmd
    }

    fn run_raw(&self, plan: &ExecutionPlan) -> Result<ExitStatus> {
        Ok(self.command(plan).status()?)
    }

    /// Pipe the driver's stdout through the formatter. Falls back to raw output
    /// when the formatter cannot be started.
    fn run_formatted(&self, plan: &ExecutionPlan, formatter: &str, args: &[String]) -> Result<ExitStatus> {
        let mut formatter_child = match Command::new(formatter)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!("Could not run {}: {}; showing raw {} output", formatter, e, self.program);
                return self.run_raw(plan);
            }
        };

        // The driver command owns the pipe's write end and must be dropped
        // before waiting on the formatter, or the formatter never sees EOF.
        let status = {
            let mut driver = self.command(plan);
            if let Some(stdin) = formatter_child.stdin.take() {
                driver.stdout(Stdio::from(stdin));
            }
            driver.status()
        };

        if let Err(e) = formatter_child.wait() {
            warn!("{} did not exit cleanly: {}", formatter, e);
        }
        Ok(status?)
    }
}

impl BuildDriver for XcodebuildDriver {
    fn run(&self, plan: &ExecutionPlan) -> Result<()> {
        info!("Running: {}", plan.to_shell_command(&self.program));

        let status = match self.formatter.split_first() {
            Some((formatter, args)) if !plan.verbose => self.run_formatted(plan, formatter, args)?,
            _ => self.run_raw(plan)?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::BuildFailedError {
                driver: self.program.clone(),
                scheme: plan.scheme.clone(),
                code: status.code(),
            })
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}
