//! Environment probe that scrapes `xcrun simctl` and `xcodebuild -showsdks`

use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interfaces::{EnvironmentProbe, Sdk, Simulator, SimulatorState};

/// `    iPhone 15 Pro (5B2E8C4A-0D3B-4C41-9C55-1A2B3C4D5E6F) (Booted)`
static DEVICE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.+?)\s+\(([0-9A-Fa-f-]+)\)\s+\((Booted|Shutdown)\)\s*$")
        .expect("device row pattern is valid")
});

/// `-- iOS 17.2 --`
static RUNTIME_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*--\s*(.+?)\s*--\s*$").expect("runtime header pattern is valid")
});

pub struct XcrunProbe {
    simulator_platform: String,
    sdk_platform: String,
}

impl XcrunProbe {
    pub fn new(config: &Config) -> Self {
        Self {
            simulator_platform: config.simulator_platform.clone(),
            sdk_platform: config.sdk_platform.clone(),
        }
    }
}

impl EnvironmentProbe for XcrunProbe {
    fn simulators(&self) -> Result<Vec<Simulator>> {
        match capture("xcrun", &["simctl", "list", "devices"]) {
            Some(output) => Ok(parse_simulators(&output, &self.simulator_platform)),
            None => Ok(Vec::new()),
        }
    }

    fn sdks(&self) -> Result<Vec<Sdk>> {
        match capture("xcodebuild", &["-showsdks"]) {
            Some(output) => parse_sdks(&output, &self.sdk_platform),
            None => Ok(Vec::new()),
        }
    }
}

/// Stdout of a probe command, or `None` if it could not run or failed
fn capture(program: &str, args: &[&str]) -> Option<String> {
    debug!("Probing: {} {}", program, args.join(" "));
    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            warn!(
                "{} {} exited with {}: {}",
                program,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(e) => {
            warn!("Could not run {}: {}", program, e);
            None
        }
    }
}

/// Booted and shut down devices listed by `simctl list devices`.
///
/// Rows under a runtime header for another platform are ignored; rows before
/// any header are accepted.
pub fn parse_simulators(output: &str, platform: &str) -> Vec<Simulator> {
    let mut in_platform = true;
    let mut simulators = Vec::new();

    for line in output.lines() {
        if let Some(header) = RUNTIME_HEADER.captures(line) {
            in_platform = header[1].starts_with(platform);
            continue;
        }
        if !in_platform {
            continue;
        }
        if let Some(caps) = DEVICE_ROW.captures(line) {
            let state = match &caps[3] {
                "Booted" => SimulatorState::Booted,
                _ => SimulatorState::Shutdown,
            };
            simulators.push(Simulator {
                name: caps[1].to_string(),
                state,
            });
        }
    }

    simulators
}

/// SDK versions of `platform` listed by `xcodebuild -showsdks`.
///
/// Accepts both `-sdk iphonesimulator17.2` and `(iphonesimulator9.3)` rows.
pub fn parse_sdks(output: &str, platform: &str) -> Result<Vec<Sdk>> {
    let row = Regex::new(&format!(
        r"{}(\d+(?:\.\d+)*)\)?\s*$",
        regex::escape(platform)
    ))
    .map_err(|e| Error::ConfigError(format!("Invalid SDK platform '{platform}': {e}")))?;

    Ok(output
        .lines()
        .filter(|line| line.contains(platform))
        .filter_map(|line| row.captures(line))
        .map(|caps| Sdk {
            platform: platform.to_string(),
            version: caps[1].to_string(),
        })
        .collect())
}
