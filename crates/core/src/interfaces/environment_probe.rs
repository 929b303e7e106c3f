//! Environment probe interface
//!
//! Reports the simulators and SDKs installed on the machine. Implementations
//! return entries in the order the underlying tool lists them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorState {
    Booted,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulator {
    pub name: String,
    pub state: SimulatorState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sdk {
    /// SDK family, e.g. `iphonesimulator`
    pub platform: String,
    /// Dotted version, e.g. `17.2`
    pub version: String,
}

impl Sdk {
    /// Compare versions numerically component by component (`9.3` < `10.0`)
    pub fn cmp_version(&self, other: &Sdk) -> Ordering {
        let parse = |v: &str| -> Vec<u64> {
            v.split('.').map(|part| part.parse().unwrap_or(0)).collect()
        };
        parse(&self.version).cmp(&parse(&other.version))
    }
}

pub trait EnvironmentProbe: Send + Sync {
    /// Simulators that are booted or shut down, in listing order
    fn simulators(&self) -> Result<Vec<Simulator>>;

    /// Installed SDKs for the configured platform, in listing order
    fn sdks(&self) -> Result<Vec<Sdk>>;

    /// The highest installed SDK version
    fn latest_sdk(&self) -> Result<Option<Sdk>> {
        Ok(self.sdks()?.into_iter().max_by(|a, b| a.cmp_version(b)))
    }

    /// The first listed simulator
    fn first_simulator(&self) -> Result<Option<Simulator>> {
        Ok(self.simulators()?.into_iter().next())
    }
}
