//! Seams to the collaborators the engine drives but does not implement
//!
//! The project file format, the machine's simulators and SDKs, and the
//! build tool are each reached through one of these traits, so the
//! discovery and planning logic can run against fakes in tests.

pub mod build_driver;
pub mod environment_probe;
pub mod project_model;

pub use build_driver::BuildDriver;
pub use environment_probe::{EnvironmentProbe, Sdk, Simulator, SimulatorState};
pub use project_model::ProjectModel;
