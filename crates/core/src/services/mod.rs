//! Service implementations for the interface traits
//!
//! Each service backs one interface with the Xcode command line tools or
//! the files they produce.

pub mod pbxproj_model;
pub mod xcodebuild_driver;
pub mod xcrun_probe;

pub use pbxproj_model::PbxprojModel;
pub use xcodebuild_driver::XcodebuildDriver;
pub use xcrun_probe::XcrunProbe;
