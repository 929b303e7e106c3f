//! Configuration management for pod-testing

mod settings;

// Re-export main types
pub use settings::Config;
