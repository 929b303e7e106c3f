//! Mapping of build targets to the schemes that test them

pub mod map;
pub mod resolver;

pub use map::SchemeMap;
pub use resolver::SchemeResolver;
