use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Container;

/// A build target declared by a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    pub name: String,
    /// `None` when the project model could not determine the product type
    pub product_type: Option<String>,
}

impl BuildTarget {
    pub fn new(name: impl Into<String>, product_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product_type: Some(product_type.into()),
        }
    }

    pub fn without_product_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product_type: None,
        }
    }
}

/// A unit-test target paired with the scheme that runs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMatch {
    pub container: Container,
    /// The project that declares the target
    pub project: PathBuf,
    pub target: String,
    pub scheme: String,
}
