//! Picks the unit-test bundles out of a project's targets

use tracing::warn;

use crate::types::BuildTarget;

/// Suffix of the product type Xcode gives unit-test bundles
pub const UNIT_TEST_BUNDLE_MARKER: &str = "bundle.unit-test";

pub fn is_unit_test_bundle(target: &BuildTarget) -> bool {
    target
        .product_type
        .as_deref()
        .is_some_and(|product_type| product_type.ends_with(UNIT_TEST_BUNDLE_MARKER))
}

/// Targets that build unit-test bundles, in their original order.
///
/// Targets whose product type is unknown are skipped.
pub fn unit_test_targets(targets: &[BuildTarget]) -> Vec<&BuildTarget> {
    targets
        .iter()
        .filter(|target| {
            if target.product_type.is_none() {
                warn!("Skipping target '{}' with unknown product type", target.name);
                return false;
            }
            is_unit_test_bundle(target)
        })
        .collect()
}
