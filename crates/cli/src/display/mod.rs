pub mod formatter;
pub mod plan_breakdown;

pub use formatter::{print_test_match, relative_to};
pub use plan_breakdown::print_plan_breakdown;
