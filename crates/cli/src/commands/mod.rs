pub mod list;

pub use list::list_command;
pub use test::test_command;
