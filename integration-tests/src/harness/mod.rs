mod fixtures;
pub mod site;
pub mod tracing;

pub use fixtures::write_fixture_tree;
pub use site::{TestResponse, TestSite};
pub use self::tracing::{CapturedEvent, init_test_tracing};
