pub(crate) mod classes;
pub mod executor;
pub mod reporter;
pub mod types;

pub use classes::LifecycleStage;
pub use executor::TestRunner;
pub use reporter::TestReporter;
pub use types::{Status, TestResult, TestSummary};
