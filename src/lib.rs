pub mod cli;
pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod logger;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use context::{HookResult, Interrupt, RaisedError, TestContext, TestOutcome};
pub use discovery::{TestClass, TestSource, TestUnit, discover_all, discover_tests};
pub use error::{Result, RutestError};
pub use runner::{TestResult, TestRunner};
