/// 执行上下文 - 测试体通过它记录失败
mod test_context;
mod types;

pub use test_context::TestContext;
pub use types::{HookResult, Interrupt, RaisedError, TestOutcome};
