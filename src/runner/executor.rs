use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::context::{Interrupt, RaisedError, TestContext, TestOutcome};
use crate::discovery::TestUnit;
use crate::runner::types::TestResult;

/// 按顺序执行测试单元
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    pub fn new() -> Self {
        Self
    }

    /// 批量执行所有测试单元，结果顺序与输入一致
    pub fn run_all(&self, units: &[TestUnit]) -> Vec<TestResult> {
        units.iter().map(|unit| self.run_one(unit)).collect()
    }

    /// 执行单个测试单元
    pub fn run_one(&self, unit: &TestUnit) -> TestResult {
        debug!("Running {}", unit.name());

        let result = match unit {
            TestUnit::Function(function) => run_function(function.name(), |t| function.call(t)),
            TestUnit::Class(class) => class.execute(),
        };

        debug!("{} finished: {}", unit.name(), result.status().label());
        result
    }
}

/// 执行一个测试体（独立函数或绑定好的测试方法）
///
/// - `Interrupt::Stop` 视为正常结束
/// - 抛出错误或 panic 得到 Error，已记录的失败消息被丢弃
/// - 否则根据上下文得到 Fail 或 Pass
pub(crate) fn run_function<F>(name: &str, body: F) -> TestResult
where
    F: FnOnce(&mut TestContext) -> TestOutcome,
{
    let mut context = TestContext::new();

    match panic::catch_unwind(AssertUnwindSafe(|| body(&mut context))) {
        Ok(Ok(())) | Ok(Err(Interrupt::Stop)) => {}
        Ok(Err(Interrupt::Raised(error))) => return TestResult::error(name, error),
        Err(payload) => return TestResult::error(name, RaisedError::from_panic(payload)),
    }

    let (passed, messages) = context.into_parts();
    if passed {
        TestResult::pass(name)
    } else {
        TestResult::fail(name, messages)
    }
}
