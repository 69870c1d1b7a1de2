use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::context::{HookResult, RaisedError};
use crate::discovery::TestClass;
use crate::runner::executor::run_function;
use crate::runner::types::TestResult;

/// 生命周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    SetupClass,
    Setup,
    Teardown,
    TeardownClass,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleStage::SetupClass => "setup_class",
            LifecycleStage::Setup => "setup",
            LifecycleStage::Teardown => "teardown",
            LifecycleStage::TeardownClass => "teardown_class",
        };
        f.write_str(name)
    }
}

/// 生命周期钩子失败：中止剩余工作，保留已经得到的结果
#[derive(Debug)]
struct LifecycleFailure {
    stage: LifecycleStage,
    error: RaisedError,
    results: Vec<TestResult>,
}

/// 运行一个测试类
///
/// 钩子失败时整体为 Error（错误对象为钩子的错误），子结果为失败前已完成的方法；
/// 否则由子结果推导整体结果。
pub(crate) fn run_class<S, I>(class: &TestClass<S, I>) -> TestResult
where
    S: Default,
    I: Default,
{
    match run_methods(class) {
        Ok(results) => TestResult::aggregate(&class.name, results),
        Err(failure) => {
            warn!(
                "{} failed in {}: {} ({} results kept)",
                class.name,
                failure.stage,
                failure.error,
                failure.results.len()
            );
            TestResult::error(&class.name, failure.error).with_sub_results(failure.results)
        }
    }
}

fn run_methods<S, I>(class: &TestClass<S, I>) -> Result<Vec<TestResult>, LifecycleFailure>
where
    S: Default,
    I: Default,
{
    let mut state = S::default();
    let mut results = Vec::with_capacity(class.methods.len());

    if let Some(hook) = &class.setup_class
        && let Err(error) = call_hook(|| hook(&mut state))
    {
        return Err(LifecycleFailure {
            stage: LifecycleStage::SetupClass,
            error,
            results,
        });
    }

    for method in &class.methods {
        // 每个方法都用新实例，上一个方法的实例状态不会带过来
        let mut instance = I::default();

        if let Some(hook) = &class.setup
            && let Err(error) = call_hook(|| hook(&state, &mut instance))
        {
            return Err(LifecycleFailure {
                stage: LifecycleStage::Setup,
                error,
                results,
            });
        }

        debug!("Running {}/{}", class.name, method.name);
        let result = run_function(&method.name, |t| (method.body)(&state, &mut instance, t));
        results.push(result);

        if let Some(hook) = &class.teardown
            && let Err(error) = call_hook(|| hook(&state, &mut instance))
        {
            return Err(LifecycleFailure {
                stage: LifecycleStage::Teardown,
                error,
                results,
            });
        }
    }

    if let Some(hook) = &class.teardown_class
        && let Err(error) = call_hook(|| hook(&mut state))
    {
        return Err(LifecycleFailure {
            stage: LifecycleStage::TeardownClass,
            error,
            results,
        });
    }

    Ok(results)
}

/// 调用钩子，panic 也当作错误捕获
fn call_hook<F>(hook: F) -> HookResult
where
    F: FnOnce() -> HookResult,
{
    match panic::catch_unwind(AssertUnwindSafe(hook)) {
        Ok(result) => result,
        Err(payload) => Err(RaisedError::from_panic(payload)),
    }
}
