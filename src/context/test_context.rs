use std::any::Any;
use std::fmt::Debug;

use crate::context::types::{Interrupt, TestOutcome};

/// 测试运行时可用的上下文，负责记录失败
///
/// 每次调用测试体都会新建一个，调用结束即丢弃，不会在测试之间共享。
///
/// ```compile_fail
/// let t = rutest::TestContext::new();
/// let copy = t.clone();
/// ```
#[derive(Debug)]
pub struct TestContext {
    passed: bool,
    messages: Vec<String>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            passed: true,
            messages: Vec::new(),
        }
    }

    /// 标记当前测试失败
    ///
    /// 空消息不会被记录，但依然会让测试失败。
    /// `require` 为 true 时返回 `Err(Interrupt::Stop)`，配合 `?` 结束当前测试体。
    pub fn fail(&mut self, message: &str, require: bool) -> TestOutcome {
        self.passed = false;
        if !message.is_empty() {
            self.messages.push(message.to_string());
        }
        if require {
            return Err(Interrupt::Stop);
        }
        Ok(())
    }

    /// 断言两个值相等
    ///
    /// 字符串按原样写进失败消息，其他值使用 `Debug` 格式。
    pub fn assert_equal<E, A>(
        &mut self,
        expected: E,
        actual: A,
        message: &str,
        require: bool,
    ) -> TestOutcome
    where
        E: PartialEq<A> + Any + Debug,
        A: Any + Debug,
    {
        if expected == actual {
            return Ok(());
        }
        let failure = with_suffix(
            format!(
                "Expected {} and {} to be equal",
                display_value(&expected),
                display_value(&actual)
            ),
            message,
        );
        self.fail(&failure, require)
    }

    /// 断言值恰好是布尔值 `true`
    ///
    /// 其他类型的值（例如 `1` 或非空字符串）一律视为失败。
    pub fn assert_true<T>(&mut self, value: T, message: &str, require: bool) -> TestOutcome
    where
        T: Any + Debug,
    {
        self.assert_bool(true, value, message, require)
    }

    /// 断言值恰好是布尔值 `false`
    pub fn assert_false<T>(&mut self, value: T, message: &str, require: bool) -> TestOutcome
    where
        T: Any + Debug,
    {
        self.assert_bool(false, value, message, require)
    }

    fn assert_bool<T>(&mut self, wanted: bool, value: T, message: &str, require: bool) -> TestOutcome
    where
        T: Any + Debug,
    {
        let is_wanted = (&value as &dyn Any).downcast_ref::<bool>() == Some(&wanted);
        if is_wanted {
            return Ok(());
        }
        let label = if wanted { "True" } else { "False" };
        let failure = with_suffix(format!("Expected {:?} to be {}", value, label), message);
        self.fail(&failure, require)
    }

    /// 当前是否仍然通过
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// 已记录的失败消息（按调用顺序）
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// 拆出最终状态，交给 runner 生成结果
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.passed, self.messages)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 字符串类型去掉引号，其余使用 `Debug`
fn display_value<T: Any + Debug>(value: &T) -> String {
    let any = value as &dyn Any;
    if let Some(text) = any.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = any.downcast_ref::<String>() {
        text.clone()
    } else if let Some(c) = any.downcast_ref::<char>() {
        c.to_string()
    } else {
        format!("{:?}", value)
    }
}

fn with_suffix(failure: String, message: &str) -> String {
    if message.is_empty() {
        failure
    } else {
        format!("{}; {}", failure, message)
    }
}
