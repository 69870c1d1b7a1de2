use std::fmt;

use crate::context::{HookResult, TestContext, TestOutcome};
use crate::discovery::{DiscoveryError, TEST_PREFIX};
use crate::runner::TestResult;
use crate::runner::classes;

/// 测试函数体
pub type TestBody = Box<dyn Fn(&mut TestContext) -> TestOutcome>;

/// 测试方法体：类级状态（只读）、实例状态、执行上下文
pub type MethodBody<S, I> = Box<dyn Fn(&S, &mut I, &mut TestContext) -> TestOutcome>;

/// 类级钩子（setup_class / teardown_class）
pub type ClassHook<S> = Box<dyn Fn(&mut S) -> HookResult>;

/// 实例级钩子（setup / teardown）
pub type InstanceHook<S, I> = Box<dyn Fn(&S, &mut I) -> HookResult>;

/// 发现后的测试单元
///
/// 在发现阶段就确定是函数还是类，runner 只按标签分派。
pub enum TestUnit {
    Function(TestFunction),
    Class(Box<dyn ClassUnit>),
}

impl TestUnit {
    pub fn name(&self) -> &str {
        match self {
            TestUnit::Function(function) => function.name(),
            TestUnit::Class(class) => class.name(),
        }
    }

    /// 定义顺序键（源码行号）
    pub fn line(&self) -> u32 {
        match self {
            TestUnit::Function(function) => function.line(),
            TestUnit::Class(class) => class.line(),
        }
    }
}

impl fmt::Debug for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestUnit::Function(function) => f.debug_tuple("Function").field(function).finish(),
            TestUnit::Class(class) => f
                .debug_struct("Class")
                .field("name", &class.name())
                .field("line", &class.line())
                .field("methods", &class.method_names())
                .finish(),
        }
    }
}

/// 独立的测试函数
pub struct TestFunction {
    name: String,
    line: u32,
    body: TestBody,
}

impl TestFunction {
    pub fn new<F>(name: impl Into<String>, line: u32, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> TestOutcome + 'static,
    {
        Self {
            name: name.into(),
            line,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn call(&self, context: &mut TestContext) -> TestOutcome {
        (self.body)(context)
    }
}

impl fmt::Debug for TestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFunction")
            .field("name", &self.name)
            .field("line", &self.line)
            .finish()
    }
}

/// 测试类中的一个方法
pub struct TestMethod<S, I> {
    pub(crate) name: String,
    pub(crate) line: u32,
    pub(crate) body: MethodBody<S, I>,
}

/// 测试类
///
/// `S` 是类级状态：每次运行这个类时创建一次，`setup_class` / `teardown_class`
/// 可以修改，所有方法只读共享。`I` 是实例状态：每个方法运行前重新创建，
/// 在 `setup`、方法体、`teardown` 之间传递，方法结束后丢弃。
pub struct TestClass<S, I> {
    pub(crate) name: String,
    pub(crate) line: u32,
    pub(crate) setup_class: Option<ClassHook<S>>,
    pub(crate) teardown_class: Option<ClassHook<S>>,
    pub(crate) setup: Option<InstanceHook<S, I>>,
    pub(crate) teardown: Option<InstanceHook<S, I>>,
    pub(crate) methods: Vec<TestMethod<S, I>>,
}

impl<S, I> TestClass<S, I> {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            setup_class: None,
            teardown_class: None,
            setup: None,
            teardown: None,
            methods: Vec::new(),
        }
    }

    /// 所有方法运行前调用一次
    pub fn setup_class<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut S) -> HookResult + 'static,
    {
        self.setup_class = Some(Box::new(hook));
        self
    }

    /// 所有方法运行后调用一次
    pub fn teardown_class<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut S) -> HookResult + 'static,
    {
        self.teardown_class = Some(Box::new(hook));
        self
    }

    /// 每个方法运行前，在新实例上调用
    pub fn setup<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &mut I) -> HookResult + 'static,
    {
        self.setup = Some(Box::new(hook));
        self
    }

    /// 每个方法运行后，在同一个实例上调用
    pub fn teardown<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &mut I) -> HookResult + 'static,
    {
        self.teardown = Some(Box::new(hook));
        self
    }

    /// 注册一个方法；只有 `test_` 开头的方法会被当作测试
    pub fn method<F>(mut self, name: impl Into<String>, line: u32, body: F) -> Self
    where
        F: Fn(&S, &mut I, &mut TestContext) -> TestOutcome + 'static,
    {
        self.methods.push(TestMethod {
            name: name.into(),
            line,
            body: Box::new(body),
        });
        self
    }
}

/// 类型擦除后的测试类，供 [`TestUnit::Class`] 使用
pub trait ClassUnit {
    fn name(&self) -> &str;

    fn line(&self) -> u32;

    /// 当前保留的方法名（按当前顺序）
    fn method_names(&self) -> Vec<&str>;

    /// 只保留测试方法并按定义行排序，返回保留的数量
    fn retain_test_methods(&mut self) -> Result<usize, DiscoveryError>;

    /// 运行整个类（生命周期状态机见 `runner::classes`）
    fn execute(&self) -> TestResult;
}

impl<S, I> ClassUnit for TestClass<S, I>
where
    S: Default + 'static,
    I: Default + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    fn retain_test_methods(&mut self) -> Result<usize, DiscoveryError> {
        self.methods.retain(|m| m.name.starts_with(TEST_PREFIX));
        self.methods.sort_by_key(|m| m.line);

        if let Some(pair) = self.methods.windows(2).find(|pair| pair[0].line == pair[1].line) {
            return Err(DiscoveryError::DuplicateLine {
                scope: self.name.clone(),
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
                line: pair[0].line,
            });
        }

        Ok(self.methods.len())
    }

    fn execute(&self) -> TestResult {
        classes::run_class(self)
    }
}
