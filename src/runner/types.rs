use crate::context::RaisedError;

/// 结果状态（不含数据的标签）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Error,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Error => "ERROR",
        }
    }
}

/// 单个测试单元的执行结果
///
/// 测试类的结果在 `sub_results` 中按定义顺序保存各个测试方法的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    Pass {
        name: String,
        sub_results: Vec<TestResult>,
    },
    Fail {
        name: String,
        /// 失败消息（可能为空）
        messages: Vec<String>,
        sub_results: Vec<TestResult>,
    },
    Error {
        name: String,
        /// 捕获到的错误；由子结果推导出的 Error 没有错误对象
        error: Option<RaisedError>,
        sub_results: Vec<TestResult>,
    },
}

impl TestResult {
    pub fn pass(name: impl Into<String>) -> Self {
        TestResult::Pass {
            name: name.into(),
            sub_results: Vec::new(),
        }
    }

    pub fn fail(name: impl Into<String>, messages: Vec<String>) -> Self {
        TestResult::Fail {
            name: name.into(),
            messages,
            sub_results: Vec::new(),
        }
    }

    pub fn error(name: impl Into<String>, error: RaisedError) -> Self {
        TestResult::Error {
            name: name.into(),
            error: Some(error),
            sub_results: Vec::new(),
        }
    }

    /// 根据子结果推导测试类的整体结果
    ///
    /// 任一子结果为 Error 则为 Error，否则任一为 Fail 则为 Fail，否则为 Pass。
    pub fn aggregate(name: impl Into<String>, sub_results: Vec<TestResult>) -> Self {
        let name = name.into();
        let status = sub_results
            .iter()
            .map(TestResult::status)
            .fold(Status::Pass, |acc, status| match (acc, status) {
                (Status::Error, _) | (_, Status::Error) => Status::Error,
                (Status::Fail, _) | (_, Status::Fail) => Status::Fail,
                _ => Status::Pass,
            });

        match status {
            Status::Pass => TestResult::Pass { name, sub_results },
            Status::Fail => TestResult::Fail {
                name,
                messages: Vec::new(),
                sub_results,
            },
            Status::Error => TestResult::Error {
                name,
                error: None,
                sub_results,
            },
        }
    }

    /// 替换子结果
    pub fn with_sub_results(mut self, results: Vec<TestResult>) -> Self {
        match &mut self {
            TestResult::Pass { sub_results, .. }
            | TestResult::Fail { sub_results, .. }
            | TestResult::Error { sub_results, .. } => *sub_results = results,
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            TestResult::Pass { name, .. }
            | TestResult::Fail { name, .. }
            | TestResult::Error { name, .. } => name,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            TestResult::Pass { .. } => Status::Pass,
            TestResult::Fail { .. } => Status::Fail,
            TestResult::Error { .. } => Status::Error,
        }
    }

    pub fn sub_results(&self) -> &[TestResult] {
        match self {
            TestResult::Pass { sub_results, .. }
            | TestResult::Fail { sub_results, .. }
            | TestResult::Error { sub_results, .. } => sub_results,
        }
    }

    /// Fail 结果的消息，其他结果为空
    pub fn messages(&self) -> &[String] {
        match self {
            TestResult::Fail { messages, .. } => messages,
            _ => &[],
        }
    }

    /// Error 结果捕获到的错误
    pub fn raised_error(&self) -> Option<&RaisedError> {
        match self {
            TestResult::Error { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status() == Status::Pass
    }
}

/// 测试摘要
///
/// 计数包含所有层级的结果：测试类本身和它的每个测试方法都各算一次。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl TestSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let mut summary = Self::default();
        summary.collect(results);
        summary
    }

    fn collect(&mut self, results: &[TestResult]) {
        for result in results {
            self.total += 1;
            match result.status() {
                Status::Pass => self.passed += 1,
                Status::Fail => self.failed += 1,
                Status::Error => self.errored += 1,
            }
            self.collect(result.sub_results());
        }
    }

    /// 是否全部通过
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}
