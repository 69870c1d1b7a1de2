use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::runner::types::{TestResult, TestSummary};
use crate::utils::ResultFormatter;
use colored::Colorize;

pub struct TestReporter {
    color: bool,
    formatter: ResultFormatter,
}

impl TestReporter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            color: config.colour,
            formatter: ResultFormatter::new(config.colour, config.indent_size),
        }
    }

    /// 打印结果和摘要
    pub fn report<W: Write>(&self, out: &mut W, results: &[TestResult]) -> io::Result<TestSummary> {
        self.print_results(out, results)?;
        let summary = TestSummary::from_results(results);
        self.print_summary(out, &summary)?;
        Ok(summary)
    }

    /// 打印所有测试结果
    pub fn print_results<W: Write>(&self, out: &mut W, results: &[TestResult]) -> io::Result<()> {
        if results.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}", self.formatter.format(results))
    }

    /// 打印测试摘要
    ///
    /// 例如 `3 tests run; 1 passed, 1 failed, 1 errored`，为 0 的部分不显示。
    /// 只有数量大于 1 时才用复数，没有结果时输出 `0 test run; `。
    pub fn print_summary<W: Write>(&self, out: &mut W, summary: &TestSummary) -> io::Result<()> {
        let plural = if summary.total > 1 { "s" } else { "" };
        let mut parts = Vec::new();

        if summary.passed > 0 {
            parts.push(self.paint(format!("{} passed", summary.passed), |s| s.green()));
        }
        if summary.failed > 0 {
            parts.push(self.paint(format!("{} failed", summary.failed), |s| s.red()));
        }
        if summary.errored > 0 {
            parts.push(self.paint(format!("{} errored", summary.errored), |s| s.blue()));
        }

        let line = format!("{} test{} run; {}", summary.total, plural, parts.join(", "));

        if self.color {
            writeln!(out, "{}", line.bold())
        } else {
            writeln!(out, "{}", line)
        }
    }

    fn paint(&self, text: String, style: fn(String) -> colored::ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text
        }
    }
}

impl Default for TestReporter {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}
