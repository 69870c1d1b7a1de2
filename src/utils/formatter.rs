use crate::runner::{Status, TestResult};
use colored::*;

pub struct ResultFormatter {
    color: bool,
    indent_size: usize,
}

impl ResultFormatter {
    pub fn new(color: bool, indent_size: usize) -> Self {
        Self { color, indent_size }
    }

    /// 格式化一组结果，每个结果一行标题，后面跟失败消息 / 错误详情和子结果
    ///
    /// ```text
    /// TestFoo FAIL
    /// TestFoo/test_passes PASS
    /// TestFoo/test_fails FAIL
    ///     - oh no!
    /// ```
    pub fn format(&self, results: &[TestResult]) -> String {
        let mut output = Vec::new();
        self.format_into(results, "", &mut output);
        output.join("\n")
    }

    fn format_into(&self, results: &[TestResult], prefix: &str, output: &mut Vec<String>) {
        for result in results {
            output.push(self.format_title(result, prefix));

            match result {
                TestResult::Fail { messages, .. } => {
                    for message in messages {
                        output.push(self.indent(&format!("- {}", message)));
                    }
                }
                TestResult::Error {
                    error: Some(error), ..
                } => {
                    output.push(self.indent(&error.to_string()));
                    if !error.causes.is_empty() {
                        output.push(self.indent("Caused by:"));
                        for cause in &error.causes {
                            output.push(self.indent(&self.indent(cause)));
                        }
                    }
                }
                _ => {}
            }

            if !result.sub_results().is_empty() {
                let child_prefix = format!("{}{}/", prefix, result.name());
                self.format_into(result.sub_results(), &child_prefix, output);
            }
        }
    }

    fn format_title(&self, result: &TestResult, prefix: &str) -> String {
        let status = result.status();
        let title = format!("{}{} {}", prefix, result.name(), status.label());
        if !self.color {
            return title;
        }
        let colored_title = match status {
            Status::Pass => title.green().bold(),
            Status::Fail => title.red().bold(),
            Status::Error => title.blue().bold(),
        };
        colored_title.to_string()
    }

    fn indent(&self, s: &str) -> String {
        let padding = " ".repeat(self.indent_size);
        s.lines()
            .map(|line| format!("{}{}", padding, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(true, 4)
    }
}
