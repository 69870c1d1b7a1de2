use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::RutestError;
use crate::config::{ConfigLoader, OutputConfig};
use crate::discovery::{TestSource, discover_all};
use crate::runner::{TestReporter, TestRunner, TestSummary};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser, Debug, Default)]
#[command(name = "rutest", author, version, about, long_about = None)]
pub struct Cli {
    /// 要运行的测试源名称，按给定顺序运行；省略时运行全部
    pub sources: Vec<String>,

    /// 配置文件路径（默认查找 rutest.toml）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 关闭彩色输出
    #[arg(long = "no-colour", alias = "no-color")]
    pub no_colour: bool,

    /// 缩进空格数
    #[arg(long)]
    pub indent_size: Option<usize>,
}

impl Cli {
    /// 合并配置文件和命令行参数，命令行优先
    pub fn output_config(&self) -> Result<OutputConfig> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => ConfigLoader::find_and_load().unwrap_or_default(),
        };

        let mut output = config.output;
        if self.no_colour {
            output.colour = false;
        }
        if let Some(indent_size) = self.indent_size {
            output.indent_size = indent_size;
        }
        Ok(output)
    }
}

/// 按名称挑选测试源；没有指定名称时返回全部
pub fn select_sources(
    sources: Vec<TestSource>,
    names: &[String],
) -> std::result::Result<Vec<TestSource>, RutestError> {
    if names.is_empty() {
        return Ok(sources);
    }

    let mut pool = sources;
    let mut selected: Vec<TestSource> = Vec::with_capacity(names.len());
    for name in names {
        if selected.iter().any(|source| source.name() == name) {
            continue;
        }
        let index = pool
            .iter()
            .position(|source| source.name() == name)
            .ok_or_else(|| RutestError::UnknownSource(name.clone()))?;
        selected.push(pool.remove(index));
    }
    Ok(selected)
}

/// 发现、运行并报告，返回摘要
pub fn run<W: Write>(cli: &Cli, sources: Vec<TestSource>, out: &mut W) -> Result<TestSummary> {
    let output = cli.output_config()?;
    let sources = select_sources(sources, &cli.sources)?;
    tracing::debug!("Running {} test sources", sources.len());

    let units = discover_all(sources).map_err(RutestError::from)?;
    let results = TestRunner::new().run_all(&units);

    let summary = TestReporter::new(&output).report(out, &results)?;
    Ok(summary)
}

/// 测试程序入口
///
/// 在自己的测试二进制里注册测试源后调用：
///
/// ```no_run
/// use std::process::ExitCode;
///
/// fn main() -> ExitCode {
///     rutest::cli::main(vec![rutest::TestSource::new("empty_test")])
/// }
/// ```
pub fn main(sources: Vec<TestSource>) -> ExitCode {
    crate::logger::init_logger();
    let cli = Cli::parse();

    // 测试体里的 panic 会被捕获成 Error 结果，这里不让默认 hook 再打印一遍
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| tracing::debug!("Captured panic: {}", info)));
    let outcome = run(&cli, sources, &mut io::stdout().lock());
    panic::set_hook(default_hook);

    match outcome {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("rutest: {:#}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    fn sources() -> Vec<TestSource> {
        vec![
            TestSource::new("alpha_test").function("test_a", 1, |_| Ok(())),
            TestSource::new("beta_test").function("test_b", 1, |t: &mut TestContext| {
                t.fail("b failed", false)
            }),
        ]
    }

    fn plain_cli(names: &[&str]) -> Cli {
        Cli {
            sources: names.iter().map(|s| s.to_string()).collect(),
            no_colour: true,
            indent_size: Some(4),
            ..Cli::default()
        }
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "rutest",
            "numbers_test",
            "classes_test",
            "--no-colour",
            "--indent-size",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.sources, vec!["numbers_test", "classes_test"]);
        assert!(cli.no_colour);
        assert_eq!(cli.indent_size, Some(2));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_select_sources_in_given_order() {
        let names = vec!["beta_test".to_string(), "alpha_test".to_string()];
        let selected = select_sources(sources(), &names).unwrap();
        let selected: Vec<&str> = selected.iter().map(TestSource::name).collect();
        assert_eq!(selected, vec!["beta_test", "alpha_test"]);
    }

    #[test]
    fn test_select_unknown_source() {
        let names = vec!["gamma_test".to_string()];
        let err = select_sources(sources(), &names).err().unwrap();
        assert!(matches!(err, RutestError::UnknownSource(name) if name == "gamma_test"));
    }

    #[test]
    fn test_run_prints_results() {
        let mut out = Vec::new();
        let summary = run(&plain_cli(&[]), sources(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "test_a PASS\ntest_b FAIL\n    - b failed\n2 tests run; 1 passed, 1 failed\n"
        );
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_run_selected_source_only() {
        let mut out = Vec::new();
        let summary = run(&plain_cli(&["alpha_test"]), sources(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "test_a PASS\n1 test run; 1 passed\n");
        assert!(summary.all_passed());
    }

    #[test]
    fn test_indent_size_override() {
        let cli = Cli {
            indent_size: Some(2),
            ..plain_cli(&[])
        };
        let output = cli.output_config().unwrap();
        assert_eq!(output.indent_size, 2);
        assert!(!output.colour);
    }
}
