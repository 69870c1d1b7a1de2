//! 测试发现
//!
//! 从一个测试源中挑出测试单元，并按定义行排序：
//! - 测试函数：`test_` 开头，接受 `TestContext`，定义在本源中
//! - 测试类：`Test` 开头，定义在本源中，至少有一个 `test_` 开头的方法
//!
//! 其他成员静默跳过。

pub mod source;
pub mod unit;

pub use source::{Item, Member, TestSource};
pub use unit::{ClassUnit, TestClass, TestFunction, TestMethod, TestUnit};

use tracing::debug;

/// 测试函数 / 测试方法名前缀
pub const TEST_PREFIX: &str = "test_";

/// 测试类名前缀
pub const CLASS_PREFIX: &str = "Test";

/// 发现错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    /// 两个测试单元注册在同一行，无法确定顺序
    #[error("{first} and {second} in {scope} are both defined at line {line}")]
    DuplicateLine {
        scope: String,
        first: String,
        second: String,
        line: u32,
    },
}

/// 从单个测试源发现测试单元，按定义行升序排列
pub fn discover_tests(source: TestSource) -> Result<Vec<TestUnit>, DiscoveryError> {
    let source_name = source.name().to_string();
    let mut units = Vec::new();

    for member in source.into_members() {
        if member.origin != source_name {
            debug!(
                "Skipping {} imported from {}",
                member.item.name(),
                member.origin
            );
            continue;
        }

        match member.item {
            Item::Function(function) if function.name().starts_with(TEST_PREFIX) => {
                units.push(TestUnit::Function(function));
            }
            Item::Class(mut class) if class.name().starts_with(CLASS_PREFIX) => {
                if class.retain_test_methods()? == 0 {
                    debug!("Skipping {} without test methods", class.name());
                    continue;
                }
                units.push(TestUnit::Class(class));
            }
            item => debug!("Skipping non-test member {}", item.name()),
        }
    }

    units.sort_by_key(TestUnit::line);

    if let Some(pair) = units.windows(2).find(|pair| pair[0].line() == pair[1].line()) {
        return Err(DiscoveryError::DuplicateLine {
            scope: source_name,
            first: pair[0].name().to_string(),
            second: pair[1].name().to_string(),
            line: pair[0].line(),
        });
    }

    debug!("Discovered {} test units in {}", units.len(), source_name);
    Ok(units)
}

/// 依次发现多个测试源，保持源的先后顺序
pub fn discover_all(sources: Vec<TestSource>) -> Result<Vec<TestUnit>, DiscoveryError> {
    let mut units = Vec::new();
    for source in sources {
        units.extend(discover_tests(source)?);
    }
    Ok(units)
}
