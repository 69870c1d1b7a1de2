use crate::context::{TestContext, TestOutcome};
use crate::discovery::unit::{ClassUnit, TestClass, TestFunction};

/// 测试源中的一个条目
pub enum Item {
    /// 接受 `TestContext` 的函数
    Function(TestFunction),
    /// 测试类
    Class(Box<dyn ClassUnit>),
    /// 其他成员：普通辅助函数、签名不对的函数、常量等
    Helper { name: String, line: u32 },
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Function(function) => function.name(),
            Item::Class(class) => class.name(),
            Item::Helper { name, .. } => name,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Item::Function(function) => function.line(),
            Item::Class(class) => class.line(),
            Item::Helper { line, .. } => *line,
        }
    }
}

/// 测试源成员，记录它最初定义在哪个源里
pub struct Member {
    /// 定义所在的源名称
    pub origin: String,

    pub item: Item,
}

/// 一个已加载的测试源（对应一个测试文件 / 模块）
///
/// 成员通过显式注册加入，`line` 一般直接传 `line!()`：
///
/// ```
/// use rutest::{TestContext, TestSource};
///
/// let source = TestSource::new("numbers_test")
///     .function("test_add", line!(), |t: &mut TestContext| {
///         t.assert_equal(5, 2 + 3, "", false)
///     });
/// assert_eq!(source.members().len(), 1);
/// ```
pub struct TestSource {
    name: String,
    members: Vec<Member>,
}

impl TestSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// 源的规范名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 注册一个定义在本源中的函数
    pub fn function<F>(self, name: impl Into<String>, line: u32, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> TestOutcome + 'static,
    {
        self.local(Item::Function(TestFunction::new(name, line, body)))
    }

    /// 注册一个定义在本源中的类
    pub fn class<S, I>(self, class: TestClass<S, I>) -> Self
    where
        S: Default + 'static,
        I: Default + 'static,
    {
        self.local(Item::Class(Box::new(class)))
    }

    /// 注册一个非测试成员
    pub fn helper(self, name: impl Into<String>, line: u32) -> Self {
        self.local(Item::Helper {
            name: name.into(),
            line,
        })
    }

    /// 注册一个从其他源导入的成员；发现阶段会忽略它
    pub fn import(mut self, origin: impl Into<String>, item: Item) -> Self {
        self.members.push(Member {
            origin: origin.into(),
            item,
        });
        self
    }

    fn local(mut self, item: Item) -> Self {
        let origin = self.name.clone();
        self.members.push(Member { origin, item });
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Member> {
        self.members
    }
}
