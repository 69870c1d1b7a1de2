use std::any::Any;
use std::fmt;

/// 测试体中途退出的原因
///
/// `Stop` 来自 `fail(.., require = true)`，只结束当前测试体，不算错误；
/// `Raised` 是测试体主动抛出（或通过 `?` 传播）的错误。
#[derive(Debug)]
pub enum Interrupt {
    /// require 失败后的停止信号
    Stop,
    /// 意料之外的错误
    Raised(RaisedError),
}

/// 测试体的返回值
pub type TestOutcome = Result<(), Interrupt>;

/// 生命周期钩子的返回值（setup_class / setup / teardown / teardown_class）
pub type HookResult = Result<(), RaisedError>;

impl From<RaisedError> for Interrupt {
    fn from(err: RaisedError) -> Self {
        Interrupt::Raised(err)
    }
}

impl<E> From<E> for Interrupt
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Interrupt::Raised(RaisedError::from(err))
    }
}

/// 捕获到的错误
///
/// 保留错误类型名、消息和 source 链，用于比较和渲染。
/// 不实现 `std::error::Error`，这样任何标准错误都能通过 `?` 转换进来。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisedError {
    /// 错误类型（Rust 类型名，或 panic 时为 "panic"）
    pub kind: String,

    /// 错误消息
    pub message: String,

    /// source 链上每一层的消息，由外到内
    pub causes: Vec<String>,
}

impl RaisedError {
    pub const PANIC_KIND: &'static str = "panic";

    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// 只有消息的通用错误
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }

    /// 从任意标准错误捕获，沿 source 链收集原因
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized + 'static,
    {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            causes,
        }
    }

    /// 从 panic payload 捕获
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new(Self::PANIC_KIND, message)
    }

    pub fn is_panic(&self) -> bool {
        self.kind == Self::PANIC_KIND
    }
}

impl fmt::Display for RaisedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl<E> From<E> for RaisedError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::from_error(&err)
    }
}
