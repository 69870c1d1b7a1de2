use thiserror::Error;

use crate::discovery::DiscoveryError;

#[derive(Error, Debug)]
pub enum RutestError {
    #[error("发现测试失败: {0}")]
    DiscoveryError(#[from] DiscoveryError),

    #[error("未知的测试源: {0}")]
    UnknownSource(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type for rutest crate
pub type Result<T> = std::result::Result<T, RutestError>;
