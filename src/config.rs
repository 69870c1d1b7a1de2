use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{Result, RutestError};

/// 输出配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 是否彩色输出
    pub colour: bool,

    /// 失败消息 / 错误详情的缩进空格数
    pub indent_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            colour: true,
            indent_size: 4,
        }
    }
}

/// 完整的配置文件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct RutestConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "rutest.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<RutestConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RutestError::ConfigError(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/rutest/
    pub fn find_and_load() -> Option<RutestConfig> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    /// 尝试从当前目录及其父目录加载
    fn try_load_from_current_dir() -> Option<RutestConfig> {
        let current = std::env::current_dir().ok()?;
        Self::try_load_from_ancestors(&current)
    }

    fn try_load_from_ancestors(start: &Path) -> Option<RutestConfig> {
        let config_path = start
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.exists())?;

        Self::load_or_warn(&config_path)
    }

    /// 尝试从用户配置目录加载
    fn try_load_from_user_dir() -> Option<RutestConfig> {
        let home = dirs::home_dir()?;
        Self::try_load_from_dir(&home.join(".config").join("rutest"))
    }

    fn try_load_from_dir(dir: &Path) -> Option<RutestConfig> {
        let config_path = dir.join(Self::CONFIG_FILE);
        if config_path.exists() {
            Self::load_or_warn(&config_path)
        } else {
            None
        }
    }

    /// 加载失败时记录警告并忽略该文件
    fn load_or_warn(config_path: &Path) -> Option<RutestConfig> {
        match Self::load_from_path(config_path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", config_path.display(), e);
                None
            }
        }
    }
}
