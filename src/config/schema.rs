use std::path::PathBuf;

use color_eyre::eyre::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::i18n::{DisplayLocale, DEFAULT_LOCALE};

/// 全局配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// 会话默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// 语言名称的显示语言: "ja"（默认）或 "en"；留空则按 LANG 推断
    #[serde(default = "default_locale")]
    pub display_locale: String,
    /// 默认翻译目标语言
    #[serde(default = "default_locale")]
    pub target_locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            display_locale: default_locale(),
            target_locale: default_locale(),
        }
    }
}

/// 端侧能力（本地可执行程序）配置
///
/// 未配置的命令视为宿主没有暴露对应能力。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// 语言检测命令：stdin 读入文本，stdout 输出 JSON 检测结果数组
    #[serde(default)]
    pub detect_command: Option<String>,
    /// 翻译命令：支持 {source} / {target} 占位符，stdin 读入原文，stdout 输出译文
    #[serde(default)]
    pub translate_command: Option<String>,
    /// 可用性查询命令（可选）：输出 unavailable / downloadable / available
    #[serde(default)]
    pub availability_command: Option<String>,
    /// 单次调用超时（秒），包含可能的模型下载时间
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            detect_command: None,
            translate_command: None,
            availability_command: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 默认配置 TOML 模板
pub(crate) const DEFAULT_CONFIG_TOML: &str = r#"[default]
display_locale = "ja"   # Language names shown as: "ja" or "en"
target_locale = "ja"    # Default translation target

# On-device capability commands. Leave unset if the host has no local model.
[provider]
timeout_secs = 120
# detect_command = "local-langid --json"
# translate_command = "local-translate --from {source} --to {target}"
# availability_command = "local-translate --check {source} {target}"
"#;

impl Config {
    /// 返回配置文件路径: `~/.lingopair/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base_dirs = directories::BaseDirs::new()
            .ok_or_else(|| color_eyre::eyre::eyre!("无法获取 home 目录"))?;
        Ok(base_dirs.home_dir().join(".lingopair").join("config.toml"))
    }

    /// 加载配置，如果配置文件不存在则创建默认配置
    pub fn load_or_init() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).wrap_err("创建配置目录失败")?;
            }
            std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err("写入默认配置失败")?;
        }

        Self::load_from_path(&config_path)
    }

    /// 从指定路径加载配置（figment 多层合并）
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("LINGOPAIR_").split("__"))
            .extract()
            .wrap_err("解析配置文件失败")?;

        Ok(config)
    }

    pub fn display_locale(&self) -> DisplayLocale {
        DisplayLocale::detect(&self.default.display_locale)
    }
}
