use async_trait::async_trait;
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

/// 能力可用性（检测器整体 / 某个翻译语言对）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// 不可用
    Unavailable,
    /// 需要先下载模型，首次使用时会自动下载
    Downloadable,
    /// 立即可用
    Available,
}

impl Availability {
    /// 解析能力提供方返回的字符串，"downloading" 视同 downloadable
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unavailable" => Some(Self::Unavailable),
            "downloadable" | "downloading" => Some(Self::Downloadable),
            "available" => Some(Self::Available),
            _ => None,
        }
    }

    pub fn is_usable(self) -> bool {
        self != Self::Unavailable
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Downloadable => "downloadable",
            Self::Available => "available",
        }
    }
}

/// 单条检测结果（检测器可能返回非字符串的语言标识，用 None 表示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    #[serde(default, deserialize_with = "string_or_none")]
    pub detected_language: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl DetectionResult {
    pub fn new(language: &str, confidence: f64) -> Self {
        Self {
            detected_language: Some(language.to_string()),
            confidence,
        }
    }
}

/// 非字符串的语言标识（数字、对象等）一律视为 None，而不是反序列化失败
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(String::from))
}

/// 检测器实例：由 `CapabilityProvider::create_detector` 创建
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<Vec<DetectionResult>>;
}

/// 翻译器实例：绑定到创建时的 (source, target) 语言对
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// 宿主环境提供的端侧检测/翻译能力
///
/// 所有异步方法都视为可能失败、可能长时间挂起（包括模型下载）的黑盒调用。
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// 宿主是否暴露了语言检测能力
    fn exposes_detector(&self) -> bool;

    /// 宿主是否暴露了翻译能力
    fn exposes_translator(&self) -> bool;

    /// 检测能力的粗粒度可用性
    async fn detector_availability(&self) -> Result<Availability>;

    /// 指定语言对的翻译可用性
    async fn translator_availability(&self, source: &str, target: &str) -> Result<Availability>;

    async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>>;

    async fn create_translator(&self, source: &str, target: &str) -> Result<Box<dyn Translator>>;
}
