//! Locale naming: maps language identifiers to human-readable names in a
//! fixed display locale, and decides which identifiers are "displayable".

pub mod catalog;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// 无法判定语言时检测器返回的保留 code
pub const UNDETERMINED: &str = "und";

/// 默认显示语言，同时也是默认翻译目标
pub const DEFAULT_LOCALE: &str = "ja";

static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("language tag pattern is valid")
});

/// Locale Naming 的调用方契约错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// 空字符串或结构非法的标识符（调用方的编程错误，不是"未知语言"）
    #[error("invalid language identifier: {0:?}")]
    InvalidInput(String),
}

/// Display locale used to render language names.
///
/// Only affects the names shown for languages; it does not restrict which
/// languages can be detected or translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    /// Japanese (default)
    #[default]
    Japanese,
    /// English
    English,
}

impl DisplayLocale {
    /// Parse from a config string value.
    /// Unknown values fall back to Japanese.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "en" | "en-US" | "en-GB" => Self::English,
            _ => Self::Japanese,
        }
    }

    /// Infer from the OS `LANG` environment variable.
    pub fn from_locale() -> Self {
        let lang = std::env::var("LANG").unwrap_or_default();
        if lang.starts_with("en") {
            Self::English
        } else {
            Self::Japanese
        }
    }

    /// Resolve with priority: config value → LANG env var → Japanese default.
    ///
    /// Empty string means the field was absent → fall back to locale detection.
    pub fn detect(config_locale: &str) -> Self {
        if config_locale.is_empty() {
            Self::from_locale()
        } else {
            Self::from_str(config_locale)
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::English => "en",
        }
    }
}

/// 固定显示语言下的语言命名器
///
/// 纯函数、同步、无 I/O；同一显示语言下对同一输入的结果恒定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleNames {
    locale: DisplayLocale,
}

impl LocaleNames {
    pub fn new(locale: DisplayLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    /// 返回 `id` 在显示语言下的名称
    ///
    /// - 已知语言 → 名称（如 "en" → "英語"）
    /// - 主子标签已知、带地区等后缀 → "名称 (后缀)"（如 "pt-BR" → "ポルトガル語 (BR)"）
    /// - 结构合法但未知 → 原样返回（不是错误）
    /// - 空字符串或结构非法 → `LocaleError::InvalidInput`
    pub fn display_name(&self, id: &str) -> Result<String, LocaleError> {
        if !LANGUAGE_TAG.is_match(id) {
            return Err(LocaleError::InvalidInput(id.to_string()));
        }

        let (primary, rest) = match id.split_once('-') {
            Some((primary, rest)) => (primary, Some(rest)),
            None => (id, None),
        };

        let Some(entry) = catalog::lookup(&primary.to_ascii_lowercase()) else {
            return Ok(id.to_string());
        };
        let name = match self.locale {
            DisplayLocale::Japanese => entry.japanese,
            DisplayLocale::English => entry.english,
        };

        Ok(match rest {
            Some(rest) => format!("{} ({})", name, rest),
            None => name.to_string(),
        })
    }

    /// `id` 不是 "und"，且命名系统确实给出了不同于 `id` 本身的名称
    pub fn is_displayable(&self, id: &str) -> Result<bool, LocaleError> {
        let name = self.display_name(id)?;
        let primary = id.split('-').next().unwrap_or(id);
        Ok(!primary.eq_ignore_ascii_case(UNDETERMINED) && name != id)
    }

    /// Locale Catalog：所有可显示的语言 code（目标语言候选）
    pub fn catalog(&self) -> Vec<&'static str> {
        catalog::LANGUAGES
            .iter()
            .map(|entry| entry.code)
            .filter(|code| self.is_displayable(code).unwrap_or(false))
            .collect()
    }
}
