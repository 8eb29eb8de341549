//! The session state record and the pure derivations computed from it.
//!
//! Nothing here is cached: enablement flags and the conceptual phase are
//! recomputed from the record on every read.

use thiserror::Error;

use crate::i18n::LocaleError;
use crate::providers::Availability;

/// 宿主能力探测结果（会话开始时检查一次）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// 尚未完成探测，所有动作禁用
    Probing,
    Supported,
    /// 终态：不再提供任何动作
    Unsupported,
}

/// 某个语言对的可用性结论，只对记录中的 (source, target) 有效
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairVerdict {
    pub source: String,
    pub target: String,
    /// None = 查询中
    pub availability: Option<Availability>,
}

impl PairVerdict {
    pub fn is_for(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Detection,
    Translation,
}

/// 用户可见的一次性失败提示
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("on-device language detection and translation are not available on this host")]
    CapabilityUnavailable,

    #[error("language detection failed: {reason}")]
    DetectionFailed { reason: String },

    /// 不区分"语言对不支持"和"临时失败"，底层能力本身无法可靠区分
    #[error("translation from {source_name} to {target_name} is not supported")]
    TranslationUnsupported {
        source_locale: String,
        target_locale: String,
        source_name: String,
        target_name: String,
    },
}

impl Notice {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::CapabilityUnavailable => None,
            Self::DetectionFailed { .. } => Some(FailureKind::Detection),
            Self::TranslationUnsupported { .. } => Some(FailureKind::Translation),
        }
    }
}

/// 语言选择被拒绝的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{0} is not one of the detected languages")]
    NotACandidate(String),

    #[error("{0} has no display name")]
    NotDisplayable(String),

    #[error(transparent)]
    Invalid(#[from] LocaleError),
}

/// 概念上的状态机状态，由状态记录推导
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Probing,
    Unsupported,
    Idle,
    Detecting,
    AwaitingSelection,
    CheckingAvailability,
    ReadyToTranslate,
    Translating,
    Translated,
    Failed(FailureKind),
}

/// 单个会话的全部状态（只存在于内存中）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub support: Support,
    pub input_text: String,
    /// 按检测置信度排序的候选源语言
    pub candidate_sources: Vec<String>,
    /// 非空时必然是 candidate_sources 中的元素
    pub selected_source: Option<String>,
    pub selected_target: String,
    pub output_text: String,
    pub detecting: bool,
    pub translating: bool,
    pub pair: Option<PairVerdict>,
    pub notice: Option<Notice>,
    pub last_failure: Option<FailureKind>,
}

impl SessionState {
    pub fn new(default_target: &str) -> Self {
        Self {
            support: Support::Probing,
            input_text: String::new(),
            candidate_sources: Vec::new(),
            selected_source: None,
            selected_target: default_target.to_string(),
            output_text: String::new(),
            detecting: false,
            translating: false,
            pair: None,
            notice: None,
            last_failure: None,
        }
    }
}

/// 当前选中语言对的可用性（结论属于别的语言对或仍在查询时为 None）
pub fn pair_availability(state: &SessionState) -> Option<Availability> {
    let source = state.selected_source.as_deref()?;
    state
        .pair
        .as_ref()
        .filter(|verdict| verdict.is_for(source, &state.selected_target))
        .and_then(|verdict| verdict.availability)
}

/// 检测按钮是否可用
pub fn can_detect(state: &SessionState) -> bool {
    state.support == Support::Supported && !state.input_text.is_empty() && !state.detecting
}

/// 翻译按钮是否可用
///
/// 需要：已选源语言且与目标不同、两种任务都不在进行中、当前语言对的可用性已知且不是 unavailable。
pub fn can_translate(state: &SessionState) -> bool {
    let Some(source) = state.selected_source.as_deref() else {
        return false;
    };
    state.support == Support::Supported
        && source != state.selected_target
        && !state.detecting
        && !state.translating
        && pair_availability(state).is_some_and(Availability::is_usable)
}

pub fn phase(state: &SessionState) -> Phase {
    match state.support {
        Support::Probing => return Phase::Probing,
        Support::Unsupported => return Phase::Unsupported,
        Support::Supported => {}
    }
    if state.detecting {
        return Phase::Detecting;
    }
    if state.translating {
        return Phase::Translating;
    }
    if let Some(kind) = state.last_failure {
        return Phase::Failed(kind);
    }
    if !state.output_text.is_empty() {
        return Phase::Translated;
    }
    let Some(source) = state.selected_source.as_deref() else {
        return Phase::Idle;
    };
    if source == state.selected_target {
        return Phase::AwaitingSelection;
    }
    match &state.pair {
        Some(verdict) if verdict.is_for(source, &state.selected_target) => {
            match verdict.availability {
                None => Phase::CheckingAvailability,
                Some(Availability::Unavailable) => Phase::AwaitingSelection,
                Some(_) => Phase::ReadyToTranslate,
            }
        }
        _ => Phase::AwaitingSelection,
    }
}
