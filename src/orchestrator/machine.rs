use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::i18n::{LocaleNames, DEFAULT_LOCALE};
use crate::providers::{Availability, CapabilityProvider};
use crate::session;

use super::state::{
    self, FailureKind, Notice, PairVerdict, Phase, SelectionError, SessionState, Support,
};

/// 用户可触发的两个动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Detect,
    Translate,
}

/// 一次触发的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// 动作当前不可用，没有发起任何调用
    Ignored,
    /// 调用完成且结果已写入状态
    Completed,
    /// 调用完成，但期间输入或语言对已变化，结果被丢弃
    Discarded,
    /// 调用失败，提示已写入状态
    Failed(Notice),
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    // 每种任务单调递增的请求序号，用来判断完成的结果是否仍是最新
    detect_seq: u64,
    translate_seq: u64,
    availability_seq: u64,
    // 每次 InputText 实际变化都递增
    input_generation: u64,
}

/// 编排状态机：驱动可用性检查、语言检测和翻译，维护一致的会话状态
///
/// 所有方法都取 `&self`；内部锁只在同步片段中持有，绝不跨越 `.await`。
/// 因此同一交互循环里并发发起的两个触发，与两次 UI 事件的语义一致：
/// 忙标志在挂起前同步置位，第二次触发看到的一定是已置位的状态。
pub struct Orchestrator {
    provider: Arc<dyn CapabilityProvider>,
    names: LocaleNames,
    inner: Mutex<Inner>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn CapabilityProvider>, names: LocaleNames, default_target: &str) -> Self {
        let target = match names.is_displayable(default_target) {
            Ok(true) => default_target,
            _ => {
                warn!("默认目标语言 {:?} 不可显示，改用 {}", default_target, DEFAULT_LOCALE);
                DEFAULT_LOCALE
            }
        };
        Self {
            provider,
            names,
            inner: Mutex::new(Inner {
                state: SessionState::new(target),
                detect_seq: 0,
                translate_seq: 0,
                availability_seq: 0,
                input_generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn names(&self) -> &LocaleNames {
        &self.names
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn can_detect(&self) -> bool {
        state::can_detect(&self.lock().state)
    }

    pub fn can_translate(&self) -> bool {
        state::can_translate(&self.lock().state)
    }

    pub fn phase(&self) -> Phase {
        state::phase(&self.lock().state)
    }

    /// 取走一次性提示
    pub fn take_notice(&self) -> Option<Notice> {
        self.lock().state.notice.take()
    }

    /// 源语言候选（即检测结果）
    pub fn source_options(&self) -> Vec<String> {
        self.lock().state.candidate_sources.clone()
    }

    /// 目标语言候选：完整的可显示语言目录
    pub fn target_options(&self) -> Vec<&'static str> {
        self.names.catalog()
    }

    /// 会话开始时的一次性能力探测；不支持则进入终态
    pub async fn start(&self) -> bool {
        {
            let inner = self.lock();
            if inner.state.support != Support::Probing {
                return inner.state.support == Support::Supported;
            }
        }

        let supported = session::is_capability_supported(&*self.provider).await;

        let mut inner = self.lock();
        if inner.state.support == Support::Probing {
            if supported {
                inner.state.support = Support::Supported;
            } else {
                inner.state.support = Support::Unsupported;
                inner.state.notice = Some(Notice::CapabilityUnavailable);
            }
            info!("能力探测完成: supported={}", supported);
        }
        inner.state.support == Support::Supported
    }

    /// 编辑输入文本
    ///
    /// 文本实际变化时同步清空候选、选择和译文；不会自动开始检测。
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.state.input_text == text {
            return;
        }
        inner.input_generation += 1;

        let st = &mut inner.state;
        st.input_text = text;
        st.candidate_sources.clear();
        st.selected_source = None;
        st.output_text.clear();
        st.pair = None;
        st.last_failure = None;
    }

    /// 检测动作
    pub async fn detect(&self) -> Trigger {
        let (seq, generation, text) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if !state::can_detect(&inner.state) {
                debug!("检测动作不可用，忽略");
                return Trigger::Ignored;
            }
            inner.detect_seq += 1;
            let st = &mut inner.state;
            st.detecting = true;
            st.candidate_sources.clear();
            st.selected_source = None;
            st.output_text.clear();
            st.pair = None;
            st.notice = None;
            st.last_failure = None;
            (inner.detect_seq, inner.input_generation, st.input_text.clone())
        };

        let result = session::detect_languages(&*self.provider, &self.names, &text).await;

        {
            let mut inner = self.lock();
            inner.state.detecting = false;
            if seq != inner.detect_seq || generation != inner.input_generation {
                debug!("丢弃过期的检测结果 (seq={})", seq);
                return Trigger::Discarded;
            }

            match result {
                Ok(candidates) => {
                    info!("检测完成: {:?}", candidates);
                    let st = &mut inner.state;
                    st.selected_source = candidates.first().cloned();
                    st.candidate_sources = candidates;
                }
                Err(e) => {
                    warn!("语言检测失败: {:#}", e);
                    let notice = Notice::DetectionFailed {
                        reason: format!("{:#}", e),
                    };
                    inner.state.notice = Some(notice.clone());
                    inner.state.last_failure = Some(FailureKind::Detection);
                    return Trigger::Failed(notice);
                }
            }
        }

        // 新的源语言需要新的可用性结论
        self.refresh_availability().await;
        Trigger::Completed
    }

    /// 修改源语言（只能从检测候选中选）
    ///
    /// 译文在第一次 poll 时同步清空，随后重新查询新语言对的可用性。
    pub async fn select_source(&self, id: &str) -> Result<(), SelectionError> {
        {
            let mut inner = self.lock();
            if !inner.state.candidate_sources.iter().any(|c| c == id) {
                return Err(SelectionError::NotACandidate(id.to_string()));
            }
            if inner.state.selected_source.as_deref() == Some(id) {
                return Ok(());
            }
            let st = &mut inner.state;
            st.selected_source = Some(id.to_string());
            invalidate_pair(st);
        }
        self.refresh_availability().await;
        Ok(())
    }

    /// 修改目标语言（任意可显示的语言），其余同 `select_source`
    pub async fn select_target(&self, id: &str) -> Result<(), SelectionError> {
        if !self.names.is_displayable(id)? {
            return Err(SelectionError::NotDisplayable(id.to_string()));
        }
        {
            let mut inner = self.lock();
            if inner.state.selected_target == id {
                return Ok(());
            }
            let st = &mut inner.state;
            st.selected_target = id.to_string();
            invalidate_pair(st);
        }
        self.refresh_availability().await;
        Ok(())
    }

    /// 重新查询当前语言对的可用性
    ///
    /// 返回写入状态的结论；语言对未就绪或期间发生变化时返回 None。
    pub async fn refresh_availability(&self) -> Option<Availability> {
        let (seq, source, target) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if inner.state.support != Support::Supported {
                return None;
            }
            let source = inner.state.selected_source.clone()?;
            let target = inner.state.selected_target.clone();
            if source == target {
                return None;
            }
            inner.availability_seq += 1;
            inner.state.pair = Some(PairVerdict {
                source: source.clone(),
                target: target.clone(),
                availability: None,
            });
            (inner.availability_seq, source, target)
        };

        let availability = match session::pair_availability(&*self.provider, &source, &target).await {
            Ok(availability) => availability,
            Err(e) => {
                warn!("查询语言对 {} → {} 可用性失败: {:#}", source, target, e);
                Availability::Unavailable
            }
        };

        let mut inner = self.lock();
        if seq != inner.availability_seq {
            debug!("丢弃过期的可用性结果 (seq={})", seq);
            return None;
        }
        match inner.state.pair.as_mut() {
            Some(verdict) if verdict.is_for(&source, &target) => {
                verdict.availability = Some(availability);
                Some(availability)
            }
            _ => None,
        }
    }

    /// 翻译动作
    ///
    /// 输入与语言对在调用时捕获，挂起期间不再重读。
    pub async fn translate(&self) -> Trigger {
        let (seq, text, source, target) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if !state::can_translate(&inner.state) {
                debug!("翻译动作不可用，忽略");
                return Trigger::Ignored;
            }
            let Some(source) = inner.state.selected_source.clone() else {
                return Trigger::Ignored;
            };
            inner.translate_seq += 1;
            let st = &mut inner.state;
            st.translating = true;
            st.output_text.clear();
            st.notice = None;
            st.last_failure = None;
            (
                inner.translate_seq,
                st.input_text.clone(),
                source,
                st.selected_target.clone(),
            )
        };

        let result = session::translate(&*self.provider, &text, &source, &target).await;

        let trigger = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            let st = &mut inner.state;
            st.translating = false;

            let current = st.input_text == text
                && st.selected_source.as_deref() == Some(source.as_str())
                && st.selected_target == target;
            if seq != inner.translate_seq || !current {
                // 当前语言对的结论由改变它的那次操作负责，这里不动
                debug!("丢弃过期的翻译结果 (seq={})", seq);
                return Trigger::Discarded;
            }

            match result {
                Ok(translated) => {
                    st.output_text = translated;
                    Trigger::Completed
                }
                Err(e) => {
                    warn!("翻译失败: {:#}", e);
                    let notice = Notice::TranslationUnsupported {
                        source_name: self.display_name_or_id(&source),
                        target_name: self.display_name_or_id(&target),
                        source_locale: source,
                        target_locale: target,
                    };
                    st.notice = Some(notice.clone());
                    st.last_failure = Some(FailureKind::Translation);
                    Trigger::Failed(notice)
                }
            }
        };

        // 忙标志变化后重新推导可用性（例如模型已下载完成），同一语言对可以直接重试
        self.refresh_availability().await;
        trigger
    }

    /// Enter 键：等同于对应按钮，但输入法组字期间不触发
    pub async fn enter_key(&self, action: Action, composing: bool) -> Trigger {
        if composing {
            return Trigger::Ignored;
        }
        match action {
            Action::Detect => self.detect().await,
            Action::Translate => self.translate().await,
        }
    }

    fn display_name_or_id(&self, id: &str) -> String {
        self.names
            .display_name(id)
            .unwrap_or_else(|_| id.to_string())
    }
}

/// 语言选择变化：同步清空译文，旧的可用性结论作废
fn invalidate_pair(st: &mut SessionState) {
    st.output_text.clear();
    st.pair = None;
    st.last_failure = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DisplayLocale;
    use crate::providers::{DetectionResult, LanguageDetector, Translator};
    use async_trait::async_trait;
    use color_eyre::eyre::{bail, Result};

    /// 固定返回 en 的最小能力提供方
    struct EchoProvider;

    struct EnDetector;

    #[async_trait]
    impl LanguageDetector for EnDetector {
        async fn detect(&self, _text: &str) -> Result<Vec<DetectionResult>> {
            Ok(vec![DetectionResult::new("en", 0.9), DetectionResult::new("und", 0.1)])
        }
    }

    struct UpperTranslator;

    #[async_trait]
    impl Translator for UpperTranslator {
        async fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    #[async_trait]
    impl CapabilityProvider for EchoProvider {
        fn exposes_detector(&self) -> bool {
            true
        }
        fn exposes_translator(&self) -> bool {
            true
        }
        async fn detector_availability(&self) -> Result<Availability> {
            Ok(Availability::Available)
        }
        async fn translator_availability(&self, _s: &str, target: &str) -> Result<Availability> {
            if target == "xx" {
                Ok(Availability::Unavailable)
            } else {
                Ok(Availability::Available)
            }
        }
        async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>> {
            Ok(Box::new(EnDetector))
        }
        async fn create_translator(&self, _s: &str, target: &str) -> Result<Box<dyn Translator>> {
            if target == "xx" {
                bail!("unsupported pair");
            }
            Ok(Box::new(UpperTranslator))
        }
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(
            Arc::new(EchoProvider),
            LocaleNames::new(DisplayLocale::Japanese),
            "ja",
        )
    }

    #[tokio::test]
    async fn actions_disabled_until_capability_check_completes() {
        let orch = orchestrator();
        orch.set_input("Hello");
        assert_eq!(orch.phase(), Phase::Probing);
        assert_eq!(orch.detect().await, Trigger::Ignored);

        assert!(orch.start().await);
        assert!(orch.can_detect());
    }

    #[tokio::test]
    async fn full_flow_detect_check_translate() {
        let orch = orchestrator();
        orch.start().await;
        orch.set_input("Hello world");

        assert_eq!(orch.detect().await, Trigger::Completed);
        let snap = orch.snapshot();
        assert_eq!(snap.candidate_sources, vec!["en"]);
        assert_eq!(snap.selected_source.as_deref(), Some("en"));
        assert_eq!(
            state::pair_availability(&snap),
            Some(Availability::Available),
            "检测完成时已查询 en → ja"
        );
        assert_eq!(orch.phase(), Phase::ReadyToTranslate);

        assert_eq!(orch.translate().await, Trigger::Completed);
        assert_eq!(orch.snapshot().output_text, "HELLO WORLD");
        assert_eq!(orch.phase(), Phase::Translated);
        assert!(orch.can_translate(), "翻译结束后已重新推导，可以重试");
    }

    #[tokio::test]
    async fn target_change_rederives_verdict() {
        let orch = orchestrator();
        orch.start().await;
        orch.set_input("Hello world");
        orch.detect().await;

        orch.select_target("fr").await.unwrap();
        assert!(orch.can_translate());
        assert_eq!(orch.translate().await, Trigger::Completed);
    }

    #[tokio::test]
    async fn unknown_default_target_falls_back() {
        let orch = Orchestrator::new(
            Arc::new(EchoProvider),
            LocaleNames::new(DisplayLocale::Japanese),
            "zz",
        );
        assert_eq!(orch.snapshot().selected_target, DEFAULT_LOCALE);
    }

    #[tokio::test]
    async fn select_source_must_be_candidate() {
        let orch = orchestrator();
        orch.start().await;
        orch.set_input("Hello");
        orch.detect().await;

        assert_eq!(
            orch.select_source("fr").await,
            Err(SelectionError::NotACandidate("fr".to_string()))
        );
        assert_eq!(orch.snapshot().selected_source.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn select_target_validates_identifier() {
        let orch = orchestrator();
        assert_eq!(
            orch.select_target("zz").await,
            Err(SelectionError::NotDisplayable("zz".to_string()))
        );
        assert!(matches!(
            orch.select_target("").await,
            Err(SelectionError::Invalid(_))
        ));
        assert!(orch.select_target("fr").await.is_ok());
        assert_eq!(orch.snapshot().selected_target, "fr");
    }

    #[tokio::test]
    async fn enter_key_respects_composition() {
        let orch = orchestrator();
        orch.start().await;
        orch.set_input("こんにちは");

        assert_eq!(orch.enter_key(Action::Detect, true).await, Trigger::Ignored);
        assert!(orch.snapshot().candidate_sources.is_empty());

        assert_eq!(orch.enter_key(Action::Detect, false).await, Trigger::Completed);
    }

    #[tokio::test]
    async fn refresh_skips_identical_pair() {
        let orch = orchestrator();
        orch.start().await;
        orch.set_input("Hello");
        orch.detect().await;
        orch.select_target("en").await.unwrap();

        assert_eq!(orch.refresh_availability().await, None);
        assert!(!orch.can_translate());
    }
}
