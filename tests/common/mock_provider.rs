// 每个集成测试文件只使用 MockProvider 的部分方法，dead_code 为预期行为
#![allow(dead_code)]

//! 测试专用 MockProvider
//!
//! 实现 CapabilityProvider trait：
//! - 检测 / 翻译结果各有一个预置队列（VecDeque），每次调用从队头弹出
//! - 每条预置结果可以带一个 Gate，调用会挂起直到测试打开它
//! - 语言对可用性按 (source, target) 查表，默认 available
//! - 记录各类调用次数，用来断言"没有发起调用"
//!
//! # 使用示例
//!
//! ```rust
//! let mock = MockProvider::new();
//! mock.push_detection(vec![DetectionResult::new("en", 0.9)]);
//! let gate = mock.push_gated_translation("こんにちは");
//! // ... 发起翻译，断言挂起中的状态 ...
//! gate.open();
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use color_eyre::eyre::{bail, eyre, Result};
use tokio::sync::Semaphore;

use lingopair::providers::{
    Availability, CapabilityProvider, DetectionResult, LanguageDetector, Translator,
};

/// 让一次调用挂起，直到测试调用 `open`
pub struct Gate(Semaphore);

impl Gate {
    fn new() -> Arc<Self> {
        Arc::new(Self(Semaphore::new(0)))
    }

    pub fn open(&self) {
        self.0.add_permits(1);
    }

    async fn pass(&self) {
        if let Ok(permit) = self.0.acquire().await {
            permit.forget();
        }
    }
}

/// 一条预置结果：Err 中的字符串作为失败原因
struct Reply<T> {
    value: std::result::Result<T, String>,
    gate: Option<Arc<Gate>>,
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T> {
        if let Some(gate) = self.gate {
            gate.pass().await;
        }
        self.value.map_err(|reason| eyre!(reason))
    }
}

#[derive(Default)]
struct Calls {
    detector_availability: AtomicUsize,
    pair_availability: AtomicUsize,
    detector_created: AtomicUsize,
    detect: AtomicUsize,
    translator_created: AtomicUsize,
    translate: AtomicUsize,
}

struct Shared {
    detections: Mutex<VecDeque<Reply<Vec<DetectionResult>>>>,
    translations: Mutex<VecDeque<Reply<String>>>,
    availability_gates: Mutex<VecDeque<Arc<Gate>>>,
    calls: Calls,
}

/// 可编排的端侧能力 Mock
pub struct MockProvider {
    exposes_detector: bool,
    exposes_translator: bool,
    detector_availability: Mutex<std::result::Result<Availability, String>>,
    pair_verdicts: Mutex<HashMap<(String, String), Availability>>,
    unsupported_pairs: Mutex<HashSet<(String, String)>>,
    shared: Arc<Shared>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// 两种能力都暴露、检测器可用的 MockProvider
    pub fn new() -> Self {
        Self {
            exposes_detector: true,
            exposes_translator: true,
            detector_availability: Mutex::new(Ok(Availability::Available)),
            pair_verdicts: Mutex::new(HashMap::new()),
            unsupported_pairs: Mutex::new(HashSet::new()),
            shared: Arc::new(Shared {
                detections: Mutex::new(VecDeque::new()),
                translations: Mutex::new(VecDeque::new()),
                availability_gates: Mutex::new(VecDeque::new()),
                calls: Calls::default(),
            }),
        }
    }

    /// 宿主没有暴露任何能力
    pub fn without_capabilities() -> Self {
        Self {
            exposes_detector: false,
            exposes_translator: false,
            ..Self::new()
        }
    }

    pub fn with_exposed(mut self, detector: bool, translator: bool) -> Self {
        self.exposes_detector = detector;
        self.exposes_translator = translator;
        self
    }

    pub fn set_detector_availability(&self, availability: Availability) {
        *self.detector_availability.lock().unwrap() = Ok(availability);
    }

    pub fn fail_detector_availability(&self, reason: &str) {
        *self.detector_availability.lock().unwrap() = Err(reason.to_string());
    }

    /// 设置某个语言对的可用性（未设置的语言对为 available）
    pub fn set_pair(&self, source: &str, target: &str, availability: Availability) {
        self.pair_verdicts
            .lock()
            .unwrap()
            .insert((source.to_string(), target.to_string()), availability);
    }

    /// 该语言对创建翻译器时失败（可用性查询不受影响）
    pub fn reject_pair(&self, source: &str, target: &str) {
        self.unsupported_pairs
            .lock()
            .unwrap()
            .insert((source.to_string(), target.to_string()));
    }

    pub fn push_detection(&self, results: Vec<DetectionResult>) {
        self.queue_detection(Ok(results), None);
    }

    pub fn push_gated_detection(&self, results: Vec<DetectionResult>) -> Arc<Gate> {
        let gate = Gate::new();
        self.queue_detection(Ok(results), Some(gate.clone()));
        gate
    }

    pub fn push_detection_failure(&self, reason: &str) {
        self.queue_detection(Err(reason.to_string()), None);
    }

    pub fn push_gated_detection_failure(&self, reason: &str) -> Arc<Gate> {
        let gate = Gate::new();
        self.queue_detection(Err(reason.to_string()), Some(gate.clone()));
        gate
    }

    fn queue_detection(
        &self,
        value: std::result::Result<Vec<DetectionResult>, String>,
        gate: Option<Arc<Gate>>,
    ) {
        self.shared
            .detections
            .lock()
            .unwrap()
            .push_back(Reply { value, gate });
    }

    pub fn push_translation(&self, text: &str) {
        self.queue_translation(Ok(text.to_string()), None);
    }

    pub fn push_gated_translation(&self, text: &str) -> Arc<Gate> {
        let gate = Gate::new();
        self.queue_translation(Ok(text.to_string()), Some(gate.clone()));
        gate
    }

    pub fn push_translation_failure(&self, reason: &str) {
        self.queue_translation(Err(reason.to_string()), None);
    }

    pub fn push_gated_translation_failure(&self, reason: &str) -> Arc<Gate> {
        let gate = Gate::new();
        self.queue_translation(Err(reason.to_string()), Some(gate.clone()));
        gate
    }

    fn queue_translation(&self, value: std::result::Result<String, String>, gate: Option<Arc<Gate>>) {
        self.shared
            .translations
            .lock()
            .unwrap()
            .push_back(Reply { value, gate });
    }

    /// 下一次语言对可用性查询挂起，直到 Gate 打开
    pub fn gate_next_pair_check(&self) -> Arc<Gate> {
        let gate = Gate::new();
        self.shared
            .availability_gates
            .lock()
            .unwrap()
            .push_back(gate.clone());
        gate
    }

    pub fn detect_calls(&self) -> usize {
        self.shared.calls.detect.load(Ordering::SeqCst)
    }

    pub fn detectors_created(&self) -> usize {
        self.shared.calls.detector_created.load(Ordering::SeqCst)
    }

    pub fn translate_calls(&self) -> usize {
        self.shared.calls.translate.load(Ordering::SeqCst)
    }

    pub fn translators_created(&self) -> usize {
        self.shared.calls.translator_created.load(Ordering::SeqCst)
    }

    pub fn pair_checks(&self) -> usize {
        self.shared.calls.pair_availability.load(Ordering::SeqCst)
    }

    pub fn detector_checks(&self) -> usize {
        self.shared.calls.detector_availability.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityProvider for MockProvider {
    fn exposes_detector(&self) -> bool {
        self.exposes_detector
    }

    fn exposes_translator(&self) -> bool {
        self.exposes_translator
    }

    async fn detector_availability(&self) -> Result<Availability> {
        self.shared
            .calls
            .detector_availability
            .fetch_add(1, Ordering::SeqCst);
        let verdict = self.detector_availability.lock().unwrap().clone();
        verdict.map_err(|reason| eyre!(reason))
    }

    async fn translator_availability(&self, source: &str, target: &str) -> Result<Availability> {
        self.shared
            .calls
            .pair_availability
            .fetch_add(1, Ordering::SeqCst);
        let gate = self.shared.availability_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        let verdict = self
            .pair_verdicts
            .lock()
            .unwrap()
            .get(&(source.to_string(), target.to_string()))
            .copied();
        Ok(verdict.unwrap_or(Availability::Available))
    }

    async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>> {
        self.shared
            .calls
            .detector_created
            .fetch_add(1, Ordering::SeqCst);
        if !self.exposes_detector {
            bail!("detector not exposed");
        }
        Ok(Box::new(MockDetector {
            shared: self.shared.clone(),
        }))
    }

    async fn create_translator(&self, source: &str, target: &str) -> Result<Box<dyn Translator>> {
        self.shared
            .calls
            .translator_created
            .fetch_add(1, Ordering::SeqCst);
        if self
            .unsupported_pairs
            .lock()
            .unwrap()
            .contains(&(source.to_string(), target.to_string()))
        {
            bail!("unsupported language pair {} -> {}", source, target);
        }
        Ok(Box::new(MockTranslator {
            shared: self.shared.clone(),
            target: target.to_string(),
        }))
    }
}

struct MockDetector {
    shared: Arc<Shared>,
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, _text: &str) -> Result<Vec<DetectionResult>> {
        self.shared.calls.detect.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .shared
            .detections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| eyre!("MockProvider: 检测结果队列已空"))?;
        reply.resolve().await
    }
}

struct MockTranslator {
    shared: Arc<Shared>,
    target: String,
}

#[async_trait]
impl Translator for MockTranslator {
    /// 队列为空时返回 "[target] text"
    async fn translate(&self, text: &str) -> Result<String> {
        self.shared.calls.translate.fetch_add(1, Ordering::SeqCst);
        let reply = self.shared.translations.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(format!("[{}] {}", self.target, text)),
        }
    }
}
