//! 集成测试公共辅助函数
//!
//! 供 orchestrator_flow.rs、orchestrator_races.rs 和 sessions.rs 共用。

// 每个集成测试文件只使用 common 的一部分，未用到的辅助函数属于预期 dead_code
#![allow(dead_code)]

pub mod mock_provider;
pub use mock_provider::{Gate, MockProvider};

use std::sync::Arc;

use lingopair::i18n::{DisplayLocale, LocaleNames};
use lingopair::orchestrator::Orchestrator;
use lingopair::providers::DetectionResult;

/// 日语显示名（默认显示语言）
pub fn names() -> LocaleNames {
    LocaleNames::new(DisplayLocale::Japanese)
}

/// 构造检测结果列表：[(语言, 置信度), ...]
pub fn results(items: &[(&str, f64)]) -> Vec<DetectionResult> {
    items
        .iter()
        .map(|(lang, confidence)| DetectionResult::new(lang, *confidence))
        .collect()
}

/// 创建绑定到 MockProvider 的状态机，默认目标语言 ja
///
/// 返回的 Arc<MockProvider> 与状态机共享，用来继续编排结果和读取调用次数。
pub fn orchestrator(mock: MockProvider) -> (Orchestrator, Arc<MockProvider>) {
    let mock = Arc::new(mock);
    let orch = Orchestrator::new(mock.clone(), names(), "ja");
    (orch, mock)
}

/// 已完成能力探测的状态机
pub async fn started(mock: MockProvider) -> (Orchestrator, Arc<MockProvider>) {
    let (orch, mock) = orchestrator(mock);
    assert!(orch.start().await, "MockProvider 默认应支持端侧能力");
    (orch, mock)
}

/// 输入 "Hello world" 并检测出 en；检测结束时已查询过 en → ja 的可用性
pub async fn detected_english(mock: MockProvider) -> (Orchestrator, Arc<MockProvider>) {
    let (orch, mock) = started(mock).await;
    mock.push_detection(results(&[("en", 0.92), ("nl", 0.05)]));
    orch.set_input("Hello world");
    orch.detect().await;
    (orch, mock)
}

/// 检测出 en 并确认 en → ja 可用，可以直接翻译
pub async fn ready_to_translate(mock: MockProvider) -> (Orchestrator, Arc<MockProvider>) {
    let (orch, mock) = detected_english(mock).await;
    assert!(orch.can_translate(), "en → ja 应可翻译");
    (orch, mock)
}
