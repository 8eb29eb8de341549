use std::collections::HashSet;

use color_eyre::eyre::{ensure, Context, Result};
use tracing::debug;

use crate::i18n::LocaleNames;
use crate::providers::{CapabilityProvider, DetectionResult};

/// 检测文本语言，返回按置信度降序、去重、且可显示的候选 code
///
/// 非字符串或不可显示（含 "und"、未知 code、非法 code）的结果直接丢弃，不算错误；
/// 检测器创建或推理失败则原样向上传播。
pub async fn detect_languages(
    provider: &dyn CapabilityProvider,
    names: &LocaleNames,
    text: &str,
) -> Result<Vec<String>> {
    ensure!(!text.is_empty(), "待检测文本为空");

    let detector = provider.create_detector().await.wrap_err("创建语言检测器失败")?;
    let results = detector.detect(text).await.wrap_err("语言检测失败")?;
    debug!("检测器返回 {} 条结果", results.len());

    Ok(rank_candidates(results, names))
}

/// 排序 + 去重 + 过滤（纯函数，便于单测）
pub fn rank_candidates(mut results: Vec<DetectionResult>, names: &LocaleNames) -> Vec<String> {
    // 稳定排序：置信度相同的保持检测器原顺序
    results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter_map(|r| r.detected_language)
        .filter(|code| names.is_displayable(code).unwrap_or(false))
        .filter(|code| seen.insert(code.clone()))
        .collect()
}
