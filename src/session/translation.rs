use color_eyre::eyre::{ensure, Context, Result};
use tracing::info;

use crate::providers::CapabilityProvider;

/// 用绑定到 (source, target) 的翻译器翻译一次，译文原样返回
///
/// 不重试；语言对不支持、模型下载失败、推理失败都作为同一种错误向上传播。
pub async fn translate(
    provider: &dyn CapabilityProvider,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String> {
    ensure!(source != target, "源语言与目标语言相同: {}", source);

    let translator = provider
        .create_translator(source, target)
        .await
        .wrap_err_with(|| format!("创建翻译器失败: {} → {}", source, target))?;
    let translated = translator
        .translate(text)
        .await
        .wrap_err_with(|| format!("翻译失败: {} → {}", source, target))?;

    info!("翻译完成: {} → {} ({} 字符)", source, target, translated.chars().count());
    Ok(translated)
}
