use color_eyre::eyre::Result;
use tracing::{debug, warn};

use crate::providers::{Availability, CapabilityProvider};

/// 粗粒度检查：宿主是否能做端侧检测/翻译
///
/// 检测与翻译两种能力都必须暴露；之后只有检测器报告完全不可用时才返回 false。
/// 查询本身出错按不支持处理。
pub async fn is_capability_supported(provider: &dyn CapabilityProvider) -> bool {
    if !provider.exposes_detector() || !provider.exposes_translator() {
        debug!("宿主未暴露检测或翻译能力");
        return false;
    }

    match provider.detector_availability().await {
        Ok(availability) => availability.is_usable(),
        Err(e) => {
            warn!("查询检测能力可用性失败: {:#}", e);
            false
        }
    }
}

/// 细粒度检查：某个 source → target 语言对能否翻译
pub async fn pair_availability(
    provider: &dyn CapabilityProvider,
    source: &str,
    target: &str,
) -> Result<Availability> {
    let availability = provider.translator_availability(source, target).await?;
    debug!("语言对 {} → {}: {}", source, target, availability.as_str());
    Ok(availability)
}
