pub mod command;
pub mod traits;

pub use command::CommandProvider;
pub use traits::{Availability, CapabilityProvider, DetectionResult, LanguageDetector, Translator};

use std::sync::Arc;

use crate::config::ProviderConfig;

/// 根据配置创建能力提供方
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn CapabilityProvider> {
    Arc::new(CommandProvider::new(config))
}
