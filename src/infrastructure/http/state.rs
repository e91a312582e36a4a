//! Application State
//!
//! 只持有无状态的端口和处理器，请求之间不共享可变数据

use std::sync::Arc;

use crate::application::{CreateMixedVoiceHandler, VoiceProviderPort};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub provider: Arc<dyn VoiceProviderPort>,

    // ========== Command Handlers ==========
    pub create_mixed_voice_handler: CreateMixedVoiceHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(provider: Arc<dyn VoiceProviderPort>) -> Self {
        Self {
            provider: provider.clone(),
            create_mixed_voice_handler: CreateMixedVoiceHandler::new(provider),
        }
    }
}
