//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceProvider）
//! - commands: 命令、输入校验及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::CreateMixedVoiceHandler, CreateMixedVoice, CreateMixedVoiceResponse,
    ValidatedMixedVoice, VoiceSpec,
};

pub use error::{ApplicationError, UpstreamStage};

pub use ports::{ProviderError, ProviderResponse, VoiceProviderPort};
