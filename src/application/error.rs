//! 应用层错误定义
//!
//! 创建混合音色流程的统一错误类型，每个变体都对应一个 HTTP 状态码

use thiserror::Error;

use crate::application::ports::ProviderError;
use crate::domain::voice::VoiceError;

/// 失败发生在哪一次上游调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    Mix,
    Create,
}

impl UpstreamStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mix => "mix",
            Self::Create => "create",
        }
    }

    /// 无法从响应体提取消息时使用的前缀
    pub fn error_context(&self) -> &'static str {
        match self {
            Self::Mix => "Mix API error",
            Self::Create => "Create API error",
        }
    }
}

impl std::fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 应用层错误
///
/// Display 输出即返回给调用方的错误消息
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 调用方输入缺失或格式错误，未发起任何上游调用
    #[error("{0}")]
    ValidationError(String),

    /// 上游返回非 2xx，状态码原样转发
    #[error("{message}")]
    UpstreamError {
        stage: UpstreamStage,
        status: u16,
        message: String,
    },

    /// 上游返回成功但缺少必需字段
    #[error("{0}")]
    MalformedResponse(&'static str),

    /// 网络错误、JSON 解析失败等其它故障
    #[error("{0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误，空消息使用通用文本
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::InternalError("Internal server error".to_string())
        } else {
            Self::InternalError(message)
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationError(_) => 400,
            Self::UpstreamError { status, .. } => *status,
            Self::MalformedResponse(_) | Self::InternalError(_) => 500,
        }
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<ProviderError> for ApplicationError {
    fn from(err: ProviderError) -> Self {
        Self::internal(err.to_string())
    }
}
