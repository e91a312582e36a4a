//! Voice Provider Port - 第三方语音合成服务抽象
//!
//! 定义混合/创建音色的出站接口，具体实现在 infrastructure/adapters 层。
//! 端口只负责传输，返回上游的原始状态和响应体；
//! 响应的解读（错误消息提取、字段校验）由应用层完成。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{MixedVoice, ProviderCredentials, VoiceMix};

/// 传输层错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request to voice provider timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 上游 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP 状态码
    pub status: u16,
    /// 状态文本（如 "Unauthorized"），可能为空
    pub status_text: String,
    /// 原始响应体
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 从失败响应中提取可读的错误消息
    ///
    /// 优先级:
    /// 1. JSON 中的 `error.message`
    /// 2. JSON 中的顶层 `message`
    /// 3. 响应体不是 JSON 时使用原始文本
    /// 4. `"{context}: {status_text}"`
    pub fn error_message(&self, context: &str) -> String {
        let fallback = format!("{}: {}", context, self.status_text);

        match serde_json::from_str::<serde_json::Value>(&self.body) {
            // JSON null 上取字段本身就是错误，按原始文本处理
            Ok(serde_json::Value::Null) => self.body.clone(),
            Ok(value) => value
                .pointer("/error/message")
                .and_then(non_empty_str)
                .or_else(|| value.get("message").and_then(non_empty_str))
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) if self.body.is_empty() => fallback,
            Err(_) => self.body.clone(),
        }
    }
}

fn non_empty_str(value: &serde_json::Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Voice Provider Port
///
/// 每个方法对应一次上游调用，不重试
#[async_trait]
pub trait VoiceProviderPort: Send + Sync {
    /// 按权重混合多个音色，成功时响应体应包含 `embedding`
    async fn mix_voices(
        &self,
        credentials: &ProviderCredentials,
        voices: &VoiceMix,
    ) -> Result<ProviderResponse, ProviderError>;

    /// 用嵌入向量注册新音色，成功时响应体应包含 `id` 或 `voice_id`
    async fn create_voice(
        &self,
        credentials: &ProviderCredentials,
        voice: &MixedVoice,
    ) -> Result<ProviderResponse, ProviderError>;

    /// 检查上游服务是否可达
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(body: &str) -> ProviderResponse {
        ProviderResponse::new(401, "Unauthorized", body)
    }

    #[test]
    fn test_nested_error_message_wins() {
        let resp = failed(r#"{"error":{"message":"bad key"},"message":"outer"}"#);
        assert_eq!(resp.error_message("Mix API error"), "bad key");
    }

    #[test]
    fn test_top_level_message_used_when_no_nested() {
        let resp = failed(r#"{"message":"quota exceeded"}"#);
        assert_eq!(resp.error_message("Mix API error"), "quota exceeded");
    }

    #[test]
    fn test_empty_nested_message_falls_through() {
        let resp = failed(r#"{"error":{"message":""},"message":"outer"}"#);
        assert_eq!(resp.error_message("Mix API error"), "outer");
    }

    #[test]
    fn test_json_without_message_uses_status_text() {
        let resp = failed(r#"{"detail":"nope"}"#);
        assert_eq!(resp.error_message("Create API error"), "Create API error: Unauthorized");
    }

    #[test]
    fn test_plain_text_body_returned_verbatim() {
        let resp = failed("upstream exploded");
        assert_eq!(resp.error_message("Mix API error"), "upstream exploded");
    }

    #[test]
    fn test_empty_body_uses_status_text() {
        let resp = failed("");
        assert_eq!(resp.error_message("Mix API error"), "Mix API error: Unauthorized");
    }

    #[test]
    fn test_is_success_range() {
        assert!(ProviderResponse::new(200, "OK", "").is_success());
        assert!(ProviderResponse::new(201, "Created", "").is_success());
        assert!(!ProviderResponse::new(302, "Found", "").is_success());
        assert!(!ProviderResponse::new(500, "Internal Server Error", "").is_success());
    }
}
