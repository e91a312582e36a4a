//! HTTP Voice Provider - 调用第三方语音合成服务
//!
//! 实现 VoiceProviderPort trait，通过 HTTP 调用上游的混合/创建接口
//!
//! 上游 API:
//! POST {base_url}/voices/mix
//! Request: {"voices": [{"id": "...", "weight": 0.5}, ...]}
//! Response: {"embedding": [...]}
//!
//! POST {base_url}/voices
//! Request: {"name": "...", "description": "...", "language": "en", "embedding": [...]}
//! Response: {"id": "..."} 或 {"voice_id": "..."}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{ProviderError, ProviderResponse, VoiceProviderPort};
use crate::domain::voice::{MixedVoice, ProviderCredentials, VoiceMix};

const API_KEY_HEADER: &str = "X-API-Key";
const API_VERSION_HEADER: &str = "Cartesia-Version";

/// 混合请求体 (JSON)
#[derive(Debug, Serialize)]
struct MixHttpRequest<'a> {
    voices: &'a VoiceMix,
}

/// HTTP Voice Provider 配置
#[derive(Debug, Clone)]
pub struct HttpVoiceProviderConfig {
    /// 上游服务基础 URL
    pub base_url: String,
    /// 混合接口路径
    pub mix_path: String,
    /// 创建接口路径
    pub create_path: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpVoiceProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cartesia.ai".to_string(),
            mix_path: "/voices/mix".to_string(),
            create_path: "/voices".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpVoiceProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Voice Provider
///
/// 一个进程共享一个 reqwest Client；凭据按请求传入，不缓存
pub struct HttpVoiceProvider {
    client: Client,
    config: HttpVoiceProviderConfig,
}

impl HttpVoiceProvider {
    /// 创建新的 HTTP Voice Provider
    pub fn new(config: HttpVoiceProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 获取混合 URL
    fn mix_url(&self) -> String {
        self.url(&self.config.mix_path)
    }

    /// 获取创建 URL
    fn create_url(&self) -> String {
        self.url(&self.config.create_path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        credentials: &ProviderCredentials,
        body: &T,
    ) -> Result<ProviderResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, credentials.api_key())
            .header(API_VERSION_HEADER, credentials.api_version())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else if e.is_connect() {
                    ProviderError::NetworkError(format!(
                        "Cannot connect to voice provider: {}",
                        e
                    ))
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        into_provider_response(response).await
    }
}

async fn into_provider_response(response: Response) -> Result<ProviderResponse, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::InvalidResponse(format!("Failed to read response body: {}", e))
        }
    })?;

    Ok(ProviderResponse::new(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        body,
    ))
}

#[async_trait]
impl VoiceProviderPort for HttpVoiceProvider {
    async fn mix_voices(
        &self,
        credentials: &ProviderCredentials,
        voices: &VoiceMix,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = self.mix_url();
        tracing::debug!(url = %url, voice_count = voices.len(), "Sending mix request");

        let response = self
            .post_json(&url, credentials, &MixHttpRequest { voices })
            .await?;

        tracing::debug!(status = response.status, "Mix request finished");
        Ok(response)
    }

    async fn create_voice(
        &self,
        credentials: &ProviderCredentials,
        voice: &MixedVoice,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = self.create_url();
        tracing::debug!(
            url = %url,
            name = %voice.name(),
            language = %voice.language(),
            dimensions = voice.embedding().dimensions(),
            "Sending create voice request"
        );

        let response = self.post_json(&url, credentials, voice).await?;

        tracing::debug!(status = response.status, "Create voice request finished");
        Ok(response)
    }

    async fn health_check(&self) -> bool {
        // 任何 HTTP 响应都说明服务可达，不关心状态码
        self.client
            .get(&self.config.base_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }
}
