//! Fake Voice Provider - 本地开发和测试用
//!
//! 不访问网络，按预设返回响应，并记录每次调用的请求体

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{ProviderError, ProviderResponse, VoiceProviderPort};
use crate::domain::voice::{MixedVoice, ProviderCredentials, VoiceMix};

/// 预设的调用结果
#[derive(Debug, Clone)]
enum Scripted {
    Respond(ProviderResponse),
    Fail(String),
}

impl Scripted {
    fn into_result(self) -> Result<ProviderResponse, ProviderError> {
        match self {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(message) => Err(ProviderError::NetworkError(message)),
        }
    }
}

/// Fake Voice Provider
///
/// 默认: 混合返回固定嵌入向量，创建返回 `fake-<uuid>` 形式的 ID
pub struct FakeVoiceProvider {
    mix: Option<Scripted>,
    create: Option<Scripted>,
    mix_calls: AtomicUsize,
    create_calls: AtomicUsize,
    last_mix_body: Mutex<Option<Value>>,
    last_create_body: Mutex<Option<Value>>,
}

impl Default for FakeVoiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeVoiceProvider {
    /// 创建新的 FakeVoiceProvider
    pub fn new() -> Self {
        Self {
            mix: None,
            create: None,
            mix_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            last_mix_body: Mutex::new(None),
            last_create_body: Mutex::new(None),
        }
    }

    /// 固定混合接口的响应
    pub fn with_mix_response(mut self, response: ProviderResponse) -> Self {
        self.mix = Some(Scripted::Respond(response));
        self
    }

    /// 固定创建接口的响应
    pub fn with_create_response(mut self, response: ProviderResponse) -> Self {
        self.create = Some(Scripted::Respond(response));
        self
    }

    /// 混合接口模拟传输失败
    pub fn with_mix_failure(mut self, message: impl Into<String>) -> Self {
        self.mix = Some(Scripted::Fail(message.into()));
        self
    }

    /// 创建接口模拟传输失败
    pub fn with_create_failure(mut self, message: impl Into<String>) -> Self {
        self.create = Some(Scripted::Fail(message.into()));
        self
    }

    pub fn mix_calls(&self) -> usize {
        self.mix_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// 最近一次混合请求体
    pub fn last_mix_body(&self) -> Option<Value> {
        self.last_mix_body.lock().ok().and_then(|body| body.clone())
    }

    /// 最近一次创建请求体
    pub fn last_create_body(&self) -> Option<Value> {
        self.last_create_body.lock().ok().and_then(|body| body.clone())
    }
}

fn record(slot: &Mutex<Option<Value>>, body: Value) {
    if let Ok(mut slot) = slot.lock() {
        *slot = Some(body);
    }
}

#[async_trait]
impl VoiceProviderPort for FakeVoiceProvider {
    async fn mix_voices(
        &self,
        credentials: &ProviderCredentials,
        voices: &VoiceMix,
    ) -> Result<ProviderResponse, ProviderError> {
        self.mix_calls.fetch_add(1, Ordering::SeqCst);
        record(&self.last_mix_body, json!({ "voices": voices }));

        tracing::debug!(
            voice_count = voices.len(),
            api_version = %credentials.api_version(),
            "FakeVoiceProvider: mix"
        );

        match &self.mix {
            Some(scripted) => scripted.clone().into_result(),
            None => Ok(ProviderResponse::new(
                200,
                "OK",
                json!({ "embedding": [0.1, 0.2, 0.3] }).to_string(),
            )),
        }
    }

    async fn create_voice(
        &self,
        credentials: &ProviderCredentials,
        voice: &MixedVoice,
    ) -> Result<ProviderResponse, ProviderError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        record(&self.last_create_body, json!(voice));

        tracing::debug!(
            name = %voice.name(),
            api_version = %credentials.api_version(),
            "FakeVoiceProvider: create"
        );

        match &self.create {
            Some(scripted) => scripted.clone().into_result(),
            None => Ok(ProviderResponse::new(
                200,
                "OK",
                json!({ "id": format!("fake-{}", uuid::Uuid::new_v4()) }).to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{Embedding, VoiceInput};

    fn credentials() -> ProviderCredentials {
        ProviderCredentials::new("key", "2024-11-13").unwrap()
    }

    #[tokio::test]
    async fn test_defaults_succeed() {
        let provider = FakeVoiceProvider::new();
        let mix = VoiceMix::new(vec![VoiceInput::new("a", 1.0).unwrap()]).unwrap();

        let mixed = provider.mix_voices(&credentials(), &mix).await.unwrap();
        assert!(mixed.is_success());

        let voice = MixedVoice::new(Embedding::new(vec![0.1]).unwrap(), None, None, None);
        let created = provider.create_voice(&credentials(), &voice).await.unwrap();
        let body: Value = serde_json::from_str(&created.body).unwrap();
        assert!(body["id"].as_str().unwrap().starts_with("fake-"));

        assert_eq!(provider.mix_calls(), 1);
        assert_eq!(provider.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_scripted() {
        let provider = FakeVoiceProvider::new().with_create_failure("reset by peer");
        let voice = MixedVoice::new(Embedding::new(vec![0.1]).unwrap(), None, None, None);

        let err = provider.create_voice(&credentials(), &voice).await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError(msg) if msg == "reset by peer"));
    }
}
