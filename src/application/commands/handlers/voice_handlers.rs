//! Voice Command Handlers - 混合音色编排
//!
//! 单次请求的线性流程:
//! Validating → MixInFlight → (MixFailed | MixOk) → CreateInFlight → (CreateFailed | CreateOk)
//!
//! 任何一步失败立即返回，不重试

use std::sync::Arc;

use serde_json::Value;

use crate::application::commands::{
    CreateMixedVoice, CreateMixedVoiceResponse, ValidatedMixedVoice,
};
use crate::application::error::{ApplicationError, UpstreamStage};
use crate::application::ports::{ProviderResponse, VoiceProviderPort};
use crate::domain::voice::{Embedding, MixedVoice};

const INVALID_EMBEDDING: &str = "Invalid embedding received from mix API";
const MISSING_VOICE_ID: &str = "No voice ID returned from create API";

// ============================================================================
// CreateMixedVoice
// ============================================================================

/// CreateMixedVoice Handler
pub struct CreateMixedVoiceHandler {
    provider: Arc<dyn VoiceProviderPort>,
}

impl CreateMixedVoiceHandler {
    pub fn new(provider: Arc<dyn VoiceProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(
        &self,
        command: CreateMixedVoice,
    ) -> Result<CreateMixedVoiceResponse, ApplicationError> {
        let command = command.validate()?;

        tracing::debug!(
            voice_count = command.voices.len(),
            total_weight = command.voices.voices().iter().map(|v| v.weight()).sum::<f64>(),
            api_version = %command.credentials.api_version(),
            "Mixing voices"
        );

        let embedding = self.mix(&command).await?;
        let voice = MixedVoice::new(
            embedding,
            command.name.clone(),
            command.description.clone(),
            command.language.clone(),
        );
        let voice_id = self.create(&command, &voice).await?;

        tracing::info!(
            voice_id = %voice_id,
            name = %voice.name(),
            source_voices = command.voices.len(),
            "Mixed voice created"
        );

        Ok(CreateMixedVoiceResponse { voice_id })
    }

    /// Step A: 混合音色，返回嵌入向量
    async fn mix(&self, command: &ValidatedMixedVoice) -> Result<Embedding, ApplicationError> {
        let response = self
            .provider
            .mix_voices(&command.credentials, &command.voices)
            .await?;
        let body = success_body(UpstreamStage::Mix, response)?;

        let embedding = body
            .get("embedding")
            .and_then(Value::as_array)
            .and_then(|values| values.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
            .and_then(|values| Embedding::new(values).ok())
            .ok_or(ApplicationError::MalformedResponse(INVALID_EMBEDDING))?;

        tracing::debug!(dimensions = embedding.dimensions(), "Mix completed");
        Ok(embedding)
    }

    /// Step B: 用嵌入向量创建音色，返回新音色 ID
    async fn create(
        &self,
        command: &ValidatedMixedVoice,
        voice: &MixedVoice,
    ) -> Result<String, ApplicationError> {
        let response = self
            .provider
            .create_voice(&command.credentials, voice)
            .await?;
        let body = success_body(UpstreamStage::Create, response)?;

        ["id", "voice_id"]
            .iter()
            .find_map(|field| body.get(*field).and_then(voice_id_value))
            .ok_or(ApplicationError::MalformedResponse(MISSING_VOICE_ID))
    }
}

/// 非 2xx 转为上游错误，2xx 解析为 JSON
fn success_body(stage: UpstreamStage, response: ProviderResponse) -> Result<Value, ApplicationError> {
    if !response.is_success() {
        let message = response.error_message(stage.error_context());
        tracing::warn!(
            stage = %stage,
            status = response.status,
            error = %message,
            "Voice provider request failed"
        );
        return Err(ApplicationError::UpstreamError {
            stage,
            status: response.status,
            message,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| {
        ApplicationError::internal(format!("Failed to parse {} API response: {}", stage, e))
    })
}

/// 空字符串、null、false 等都视为缺失
fn voice_id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::VoiceSpec;
    use crate::infrastructure::adapters::FakeVoiceProvider;

    fn command() -> CreateMixedVoice {
        CreateMixedVoice {
            api_key: Some("sk-test".to_string()),
            api_version: Some("2024-11-13".to_string()),
            voices: Some(vec![
                VoiceSpec { id: "voice-a".to_string(), weight: 0.5 },
                VoiceSpec { id: "voice-b".to_string(), weight: 0.5 },
            ]),
            ..Default::default()
        }
    }

    fn mix_ok() -> ProviderResponse {
        ProviderResponse::new(200, "OK", r#"{"embedding":[0.1,0.2,0.3]}"#)
    }

    fn handler(provider: &Arc<FakeVoiceProvider>) -> CreateMixedVoiceHandler {
        CreateMixedVoiceHandler::new(provider.clone())
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_calls() {
        let provider = Arc::new(FakeVoiceProvider::new());
        let cmd = CreateMixedVoice {
            api_key: None,
            ..command()
        };

        let err = handler(&provider).handle(cmd).await.unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(provider.mix_calls(), 0);
        assert_eq!(provider.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_mix_error_is_forwarded_and_create_skipped() {
        let provider = Arc::new(FakeVoiceProvider::new().with_mix_response(
            ProviderResponse::new(401, "Unauthorized", r#"{"error":{"message":"bad key"}}"#),
        ));

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert_eq!(err.to_string(), "bad key");
        assert_eq!(err.status_code(), 401);
        assert_eq!(provider.mix_calls(), 1);
        assert_eq!(provider.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_embedding_is_malformed() {
        let provider = Arc::new(
            FakeVoiceProvider::new().with_mix_response(ProviderResponse::new(200, "OK", "{}")),
        );

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid embedding received from mix API");
        assert_eq!(err.status_code(), 500);
        assert_eq!(provider.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_non_array_or_empty_embedding_is_malformed() {
        for body in [r#"{"embedding":"abc"}"#, r#"{"embedding":[]}"#, r#"{"embedding":[1,"x"]}"#] {
            let provider = Arc::new(
                FakeVoiceProvider::new().with_mix_response(ProviderResponse::new(200, "OK", body)),
            );

            let err = handler(&provider).handle(command()).await.unwrap_err();

            assert_eq!(err.status_code(), 500, "body: {}", body);
            assert_eq!(provider.create_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_unparseable_mix_body_is_internal_error() {
        let provider = Arc::new(
            FakeVoiceProvider::new().with_mix_response(ProviderResponse::new(200, "OK", "not json")),
        );

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert!(matches!(err, ApplicationError::InternalError(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(provider.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_success_with_id() {
        let provider = Arc::new(
            FakeVoiceProvider::new()
                .with_mix_response(mix_ok())
                .with_create_response(ProviderResponse::new(200, "OK", r#"{"id":"v123"}"#)),
        );

        let result = handler(&provider).handle(command()).await.unwrap();

        assert_eq!(result, CreateMixedVoiceResponse { voice_id: "v123".to_string() });
        assert_eq!(provider.mix_calls(), 1);
        assert_eq!(provider.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_success_with_voice_id_fallback() {
        let provider = Arc::new(
            FakeVoiceProvider::new()
                .with_mix_response(mix_ok())
                .with_create_response(ProviderResponse::new(201, "Created", r#"{"voice_id":"v456"}"#)),
        );

        let result = handler(&provider).handle(command()).await.unwrap();

        assert_eq!(result.voice_id, "v456");
    }

    #[tokio::test]
    async fn test_id_preferred_over_voice_id() {
        let provider = Arc::new(
            FakeVoiceProvider::new().with_mix_response(mix_ok()).with_create_response(
                ProviderResponse::new(200, "OK", r#"{"id":"primary","voice_id":"secondary"}"#),
            ),
        );

        let result = handler(&provider).handle(command()).await.unwrap();

        assert_eq!(result.voice_id, "primary");
    }

    #[tokio::test]
    async fn test_missing_voice_id_is_malformed() {
        let provider = Arc::new(
            FakeVoiceProvider::new()
                .with_mix_response(mix_ok())
                .with_create_response(ProviderResponse::new(200, "OK", r#"{"name":"x"}"#)),
        );

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert_eq!(err.to_string(), "No voice ID returned from create API");
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_create_error_is_forwarded() {
        let provider = Arc::new(
            FakeVoiceProvider::new()
                .with_mix_response(mix_ok())
                .with_create_response(ProviderResponse::new(422, "Unprocessable Entity", "")),
        );

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert_eq!(err.to_string(), "Create API error: Unprocessable Entity");
        assert_eq!(err.status_code(), 422);
        assert!(matches!(
            err,
            ApplicationError::UpstreamError { stage: UpstreamStage::Create, .. }
        ));
        assert_eq!(provider.mix_calls(), 1);
        assert_eq!(provider.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_body_uses_defaults_and_embedding() {
        let provider = Arc::new(FakeVoiceProvider::new().with_mix_response(mix_ok()));

        handler(&provider).handle(command()).await.unwrap();

        let body = provider.last_create_body().unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Mixed Voice",
                "description": "A voice created by mixing multiple voices",
                "language": "en",
                "embedding": [0.1, 0.2, 0.3]
            })
        );
    }

    #[tokio::test]
    async fn test_create_body_uses_caller_fields() {
        let provider = Arc::new(FakeVoiceProvider::new().with_mix_response(mix_ok()));
        let cmd = CreateMixedVoice {
            name: Some("Blend".to_string()),
            description: Some("half and half".to_string()),
            language: Some("de".to_string()),
            ..command()
        };

        handler(&provider).handle(cmd).await.unwrap();

        let body = provider.last_create_body().unwrap();
        assert_eq!(body["name"], "Blend");
        assert_eq!(body["description"], "half and half");
        assert_eq!(body["language"], "de");
    }

    #[tokio::test]
    async fn test_mix_body_forwards_voices_in_order() {
        let provider = Arc::new(FakeVoiceProvider::new());

        handler(&provider).handle(command()).await.unwrap();

        assert_eq!(
            provider.last_mix_body().unwrap(),
            serde_json::json!({
                "voices": [
                    {"id": "voice-a", "weight": 0.5},
                    {"id": "voice-b", "weight": 0.5}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal_error() {
        let provider = Arc::new(FakeVoiceProvider::new().with_mix_failure("connection refused"));

        let err = handler(&provider).handle(command()).await.unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(provider.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_embedding_digits_survive_to_create_body() {
        // 19 位有效数字，非正确舍入的解析器会在末位产生偏差
        let raw = "0.3485510186621062260";
        let provider = Arc::new(FakeVoiceProvider::new().with_mix_response(ProviderResponse::new(
            200,
            "OK",
            format!(r#"{{"embedding":[{},-0.5]}}"#, raw),
        )));

        handler(&provider).handle(command()).await.unwrap();

        let body = provider.last_create_body().unwrap();
        let expected: f64 = raw.parse().unwrap();
        assert_eq!(body["embedding"][0].as_f64(), Some(expected));
        assert_eq!(body["embedding"][1].as_f64(), Some(-0.5));
        assert_eq!(
            serde_json::to_string(&body["embedding"]).unwrap(),
            format!("[{:?},-0.5]", expected)
        );
    }
}
