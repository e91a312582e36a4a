//! Data Transfer Objects
//!
//! 对外 JSON 字段使用 camelCase

use serde::{Deserialize, Serialize};

use crate::application::{CreateMixedVoice, VoiceSpec};

// ============================================================================
// Create Voice DTOs
// ============================================================================

/// 源音色
#[derive(Debug, Deserialize)]
pub struct VoiceInputDto {
    pub id: String,
    pub weight: f64,
}

/// POST /api/create-voice 请求体
///
/// 必填字段也声明为 Option，缺失与否交给应用层统一校验
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceRequest {
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub voices: Option<Vec<VoiceInputDto>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl From<CreateVoiceRequest> for CreateMixedVoice {
    fn from(req: CreateVoiceRequest) -> Self {
        Self {
            api_key: req.api_key,
            api_version: req.api_version,
            voices: req.voices.map(|voices| {
                voices
                    .into_iter()
                    .map(|v| VoiceSpec {
                        id: v.id,
                        weight: v.weight,
                    })
                    .collect()
            }),
            name: req.name,
            description: req.description,
            language: req.language,
        }
    }
}

/// 创建成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceResponse {
    pub voice_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let req: CreateVoiceRequest = serde_json::from_str(
            r#"{"apiKey":"k","apiVersion":"2024-11-13","voices":[{"id":"a","weight":0.5}],"language":null}"#,
        )
        .unwrap();

        let command = CreateMixedVoice::from(req);
        assert_eq!(command.api_key.as_deref(), Some("k"));
        assert_eq!(command.api_version.as_deref(), Some("2024-11-13"));
        assert_eq!(command.voices.unwrap()[0].id, "a");
        assert!(command.language.is_none());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let json = serde_json::to_value(CreateVoiceResponse {
            voice_id: "v123".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"voiceId": "v123"}));
    }

    #[test]
    fn test_weight_parsed_with_correct_rounding() {
        let raw = "0.3485510186621062260";
        let dto: VoiceInputDto =
            serde_json::from_str(&format!(r#"{{"id":"a","weight":{}}}"#, raw)).unwrap();
        assert_eq!(dto.weight, raw.parse::<f64>().unwrap());
    }
}
