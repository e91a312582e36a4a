//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

use super::VoiceError;

/// 混合中的一个源音色
///
/// 不变量:
/// - id 非空（不能全是空白）
/// - weight 为有限数且位于 [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceInput {
    id: String,
    weight: f64,
}

impl VoiceInput {
    pub fn new(id: impl Into<String>, weight: f64) -> Result<Self, VoiceError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(VoiceError::EmptyVoiceId);
        }
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(VoiceError::WeightOutOfRange(weight));
        }
        Ok(Self { id, weight })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// 有序的源音色列表，顺序原样转发给上游
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VoiceMix(Vec<VoiceInput>);

impl VoiceMix {
    pub fn new(voices: Vec<VoiceInput>) -> Result<Self, VoiceError> {
        if voices.is_empty() {
            return Err(VoiceError::EmptyMix);
        }
        Ok(Self(voices))
    }

    pub fn voices(&self) -> &[VoiceInput] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 混合接口返回的嵌入向量
///
/// 对本系统不透明，原样传给创建接口。不变量: 非空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f64>);

impl Embedding {
    pub fn new(values: Vec<f64>) -> Result<Self, VoiceError> {
        if values.is_empty() {
            return Err(VoiceError::EmptyEmbedding);
        }
        Ok(Self(values))
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }
}

/// 调用方提供的上游凭据
///
/// 只在单次请求内使用；Debug 输出不包含明文 API key
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    api_key: String,
    api_version: String,
}

impl ProviderCredentials {
    pub fn new(
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self, VoiceError> {
        let api_key = api_key.into();
        let api_version = api_version.into();
        if api_key.is_empty() {
            return Err(VoiceError::MissingCredential("apiKey"));
        }
        if api_version.is_empty() {
            return Err(VoiceError::MissingCredential("apiVersion"));
        }
        Ok(Self {
            api_key,
            api_version,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &"***")
            .field("api_version", &self.api_version)
            .finish()
    }
}
