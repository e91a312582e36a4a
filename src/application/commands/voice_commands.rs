//! Voice Commands - 混合音色命令与输入校验

use crate::application::error::ApplicationError;
use crate::domain::voice::{ProviderCredentials, VoiceInput, VoiceMix};

/// 调用方提交的源音色（未校验）
#[derive(Debug, Clone)]
pub struct VoiceSpec {
    pub id: String,
    pub weight: f64,
}

/// 创建混合音色命令
///
/// 字段与调用方请求一一对应，尚未校验
#[derive(Debug, Clone, Default)]
pub struct CreateMixedVoice {
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub voices: Option<Vec<VoiceSpec>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// 通过校验的命令
#[derive(Debug, Clone)]
pub struct ValidatedMixedVoice {
    pub credentials: ProviderCredentials,
    pub voices: VoiceMix,
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// 创建混合音色响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMixedVoiceResponse {
    pub voice_id: String,
}

impl CreateMixedVoice {
    /// 校验输入
    ///
    /// 纯函数，必须在任何上游调用之前执行
    pub fn validate(self) -> Result<ValidatedMixedVoice, ApplicationError> {
        let (api_key, api_version, voices) = match (self.api_key, self.api_version, self.voices) {
            (Some(key), Some(version), Some(voices))
                if !key.is_empty() && !version.is_empty() && !voices.is_empty() =>
            {
                (key, version, voices)
            }
            _ => return Err(ApplicationError::validation("Missing required fields")),
        };

        let credentials = ProviderCredentials::new(api_key, api_version)?;
        let voices = voices
            .into_iter()
            .map(|v| VoiceInput::new(v.id, v.weight))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedMixedVoice {
            credentials,
            voices: VoiceMix::new(voices)?,
            name: self.name,
            description: self.description,
            language: self.language,
        })
    }
}
