//! Voice Context - Aggregate Root

use serde::Serialize;

use super::Embedding;

/// 未指定名称时使用的默认值
pub const DEFAULT_NAME: &str = "Mixed Voice";
/// 未指定描述时使用的默认值
pub const DEFAULT_DESCRIPTION: &str = "A voice created by mixing multiple voices";
/// 未指定语言时使用的默认值
pub const DEFAULT_LANGUAGE: &str = "en";

/// 待注册的混合音色
///
/// 不变量:
/// - embedding 来自同一请求的混合结果，不做修改
/// - 缺省字段使用固定默认值；显式传入的空字符串保持原样
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixedVoice {
    name: String,
    description: String,
    language: String,
    embedding: Embedding,
}

impl MixedVoice {
    pub fn new(
        embedding: Embedding,
        name: Option<String>,
        description: Option<String>,
        language: Option<String>,
    ) -> Self {
        Self {
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            embedding,
        }
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }
}
