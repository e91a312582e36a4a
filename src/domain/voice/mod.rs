//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 源音色及混合权重校验
//! - 混合嵌入向量的不变量
//! - 待注册新音色的档案（含默认值）
//!
//! 所有对象都是请求级的，不做持久化

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{MixedVoice, DEFAULT_DESCRIPTION, DEFAULT_LANGUAGE, DEFAULT_NAME};
pub use errors::VoiceError;
pub use value_objects::{Embedding, ProviderCredentials, VoiceInput, VoiceMix};
