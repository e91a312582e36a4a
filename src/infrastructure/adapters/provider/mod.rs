//! Voice Provider Adapter - 上游语音服务客户端实现

mod fake_voice_provider;
mod http_voice_provider;

pub use fake_voice_provider::FakeVoiceProvider;
pub use http_voice_provider::{HttpVoiceProvider, HttpVoiceProviderConfig};
