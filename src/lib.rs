//! Voice Mixer - 混合音色代理服务
//!
//! 接收前端提交的多个源音色及权重，依次调用上游的混合接口与创建接口，
//! 把混合得到的嵌入向量注册为新音色。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 源音色、嵌入向量、新音色档案
//!
//! 应用层 (application/):
//! - Ports: VoiceProviderPort
//! - Commands: 创建混合音色（校验 + 两步编排）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: /api/create-voice、/api/ping、静态前端
//! - Adapters: 上游 HTTP 客户端、Fake 实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
