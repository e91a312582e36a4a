//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Voice Context: 混合音色（源音色、权重、嵌入向量、新音色档案）

pub mod voice;
