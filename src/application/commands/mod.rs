//! 应用层 - 命令（写操作）
//!
//! 目前只有一个命令: 创建混合音色

mod voice_commands;

pub mod handlers;

pub use voice_commands::*;
