//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "VOICE_MIXER";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICE_MIXER_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICE_MIXER_SERVER__PORT=8080`
/// - `VOICE_MIXER_UPSTREAM__BASE_URL=https://api.cartesia.ai`
/// - `VOICE_MIXER_UPSTREAM__FAKE=true`
/// - `VOICE_MIXER_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.max_body_bytes", 1024 * 1024)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "web")?
        .set_default("server.static_files.path", "/")?
        .set_default("upstream.base_url", "https://api.cartesia.ai")?
        .set_default("upstream.mix_path", "/voices/mix")?
        .set_default("upstream.create_path", "/voices")?
        .set_default("upstream.timeout_secs", 120)?
        .set_default("upstream.fake", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Max body size cannot be 0".to_string(),
        ));
    }

    let upstream = &config.upstream;
    if !(upstream.base_url.starts_with("http://") || upstream.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "Upstream base URL must start with http:// or https://, got '{}'",
            upstream.base_url
        )));
    }

    for (name, path) in [("mix_path", &upstream.mix_path), ("create_path", &upstream.create_path)] {
        if !path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "Upstream {} must start with '/', got '{}'",
                name, path
            )));
        }
    }

    if upstream.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Upstream timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("Static Files Enabled: {}", config.server.static_files.enabled);
    if config.server.static_files.enabled {
        tracing::info!("Static Files Dir: {:?}", config.server.static_files.dir);
    }
    if config.upstream.fake {
        tracing::info!("Upstream: in-process fake");
    } else {
        tracing::info!("Upstream URL: {}", config.upstream.base_url);
        tracing::info!(
            "Upstream Paths: mix={} create={}",
            config.upstream.mix_path,
            config.upstream.create_path
        );
        tracing::info!("Upstream Timeout: {}s", config.upstream.timeout_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
