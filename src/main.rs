//! Voice Mixer - 混合音色代理服务
//!
//! 启动流程: 加载配置 → 初始化日志 → 创建上游客户端 → 启动 HTTP 服务器

use std::sync::Arc;

use voice_mixer::application::VoiceProviderPort;
use voice_mixer::config::{load_config, print_config, AppConfig};
use voice_mixer::infrastructure::adapters::{
    FakeVoiceProvider, HttpVoiceProvider, HttpVoiceProviderConfig,
};
use voice_mixer::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Voice Mixer v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 创建上游客户端
    let provider: Arc<dyn VoiceProviderPort> = if config.upstream.fake {
        tracing::warn!("Using in-process fake voice provider, no upstream calls will be made");
        Arc::new(FakeVoiceProvider::new())
    } else {
        let provider_config = HttpVoiceProviderConfig {
            base_url: config.upstream.base_url.clone(),
            mix_path: config.upstream.mix_path.clone(),
            create_path: config.upstream.create_path.clone(),
            timeout_secs: config.upstream.timeout_secs,
        };
        Arc::new(HttpVoiceProvider::new(provider_config)?)
    };

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let static_files = &config.server.static_files;
    if static_files.enabled {
        server_config = server_config.with_static_files(&static_files.dir, &static_files.path);
    }

    let server = HttpServer::new(server_config, AppState::new(provider));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先于配置文件中的级别
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voice_mixer={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
