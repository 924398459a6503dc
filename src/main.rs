//! Parley - Gemini 文本与语音代理服务

use std::sync::Arc;
use std::time::Duration;

use parley::config::{load_config, print_config};
use parley::infrastructure::http::{AppState, HttpServer, ServerConfig};
use parley::infrastructure::{FileArtifactStore, GeminiClient, GeminiClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},parley={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Parley - Gemini 文本与语音代理服务");
    print_config(&config);

    // 确保音频输出目录存在
    tokio::fs::create_dir_all(&config.storage.audio_dir).await?;

    // 创建 Gemini 客户端
    // API Key 缺失时服务仍然启动，上游调用返回未配置错误
    if config.gemini.api_key.is_empty() {
        tracing::warn!("Gemini API key not configured, upstream calls will fail");
    }
    let client_config = GeminiClientConfig::from(&config.gemini);
    let engine = Arc::new(
        GeminiClient::new(client_config)
            .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?,
    );

    // 创建音频文件存储
    let artifact_store = Arc::new(
        FileArtifactStore::new(&config.storage.audio_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create artifact store: {}", e))?,
    );

    // 创建应用状态
    let state = AppState::new(
        engine,
        artifact_store,
        Duration::from_secs(config.speech.deadline_secs),
        config.storage.max_artifacts,
        config.speech.default_language.clone(),
    );

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
