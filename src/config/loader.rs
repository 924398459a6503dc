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

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `PARLEY_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `PARLEY_SERVER__HOST=127.0.0.1`
/// - `PARLEY_SERVER__PORT=8000`
/// - `PARLEY_GEMINI__API_KEY=...`
/// - `PARLEY_STORAGE__AUDIO_DIR=/data/audio`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("gemini.api_key", "")?
        .set_default("gemini.model", "gemini-2.0-flash")?
        .set_default("gemini.tts_model", "gemini-2.5-flash-preview-tts")?
        .set_default("gemini.timeout_secs", 120)?
        .set_default("gemini.max_attempts", 3)?
        .set_default("gemini.retry_base_delay_ms", 1000)?
        .set_default("storage.audio_dir", "audio_output")?
        .set_default("storage.max_artifacts", 100)?
        .set_default("speech.deadline_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: PARLEY_
    // 层级分隔符: __ (双下划线)
    // 例如: PARLEY_GEMINI__API_KEY=...
    builder = builder.add_source(
        Environment::with_prefix("PARLEY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证模型名称
    if config.gemini.model.is_empty() || config.gemini.tts_model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini model names cannot be empty".to_string(),
        ));
    }

    // 验证重试配置
    if config.gemini.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "gemini.max_attempts must be at least 1".to_string(),
        ));
    }

    // 验证存储配置
    if config.storage.max_artifacts == 0 {
        return Err(ConfigError::ValidationError(
            "storage.max_artifacts must be at least 1".to_string(),
        ));
    }

    if config.speech.deadline_secs == 0 {
        return Err(ConfigError::ValidationError(
            "speech.deadline_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Gemini Model: {}", config.gemini.model);
    tracing::info!("Gemini TTS Model: {}", config.gemini.tts_model);
    tracing::info!(
        "Gemini API Key: {}",
        if config.gemini.api_key.is_empty() {
            "NOT CONFIGURED"
        } else {
            "configured"
        }
    );
    tracing::info!("Upstream Timeout: {}s", config.gemini.timeout_secs);
    tracing::info!("Upstream Max Attempts: {}", config.gemini.max_attempts);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Max Artifacts: {}", config.storage.max_artifacts);
    tracing::info!("Speech Deadline: {}s", config.speech.deadline_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.gemini.model = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_attempts() {
        let mut config = AppConfig::default();
        config.gemini.max_attempts = 0;
        assert!(validate_config(&config).is_err());
    }
}
