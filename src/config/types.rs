//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini 上游配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            storage: StorageConfig::default(),
            speech: SpeechConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gemini 上游配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API Key（为空时服务仍可启动，上游调用返回未配置错误）
    #[serde(default)]
    pub api_key: String,

    /// 文本生成模型
    #[serde(default = "default_model")]
    pub model: String,

    /// TTS 模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 单次 HTTP 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 瞬时网络错误的最大尝试次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 重试基础延迟（毫秒），第 n 次重试前等待 base * n
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    1000
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            tts_model: default_tts_model(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频输出目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// 保留的最大音频文件数（清理时保留最新的 N 个）
    #[serde(default = "default_max_artifacts")]
    pub max_artifacts: usize,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("audio_output")
}

fn default_max_artifacts() -> usize {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            max_artifacts: default_max_artifacts(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 默认语言代码（未指定时由模型自动检测）
    #[serde(default)]
    pub default_language: Option<String>,

    /// 单次合成请求的总体超时时间（秒），含重试
    #[serde(default = "default_speech_deadline")]
    pub deadline_secs: u64,
}

fn default_speech_deadline() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            deadline_secs: default_speech_deadline(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.tts_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.storage.max_artifacts, 100);
        assert_eq!(config.speech.deadline_secs, 30);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }
}
