//! Generation Port - 上游生成能力抽象
//!
//! 定义 Gemini 生成调用的抽象接口，具体实现在 infrastructure/gemini 层。
//! 文本生成返回提取后的文本，语音合成返回提取后的原始 PCM 字节
//! （24kHz, 16-bit, mono）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SpeakerConfig;

/// 上游调用错误
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 客户端未配置 API Key
    #[error("Gemini client not configured, check API key")]
    NotConfigured,

    /// 瞬时网络/TLS 错误，可安全重试；仅在重试包装器内部流转
    #[error("Transient network error: {0}")]
    Transient(String),

    /// 上游服务错误（非瞬时，或瞬时错误重试耗尽）
    #[error("Upstream service error: {0}")]
    Service(String),

    /// 响应结构无法解析
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// 所有已知形态均未找到音频数据
    #[error("No audio data found in response ({parts} content parts)")]
    NoAudioData { parts: usize },
}

/// 文本生成参数
#[derive(Debug, Clone)]
pub struct TextParams {
    /// 最大输出 token 数
    pub max_tokens: Option<u32>,
    /// 创造性参数 (0-1)
    pub temperature: f32,
    /// 核心采样参数 (0-1)
    pub top_p: f32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            max_tokens: None,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Generation Port
///
/// 上游生成式 API 的抽象接口
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// 生成文本
    async fn generate_text(&self, prompt: &str, params: &TextParams)
        -> Result<String, UpstreamError>;

    /// 单声音语音合成，返回原始 PCM 字节
    async fn synthesize(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, UpstreamError>;

    /// 多说话人语音合成，说话人顺序由调用方给定
    async fn synthesize_multi(
        &self,
        text: &str,
        speakers: &[SpeakerConfig],
    ) -> Result<Vec<u8>, UpstreamError>;

    /// 客户端是否已配置（不实际调用上游）
    fn is_configured(&self) -> bool;

    /// 文本生成模型名（用于 /status）
    fn model_name(&self) -> &str;
}
