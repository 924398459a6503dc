//! Data Transfer Objects - HTTP 请求/响应模型
//!
//! 线格式使用 camelCase。所有业务响应统一携带 success 标志，
//! 失败时只填充 error 消息文本，HTTP 状态码保持 200

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::ServiceError;
use crate::domain::{self, SpeakerConfig};

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_voice_name() -> String {
    domain::DEFAULT_VOICE.to_string()
}

/// 校验公共的生成参数边界
fn validate_generation_params(
    max_tokens: Option<u32>,
    temperature: f32,
    top_p: Option<f32>,
) -> Result<(), ServiceError> {
    if let Some(max_tokens) = max_tokens {
        if !(1..=4000).contains(&max_tokens) {
            return Err(ServiceError::validation(
                "maxTokens must be between 1 and 4000",
            ));
        }
    }
    if !(0.0..=1.0).contains(&temperature) {
        return Err(ServiceError::validation(
            "temperature must be between 0.0 and 1.0",
        ));
    }
    if let Some(top_p) = top_p {
        if !(0.0..=1.0).contains(&top_p) {
            return Err(ServiceError::validation("topP must be between 0.0 and 1.0"));
        }
    }
    Ok(())
}

fn validate_prompt(prompt: &str) -> Result<(), ServiceError> {
    let len = prompt.chars().count();
    if len == 0 || len > 10_000 {
        return Err(ServiceError::validation(
            "prompt must be between 1 and 10000 characters",
        ));
    }
    Ok(())
}

fn validate_speech_text(text: &str) -> Result<(), ServiceError> {
    let len = text.chars().count();
    if len == 0 || len > 5_000 {
        return Err(ServiceError::validation(
            "text must be between 1 and 5000 characters",
        ));
    }
    Ok(())
}

// ============================================================================
// 请求模型
// ============================================================================

/// 文本生成请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl TextGenerationRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_prompt(&self.prompt)?;
        validate_generation_params(self.max_tokens, self.temperature, Some(self.top_p))
    }
}

/// 对话消息
#[derive(Debug, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

impl From<HistoryMessage> for domain::ChatMessage {
    fn from(message: HistoryMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }
}

/// 基于对话历史的文本生成请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationWithHistoryRequest {
    pub messages: Vec<HistoryMessage>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl TextGenerationWithHistoryRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.messages.is_empty() {
            return Err(ServiceError::validation("messages must not be empty"));
        }
        validate_generation_params(self.max_tokens, self.temperature, None)
    }
}

/// 文本转语音请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechRequest {
    pub text: String,
    #[serde(default = "default_voice_name")]
    pub voice_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl TextToSpeechRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_speech_text(&self.text)
    }
}

/// 组合请求：生成文本并转换为语音
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_voice_name")]
    pub voice_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl CombinedRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_prompt(&self.prompt)?;
        validate_generation_params(self.max_tokens, self.temperature, None)
    }
}

/// 说话人配置
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerConfigDto {
    pub speaker: String,
    pub voice_name: String,
}

impl From<SpeakerConfigDto> for SpeakerConfig {
    fn from(dto: SpeakerConfigDto) -> Self {
        Self {
            speaker: dto.speaker,
            voice_name: dto.voice_name,
        }
    }
}

/// 多说话人 TTS 请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpeakerTtsRequest {
    pub text: String,
    pub speaker_configs: Vec<SpeakerConfigDto>,
}

impl MultiSpeakerTtsRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_speech_text(&self.text)?;
        if self.speaker_configs.is_empty() {
            return Err(ServiceError::validation("speakerConfigs must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// 响应模型
// ============================================================================

/// 文本生成响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TextGenerationResponse {
    pub fn ok(text: String, metadata: serde_json::Value) -> Self {
        Self {
            success: true,
            text: Some(text),
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn err(error: &ServiceError) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.to_string()),
            metadata: None,
        }
    }
}

/// 文本转语音响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TextToSpeechResponse {
    pub fn ok(filename: String, metadata: serde_json::Value) -> Self {
        Self {
            success: true,
            audio_url: Some(format!("/audio/{}", filename)),
            filename: Some(filename),
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn err(error: &ServiceError) -> Self {
        Self {
            success: false,
            audio_url: None,
            filename: None,
            error: Some(error.to_string()),
            metadata: None,
        }
    }
}

/// 组合响应：生成的文本 + 音频地址
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl CombinedResponse {
    pub fn ok(text: String, filename: String, metadata: serde_json::Value) -> Self {
        Self {
            success: true,
            text: Some(text),
            audio_url: Some(format!("/audio/{}", filename)),
            filename: Some(filename),
            error: None,
            metadata: Some(metadata),
        }
    }

    pub fn err(error: &ServiceError) -> Self {
        Self {
            success: false,
            text: None,
            audio_url: None,
            filename: None,
            error: Some(error.to_string()),
            metadata: None,
        }
    }
}

/// API 状态响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatusResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// 声音列表响应
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub success: bool,
    pub voices: Vec<String>,
}

/// 语言列表响应
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: BTreeMap<String, String>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}
