//! Gemini Client - 调用 Gemini REST API
//!
//! 实现 GenerationPort trait，通过 HTTP 调用
//! generativelanguage.googleapis.com 的 generateContent 接口
//!
//! 瞬时网络/TLS 错误在 `with_retry` 中按线性退避重试；
//! 其他错误立即传播。重试耗尽后转为终止性上游错误并带上最后一次原因

use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

use crate::application::ports::{GenerationPort, TextParams, UpstreamError};
use crate::domain::SpeakerConfig;

use super::payload::{
    extract_audio, extract_text, ExtractError, GenerateContentRequest, GenerateContentResponse,
};

/// Gemini API 基础 URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API Key（为空表示未配置）
    pub api_key: String,
    /// 文本生成模型
    pub model: String,
    /// TTS 模型
    pub tts_model: String,
    /// 单次 HTTP 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 瞬时错误的最大尝试次数
    pub max_attempts: u32,
    /// 重试基础延迟，第 n 次重试前等待 base * n
    pub retry_base_delay: Duration,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            tts_model: "gemini-2.5-flash-preview-tts".to_string(),
            timeout_secs: 120,
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

impl From<&crate::config::GeminiConfig> for GeminiClientConfig {
    fn from(config: &crate::config::GeminiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            tts_model: config.tts_model.clone(),
            timeout_secs: config.timeout_secs,
            max_attempts: config.max_attempts,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }
}

/// Gemini 客户端
pub struct GeminiClient {
    http: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    ///
    /// API Key 为空时也能创建，调用时返回未配置错误
    pub fn new(config: GeminiClientConfig) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Service(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// 获取 generateContent URL
    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", API_BASE_URL, model)
    }

    /// 发送一次 generateContent 请求
    async fn post_generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        if self.config.api_key.is_empty() {
            return Err(UpstreamError::NotConfigured);
        }

        let response = self
            .http
            .post(self.generate_url(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Service(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// 带重试地发送一次 generateContent 请求
    async fn post_generate_with_retry(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        with_retry(
            self.config.max_attempts,
            self.config.retry_base_delay,
            || self.post_generate(model, request),
        )
        .await
    }
}

/// 判定请求错误是否为可重试的瞬时网络/TLS 错误
fn classify_request_error(e: reqwest::Error) -> UpstreamError {
    let message = e.to_string();
    let lower = message.to_lowercase();

    if e.is_connect()
        || e.is_timeout()
        || lower.contains("ssl")
        || lower.contains("tls")
        || lower.contains("unexpected_eof")
    {
        UpstreamError::Transient(message)
    } else {
        UpstreamError::Service(message)
    }
}

/// 瞬时错误重试包装器
///
/// 仅对 `UpstreamError::Transient` 重试，最多尝试 max_attempts 次，
/// 第 n 次重试前等待 base_delay * n（线性退避）。
/// 耗尽后转为终止性 Service 错误并带上最后一次原因
pub(crate) async fn with_retry<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(UpstreamError::Transient(cause)) => {
                if attempt >= max_attempts {
                    return Err(UpstreamError::Service(format!(
                        "Connection failed after {} attempts: {}",
                        max_attempts, cause
                    )));
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %cause,
                    "Transient upstream error, retrying"
                );
                tokio::time::sleep(base_delay * attempt).await;
                attempt += 1;
            }
            Err(other) => return Err(other),
        }
    }
}

impl From<ExtractError> for UpstreamError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NoAudioData { parts } => UpstreamError::NoAudioData { parts },
            other => UpstreamError::InvalidResponse(other.to_string()),
        }
    }
}

#[async_trait]
impl GenerationPort for GeminiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        params: &TextParams,
    ) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest::text(prompt, params);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending text generation request"
        );

        let response = self
            .post_generate_with_retry(&self.config.model, &request)
            .await?;
        let text = extract_text(&response)?;

        tracing::info!(response_len = text.len(), "Text generation succeeded");
        Ok(text)
    }

    async fn synthesize(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, UpstreamError> {
        let request = GenerateContentRequest::speech(text, voice_name);

        tracing::debug!(
            model = %self.config.tts_model,
            voice = voice_name,
            text_len = text.len(),
            "Sending speech synthesis request"
        );

        let response = self
            .post_generate_with_retry(&self.config.tts_model, &request)
            .await?;
        let pcm = extract_audio(&response)?;

        tracing::info!(size = pcm.len(), "Speech synthesis succeeded");
        Ok(pcm)
    }

    async fn synthesize_multi(
        &self,
        text: &str,
        speakers: &[SpeakerConfig],
    ) -> Result<Vec<u8>, UpstreamError> {
        let request = GenerateContentRequest::multi_speech(text, speakers);

        tracing::debug!(
            model = %self.config.tts_model,
            speakers = speakers.len(),
            text_len = text.len(),
            "Sending multi-speaker synthesis request"
        );

        let response = self
            .post_generate_with_retry(&self.config.tts_model, &request)
            .await?;
        let pcm = extract_audio(&response)?;

        tracing::info!(
            size = pcm.len(),
            speakers = speakers.len(),
            "Multi-speaker synthesis succeeded"
        );
        Ok(pcm)
    }

    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
