//! Fake Generation Client - 用于测试的生成客户端
//!
//! 始终返回固定的文本和 PCM 数据，不实际调用 Gemini 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{GenerationPort, TextParams, UpstreamError};
use crate::domain::SpeakerConfig;

/// Fake Generation Client
///
/// 固定返回配置的文本/PCM 数据，并记录调用次数供测试断言
pub struct FakeGenerationClient {
    text_response: String,
    pcm: Vec<u8>,
    latency: Duration,
    text_calls: AtomicUsize,
    synth_calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeGenerationClient {
    pub fn new() -> Self {
        Self {
            text_response: "generated text".to_string(),
            // 0.5 秒的 24kHz/16-bit 单声道静音
            pcm: vec![0u8; 24_000],
            latency: Duration::ZERO,
            text_calls: AtomicUsize::new(0),
            synth_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// 设置固定返回的文本
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_response = text.into();
        self
    }

    /// 设置固定返回的 PCM 数据
    pub fn with_pcm(mut self, pcm: Vec<u8>) -> Self {
        self.pcm = pcm;
        self
    }

    /// 设置模拟延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// 文本生成调用次数
    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    /// 语音合成调用次数（单声音 + 多说话人）
    pub fn synth_calls(&self) -> usize {
        self.synth_calls.load(Ordering::SeqCst)
    }

    /// 最近一次收到的 prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for FakeGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationPort for FakeGenerationClient {
    async fn generate_text(
        &self,
        prompt: &str,
        _params: &TextParams,
    ) -> Result<String, UpstreamError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.text_response.clone())
    }

    async fn synthesize(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, UpstreamError> {
        tracing::debug!(
            text_len = text.len(),
            voice = voice_name,
            "FakeGenerationClient: returning fixed audio"
        );
        self.synth_calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.pcm.clone())
    }

    async fn synthesize_multi(
        &self,
        text: &str,
        speakers: &[SpeakerConfig],
    ) -> Result<Vec<u8>, UpstreamError> {
        tracing::debug!(
            text_len = text.len(),
            speakers = speakers.len(),
            "FakeGenerationClient: returning fixed multi-speaker audio"
        );
        self.synth_calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.pcm.clone())
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "fake-generation-model"
    }
}
