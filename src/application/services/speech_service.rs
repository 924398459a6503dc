//! Speech Service - 语音合成编排
//!
//! 单次合成请求的完整流程：
//! 派生缓存文件名 → 命中则直接返回 → 未命中则在截止期限内调用上游 →
//! PCM 封装为 WAV 写入 → 返回文件名。保留清理由调用方在响应后异步触发
//!
//! 相同 key 的并发请求不做合并：两者都可能调用上游并写同一路径，
//! 内容由 key 决定，后写者覆盖无害

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::ServiceError;
use crate::application::ports::{derive_filename, ArtifactStorePort, GenerationPort};
use crate::domain::{is_supported_voice, SpeakerConfig, VoiceSelector};

/// 语音合成服务
pub struct SpeechService {
    engine: Arc<dyn GenerationPort>,
    store: Arc<dyn ArtifactStorePort>,
    /// 单次合成的总体截止期限（含重试）
    deadline: Duration,
    /// 清理时保留的最新文件数
    keep_newest: usize,
}

impl SpeechService {
    pub fn new(
        engine: Arc<dyn GenerationPort>,
        store: Arc<dyn ArtifactStorePort>,
        deadline: Duration,
        keep_newest: usize,
    ) -> Self {
        Self {
            engine,
            store,
            deadline,
            keep_newest,
        }
    }

    /// 单声音语音合成，返回生成的文件名
    pub async fn speak(
        &self,
        text: &str,
        voice_name: &str,
        language: Option<&str>,
    ) -> Result<String, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::validation("text must not be empty"));
        }

        if !is_supported_voice(voice_name) {
            tracing::warn!(voice = voice_name, "Voice may not be supported, trying anyway");
        }

        let selector = VoiceSelector::Single(voice_name.to_string());
        let filename = derive_filename(text, &selector.descriptor(), language);

        if self.store.exists(&filename).await {
            tracing::info!(filename = %filename, "Using cached audio file");
            return Ok(filename);
        }

        let pcm = self.synthesize_with_deadline(text, &selector).await?;
        self.store.save_pcm_as_wav(&filename, &pcm).await?;

        tracing::info!(filename = %filename, size = pcm.len(), "Generated audio file");
        Ok(filename)
    }

    /// 多说话人语音合成，返回生成的文件名
    ///
    /// 缓存 key 使用调用方给定的说话人顺序；语言槽位固定为 auto
    pub async fn speak_multi(
        &self,
        text: &str,
        speakers: &[SpeakerConfig],
    ) -> Result<String, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::validation("text must not be empty"));
        }
        if speakers.is_empty() {
            return Err(ServiceError::validation(
                "speakerConfigs must not be empty",
            ));
        }

        let selector = VoiceSelector::Multi(speakers.to_vec());
        let filename = derive_filename(text, &selector.descriptor(), None);

        if self.store.exists(&filename).await {
            tracing::info!(filename = %filename, "Using cached multi-speaker audio file");
            return Ok(filename);
        }

        let pcm = self.synthesize_with_deadline(text, &selector).await?;
        self.store.save_pcm_as_wav(&filename, &pcm).await?;

        tracing::info!(
            filename = %filename,
            size = pcm.len(),
            speakers = speakers.len(),
            "Generated multi-speaker audio file"
        );
        Ok(filename)
    }

    /// 在总体截止期限内调用上游合成
    ///
    /// 期限覆盖整个调用（重试包含在内）。超时后放弃等待中的调用，
    /// 返回 Timeout 而非重试耗尽错误
    async fn synthesize_with_deadline(
        &self,
        text: &str,
        selector: &VoiceSelector,
    ) -> Result<Vec<u8>, ServiceError> {
        let call = async {
            match selector {
                VoiceSelector::Single(voice) => self.engine.synthesize(text, voice).await,
                VoiceSelector::Multi(speakers) => {
                    self.engine.synthesize_multi(text, speakers).await
                }
            }
        };

        match tokio::time::timeout(self.deadline, call).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::error!(
                    deadline_secs = self.deadline.as_secs(),
                    "Speech synthesis timed out"
                );
                Err(ServiceError::Timeout(self.deadline.as_secs()))
            }
        }
    }

    /// 保留清理：删除最新 N 个之外的音频文件
    ///
    /// 在响应已返回后由后台任务调用，失败只记录日志
    pub async fn sweep(&self) {
        match self.store.trim(self.keep_newest).await {
            Ok(0) => {}
            Ok(deleted) => {
                tracing::info!(deleted, keep_newest = self.keep_newest, "Swept old audio files");
            }
            Err(e) => {
                tracing::error!(error = %e, "Audio file sweep failed");
            }
        }
    }
}
