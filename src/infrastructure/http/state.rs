//! Application State
//!
//! 进程启动时构造一次，按引用注入所有 handler。
//! 没有进程级可变单例：上游客户端与存储都通过端口注入，测试可替换

use std::sync::Arc;
use std::time::Duration;

use crate::application::{ArtifactStorePort, GenerationPort, SpeechService, TextService};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub engine: Arc<dyn GenerationPort>,
    pub artifact_store: Arc<dyn ArtifactStorePort>,

    // ========== Services ==========
    pub text_service: TextService,
    pub speech_service: Arc<SpeechService>,

    /// TTS 请求未指定语言时的默认值
    pub default_language: Option<String>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        engine: Arc<dyn GenerationPort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
        speech_deadline: Duration,
        keep_newest: usize,
        default_language: Option<String>,
    ) -> Self {
        Self {
            engine: engine.clone(),
            artifact_store: artifact_store.clone(),
            text_service: TextService::new(engine.clone()),
            speech_service: Arc::new(SpeechService::new(
                engine,
                artifact_store,
                speech_deadline,
                keep_newest,
            )),
            default_language,
        }
    }

    /// 在后台触发一次保留清理（fire-and-forget）
    ///
    /// 在响应已经产生之后调用，失败只记录日志，不影响请求结果
    pub fn spawn_sweep(&self) {
        let service = self.speech_service.clone();
        tokio::spawn(async move {
            service.sweep().await;
        });
    }
}
