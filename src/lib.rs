//! Parley - Gemini 文本与语音代理服务
//!
//! 将文本生成和语音合成请求转发给 Google Gemini API，
//! 生成的音频按内容 hash 缓存到文件系统并静态提供
//!
//! 领域层 (domain/):
//! - voice: 声音/语言目录与语音选择器
//! - prompt: 对话历史展开
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerationPort, ArtifactStorePort）
//! - Services: TextService, SpeechService（缓存命中/上游调用/落盘编排）
//!
//! 基础设施层 (infrastructure/):
//! - Gemini: REST 客户端（瞬时错误重试 + 响应提取）
//! - Storage: 内容寻址 WAV 文件存储与保留清理
//! - HTTP: RESTful API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
