//! Domain Layer - 领域层
//!
//! 包含与传输和基础设施无关的业务类型：
//! - voice: 声音/语言目录与语音选择器
//! - prompt: 对话历史展开

pub mod prompt;
pub mod voice;

pub use prompt::{format_history, ChatMessage};
pub use voice::{
    is_supported_voice, SpeakerConfig, VoiceSelector, DEFAULT_VOICE, SUPPORTED_LANGUAGES,
    SUPPORTED_VOICES,
};
