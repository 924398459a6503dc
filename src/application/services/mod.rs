//! Application Services - 用例编排
//!
//! 文本生成与语音合成的业务流程，依赖通过端口注入

mod speech_service;
mod text_service;

pub use speech_service::SpeechService;
pub use text_service::TextService;
