//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 端口定义（GenerationPort、ArtifactStorePort）
//! - services: 文本生成与语音合成服务
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod services;

pub use error::ServiceError;
pub use ports::{
    derive_filename, ArtifactStorePort, GenerationPort, StoreError, TextParams, UpstreamError,
};
pub use services::{SpeechService, TextService};
