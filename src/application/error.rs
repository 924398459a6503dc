//! 应用层错误定义
//!
//! 统一的服务错误类型。每个变体是一个错误类别，HTTP 层只向外暴露
//! 错误消息文本，类别供内部路由与日志使用

use thiserror::Error;

use crate::application::ports::{StoreError, UpstreamError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 请求参数验证失败（在调用上游前拒绝）
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gemini 客户端未配置（缺少 API Key）
    #[error("Gemini client not configured, check API key")]
    NotConfigured,

    /// 上游非瞬时失败（瞬时错误在客户端内重试耗尽后归入此类）
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// 响应中未找到音频数据
    #[error("No audio data found in response ({parts} content parts)")]
    NoAudioData { parts: usize },

    /// 总体超时（30 秒截止期限）
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// 音频文件写入/读取失败
    #[error("Storage error: {0}")]
    Io(String),
}

impl ServiceError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotConfigured => ServiceError::NotConfigured,
            UpstreamError::NoAudioData { parts } => ServiceError::NoAudioData { parts },
            UpstreamError::Transient(msg)
            | UpstreamError::Service(msg)
            | UpstreamError::InvalidResponse(msg) => ServiceError::Upstream(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_maps_to_upstream() {
        let err: ServiceError = UpstreamError::Transient("connection reset".to_string()).into();
        assert!(matches!(err, ServiceError::Upstream(_)));
    }

    #[test]
    fn test_no_audio_data_preserves_parts() {
        let err: ServiceError = UpstreamError::NoAudioData { parts: 3 }.into();
        match err {
            ServiceError::NoAudioData { parts } => assert_eq!(parts, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
