//! Artifact Store Port - 音频文件存储
//!
//! 定义内容寻址音频文件存储的抽象接口，具体实现使用文件系统。
//! 文件名即缓存 key：同一逻辑请求总是落在同一路径，写入一次后不再修改

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Artifact Store Port
///
/// 基于内容 hash 文件名的写一次音频存储
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// 文件名对应的存储路径
    fn path_for(&self, filename: &str) -> PathBuf;

    /// 文件是否已存在（缓存命中检查）
    async fn exists(&self, filename: &str) -> bool;

    /// 将原始 PCM 数据封装为 WAV 容器并写入
    ///
    /// 写入失败对当前请求是致命的，调用方不重试
    async fn save_pcm_as_wav(&self, filename: &str, pcm: &[u8]) -> Result<PathBuf, StoreError>;

    /// 读取已存储的文件
    async fn read(&self, filename: &str) -> Result<Vec<u8>, StoreError>;

    /// 保留清理：按创建时间保留最新的 keep_newest 个文件，删除其余
    ///
    /// 单个文件删除失败只记录日志不中断。返回删除的文件数
    async fn trim(&self, keep_newest: usize) -> Result<usize, StoreError>;
}

/// 生成缓存文件名
///
/// 规范串为 `{text}_{voice_descriptor}_{language|auto}`，取 md5 后格式化为
/// `gemini_<hex>.wav`。相同逻辑请求产生相同文件名；声音或语言不同则文件名不同。
/// 多说话人描述串保持调用方顺序，不做排序
pub fn derive_filename(text: &str, voice_descriptor: &str, language: Option<&str>) -> String {
    let content = format!("{}_{}_{}", text, voice_descriptor, language.unwrap_or("auto"));
    let digest = md5::compute(content.as_bytes());
    format!("gemini_{:x}.wav", digest)
}
