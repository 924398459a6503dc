//! Gemini Adapter - Gemini REST API 接入
//!
//! GenerationPort 的具体实现：
//! - client: 真实 REST 客户端（含瞬时错误重试）
//! - payload: 请求/响应线格式与音频/文本提取
//! - fake: 测试用固定响应客户端

mod client;
mod fake;
pub mod payload;

pub use client::{GeminiClient, GeminiClientConfig};
pub use fake::FakeGenerationClient;
pub use payload::{extract_audio, extract_text, ExtractError};
