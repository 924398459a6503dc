//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod generation;

pub use artifact_store::{derive_filename, ArtifactStorePort, StoreError};
pub use generation::{GenerationPort, TextParams, UpstreamError};
