//! Audio File Handler
//!
//! 音频文件路由是唯一使用真实 HTTP 状态码的业务路由：
//! 文件不存在返回 404，非法文件名返回 400

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::infrastructure::http::state::AppState;

/// GET /audio/:filename - 获取生成的音频文件
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    // 拒绝路径穿越
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err((StatusCode::BAD_REQUEST, "Invalid filename".to_string()));
    }

    let path = state.artifact_store.path_for(&filename);

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err((StatusCode::NOT_FOUND, "Audio file not found".to_string()));
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "Failed to open audio file");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let content_length = file.metadata().await.ok().map(|m| m.len());
    let stream = ReaderStream::new(file);

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav");
    if let Some(len) = content_length {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }

    Ok(builder.body(Body::from_stream(stream)).unwrap())
}
