//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /generate              POST  生成文本
//! - /generate_with_history POST  基于对话历史生成文本
//! - /text_to_speech        POST  文本转语音
//! - /generate_and_speak    POST  生成文本并转换为语音
//! - /multi_speaker_tts     POST  多说话人文本转语音
//! - /audio/:filename       GET   获取生成的音频文件
//! - /status                GET   检查服务配置状态
//! - /voices                GET   支持的声音列表
//! - /languages             GET   支持的语言列表
//! - /health                GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_text))
        .route("/generate_with_history", post(handlers::generate_with_history))
        .route("/text_to_speech", post(handlers::text_to_speech))
        .route("/generate_and_speak", post(handlers::generate_and_speak))
        .route("/multi_speaker_tts", post(handlers::multi_speaker_tts))
        .route("/audio/:filename", get(handlers::get_audio))
        .route("/status", get(handlers::get_status))
        .route("/voices", get(handlers::get_voices))
        .route("/languages", get(handlers::get_languages))
        .route("/health", get(handlers::health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::gemini::FakeGenerationClient;
    use crate::infrastructure::storage::FileArtifactStore;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::time::Duration;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    async fn test_app(dir: &std::path::Path) -> Router {
        let engine = Arc::new(FakeGenerationClient::new());
        let store = Arc::new(FileArtifactStore::new(dir).await.unwrap());
        let state = AppState::new(engine, store, Duration::from_secs(30), 100, None);
        create_routes().with_state(Arc::new(state))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_status_ready_with_configured_engine() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let json = body_json(app.oneshot(get_req("/status")).await.unwrap()).await;
        assert_eq!(json["status"], "ready");
        assert_eq!(json["model"], "fake-generation-model");
    }

    #[tokio::test]
    async fn test_voices_and_languages() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let json = body_json(app.clone().oneshot(get_req("/voices")).await.unwrap()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["voices"].as_array().unwrap().len(), 30);

        let json = body_json(app.oneshot(get_req("/languages")).await.unwrap()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["languages"]["en-US"], "en-US");
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json("/generate", r#"{"prompt":"say hello"}"#);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["text"], "generated text");
        assert_eq!(json["metadata"]["promptLength"], 9);
    }

    #[tokio::test]
    async fn test_generate_validation_failure_is_http_200() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json("/generate", r#"{"prompt":""}"#);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("prompt"));
    }

    #[tokio::test]
    async fn test_generate_with_history() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json(
            "/generate_with_history",
            r#"{"messages":[{"role":"user","content":"hi"}]}"#,
        );
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["metadata"]["historyLength"], 1);
    }

    #[tokio::test]
    async fn test_text_to_speech_end_to_end() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json("/text_to_speech", r#"{"text":"hello","voiceName":"Kore"}"#);
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let expected = format!("gemini_{:x}.wav", md5::compute(b"hello_Kore_auto"));
        assert_eq!(json["success"], true);
        assert_eq!(json["filename"], expected.as_str());
        assert_eq!(json["audioUrl"], format!("/audio/{}", expected).as_str());
        assert_eq!(json["metadata"]["ttsEngine"], "gemini");
        assert_eq!(json["metadata"]["language"], "auto");

        // 生成的文件能通过音频路由取回
        let response = app
            .oneshot(get_req(&format!("/audio/{}", expected)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_generate_and_speak() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json(
            "/generate_and_speak",
            r#"{"prompt":"tell me a story","voiceName":"Puck"}"#,
        );
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["text"], "generated text");
        // 语音内容是生成的文本，不是原始 prompt
        let expected = format!("gemini_{:x}.wav", md5::compute(b"generated text_Puck_auto"));
        assert_eq!(json["filename"], expected.as_str());
    }

    #[tokio::test]
    async fn test_multi_speaker_tts() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let request = post_json(
            "/multi_speaker_tts",
            r#"{"text":"hello","speakerConfigs":[{"speaker":"Joe","voiceName":"Kore"},{"speaker":"Jane","voiceName":"Puck"}]}"#,
        );
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["metadata"]["speakerCount"], 2);
        let expected = format!(
            "gemini_{:x}.wav",
            md5::compute(b"hello_Joe_Kore_Jane_Puck_auto")
        );
        assert_eq!(json["filename"], expected.as_str());
    }

    #[tokio::test]
    async fn test_audio_not_found_is_404() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let response = app
            .oneshot(get_req("/audio/gemini_missing.wav"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_audio_rejects_path_traversal() {
        let temp = tempdir().unwrap();
        let app = test_app(temp.path()).await;

        let response = app.oneshot(get_req("/audio/..%2Fsecret.wav")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
