//! Meta Handlers - 状态/目录/健康检查

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{SUPPORTED_LANGUAGES, SUPPORTED_VOICES};
use crate::infrastructure::http::dto::{ApiStatusResponse, HealthResponse, LanguagesResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

/// GET /status - 检查服务配置状态
///
/// 只报告配置就绪情况，不实际调用上游
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiStatusResponse> {
    if state.engine.is_configured() {
        Json(ApiStatusResponse {
            status: "ready".to_string(),
            message: "Service is ready".to_string(),
            model: Some(state.engine.model_name().to_string()),
        })
    } else {
        Json(ApiStatusResponse {
            status: "error".to_string(),
            message: "Gemini API key not configured".to_string(),
            model: None,
        })
    }
}

/// GET /voices - 获取支持的声音列表
pub async fn get_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        success: true,
        voices: SUPPORTED_VOICES.iter().map(|v| v.to_string()).collect(),
    })
}

/// GET /languages - 获取支持的语言列表
pub async fn get_languages() -> Json<LanguagesResponse> {
    let languages: BTreeMap<String, String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|code| (code.to_string(), code.to_string()))
        .collect();

    Json(LanguagesResponse {
        success: true,
        languages,
    })
}

/// GET /health - 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "parley",
        version: env!("CARGO_PKG_VERSION"),
    })
}
