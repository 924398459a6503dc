//! Text Generation Handlers

use axum::{extract::State, Json};
use serde_json::json;
use std::sync::Arc;

use crate::application::TextParams;
use crate::domain::ChatMessage;
use crate::infrastructure::http::dto::{
    TextGenerationRequest, TextGenerationResponse, TextGenerationWithHistoryRequest,
};
use crate::infrastructure::http::state::AppState;

/// POST /generate - 生成文本
pub async fn generate_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextGenerationRequest>,
) -> Json<TextGenerationResponse> {
    if let Err(e) = request.validate() {
        return Json(TextGenerationResponse::err(&e));
    }

    let params = TextParams {
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        top_p: request.top_p,
    };

    match state.text_service.generate(&request.prompt, &params).await {
        Ok(text) => {
            let metadata = json!({
                "promptLength": request.prompt.chars().count(),
                "responseLength": text.chars().count(),
                "temperature": request.temperature,
                "topP": request.top_p,
            });
            Json(TextGenerationResponse::ok(text, metadata))
        }
        Err(e) => {
            tracing::error!(error = %e, "Text generation failed");
            Json(TextGenerationResponse::err(&e))
        }
    }
}

/// POST /generate_with_history - 基于对话历史生成文本
pub async fn generate_with_history(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextGenerationWithHistoryRequest>,
) -> Json<TextGenerationResponse> {
    if let Err(e) = request.validate() {
        return Json(TextGenerationResponse::err(&e));
    }

    let history_len = request.messages.len();
    let messages: Vec<ChatMessage> = request.messages.into_iter().map(Into::into).collect();
    let params = TextParams {
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        ..Default::default()
    };

    match state
        .text_service
        .generate_with_history(&messages, &params)
        .await
    {
        Ok(text) => {
            let metadata = json!({
                "historyLength": history_len,
                "responseLength": text.chars().count(),
                "temperature": request.temperature,
            });
            Json(TextGenerationResponse::ok(text, metadata))
        }
        Err(e) => {
            tracing::error!(error = %e, "History-based text generation failed");
            Json(TextGenerationResponse::err(&e))
        }
    }
}
