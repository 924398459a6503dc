//! Speech Synthesis Handlers
//!
//! 成功返回后通过 AppState::spawn_sweep 在后台触发保留清理，
//! 清理与当前请求完全解耦

use axum::{extract::State, Json};
use serde_json::json;
use std::sync::Arc;

use crate::application::TextParams;
use crate::domain::SpeakerConfig;
use crate::infrastructure::http::dto::{
    CombinedRequest, CombinedResponse, MultiSpeakerTtsRequest, TextToSpeechRequest,
    TextToSpeechResponse,
};
use crate::infrastructure::http::state::AppState;

/// POST /text_to_speech - 文本转语音
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextToSpeechRequest>,
) -> Json<TextToSpeechResponse> {
    if let Err(e) = request.validate() {
        return Json(TextToSpeechResponse::err(&e));
    }

    let language = request
        .language
        .clone()
        .or_else(|| state.default_language.clone());

    match state
        .speech_service
        .speak(&request.text, &request.voice_name, language.as_deref())
        .await
    {
        Ok(filename) => {
            state.spawn_sweep();

            let metadata = json!({
                "textLength": request.text.chars().count(),
                "voiceName": request.voice_name,
                "language": language.as_deref().unwrap_or("auto"),
                "ttsEngine": "gemini",
            });
            Json(TextToSpeechResponse::ok(filename, metadata))
        }
        Err(e) => {
            tracing::error!(error = %e, "Speech synthesis failed");
            Json(TextToSpeechResponse::err(&e))
        }
    }
}

/// POST /generate_and_speak - 生成文本并转换为语音
pub async fn generate_and_speak(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CombinedRequest>,
) -> Json<CombinedResponse> {
    if let Err(e) = request.validate() {
        return Json(CombinedResponse::err(&e));
    }

    let params = TextParams {
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        ..Default::default()
    };

    let text = match state.text_service.generate(&request.prompt, &params).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Text generation failed");
            return Json(CombinedResponse::err(&e));
        }
    };

    let language = request
        .language
        .clone()
        .or_else(|| state.default_language.clone());

    match state
        .speech_service
        .speak(&text, &request.voice_name, language.as_deref())
        .await
    {
        Ok(filename) => {
            state.spawn_sweep();

            let metadata = json!({
                "promptLength": request.prompt.chars().count(),
                "responseLength": text.chars().count(),
                "temperature": request.temperature,
                "voiceName": request.voice_name,
                "language": language.as_deref().unwrap_or("auto"),
                "ttsEngine": "gemini",
            });
            Json(CombinedResponse::ok(text, filename, metadata))
        }
        Err(e) => {
            tracing::error!(error = %e, "Speech synthesis failed");
            Json(CombinedResponse::err(&e))
        }
    }
}

/// POST /multi_speaker_tts - 多说话人文本转语音
pub async fn multi_speaker_tts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MultiSpeakerTtsRequest>,
) -> Json<TextToSpeechResponse> {
    if let Err(e) = request.validate() {
        return Json(TextToSpeechResponse::err(&e));
    }

    let speakers: Vec<SpeakerConfig> = request
        .speaker_configs
        .into_iter()
        .map(Into::into)
        .collect();
    let speaker_names: Vec<&str> = speakers.iter().map(|s| s.speaker.as_str()).collect();

    match state
        .speech_service
        .speak_multi(&request.text, &speakers)
        .await
    {
        Ok(filename) => {
            state.spawn_sweep();

            let metadata = json!({
                "textLength": request.text.chars().count(),
                "speakerCount": speakers.len(),
                "speakers": speaker_names,
                "ttsEngine": "gemini",
            });
            Json(TextToSpeechResponse::ok(filename, metadata))
        }
        Err(e) => {
            tracing::error!(error = %e, "Multi-speaker synthesis failed");
            Json(TextToSpeechResponse::err(&e))
        }
    }
}
