//! Gemini Wire Payloads - generateContent 请求/响应模型
//!
//! REST API 的请求构造与响应解析。上游音频响应的形态并不稳定：
//! 音频数据可能出现在顶层直接字段，也可能嵌在 candidate 的 content parts
//! 中，且字段名有多个已知变体。这里将其建模为固定的类型结构，
//! 由 `extract_audio` 按既定顺序探测

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::TextParams;
use crate::domain::SpeakerConfig;

// ============================================================================
// 请求模型
// ============================================================================

/// generateContent 请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: &'static str,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfigPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_config: Option<VoiceConfigPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_speaker_voice_config: Option<MultiSpeakerVoiceConfigPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfigPayload {
    pub prebuilt_voice_config: PrebuiltVoiceConfigPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfigPayload {
    pub voice_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpeakerVoiceConfigPayload {
    pub speaker_voice_configs: Vec<SpeakerVoiceConfigPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerVoiceConfigPayload {
    pub speaker: String,
    pub voice_config: VoiceConfigPayload,
}

fn voice_config(voice_name: &str) -> VoiceConfigPayload {
    VoiceConfigPayload {
        prebuilt_voice_config: PrebuiltVoiceConfigPayload {
            voice_name: voice_name.to_string(),
        },
    }
}

fn user_contents(text: &str) -> Vec<RequestContent> {
    vec![RequestContent {
        role: "user",
        parts: vec![RequestPart {
            text: text.to_string(),
        }],
    }]
}

impl GenerateContentRequest {
    /// 文本生成请求
    pub fn text(prompt: &str, params: &TextParams) -> Self {
        Self {
            contents: user_contents(prompt),
            generation_config: Some(GenerationConfig {
                temperature: Some(params.temperature),
                top_p: Some(params.top_p),
                max_output_tokens: params.max_tokens,
                ..Default::default()
            }),
        }
    }

    /// 单声音语音合成请求
    pub fn speech(text: &str, voice_name: &str) -> Self {
        Self {
            contents: user_contents(text),
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO"]),
                speech_config: Some(SpeechConfigPayload {
                    voice_config: Some(voice_config(voice_name)),
                    multi_speaker_voice_config: None,
                }),
                ..Default::default()
            }),
        }
    }

    /// 多说话人语音合成请求，说话人顺序保持不变
    pub fn multi_speech(text: &str, speakers: &[SpeakerConfig]) -> Self {
        let speaker_voice_configs = speakers
            .iter()
            .map(|s| SpeakerVoiceConfigPayload {
                speaker: s.speaker.clone(),
                voice_config: voice_config(&s.voice_name),
            })
            .collect();

        Self {
            contents: user_contents(text),
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO"]),
                speech_config: Some(SpeechConfigPayload {
                    voice_config: None,
                    multi_speaker_voice_config: Some(MultiSpeakerVoiceConfigPayload {
                        speaker_voice_configs,
                    }),
                }),
                ..Default::default()
            }),
        }
    }
}

// ============================================================================
// 响应模型
// ============================================================================

/// generateContent 响应体
///
/// 所有字段均可缺失；提取逻辑决定最终是否有可用数据
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// 顶层直接音频字段（部分 SDK 形态）
    #[serde(default)]
    pub audio: Option<DirectAudio>,

    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct DirectAudio {
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// Content part
///
/// 音频数据的字段名在不同上游版本间有变体，全部列出按序探测
#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default, rename = "inline_data")]
    pub inline_data: Option<PartPayload>,

    #[serde(default, rename = "inlineData")]
    pub inline_data_camel: Option<PartPayload>,

    #[serde(default)]
    pub data: Option<PartPayload>,

    #[serde(default, rename = "audio_data")]
    pub audio_data: Option<PartPayload>,

    #[serde(default, rename = "audioData")]
    pub audio_data_camel: Option<PartPayload>,
}

impl ResponsePart {
    /// 按探测顺序列出所有候选音频字段
    fn payload_fields(&self) -> [(&'static str, Option<&PartPayload>); 5] {
        [
            ("inline_data", self.inline_data.as_ref()),
            ("inlineData", self.inline_data_camel.as_ref()),
            ("data", self.data.as_ref()),
            ("audio_data", self.audio_data.as_ref()),
            ("audioData", self.audio_data_camel.as_ref()),
        ]
    }
}

/// 候选音频字段的取值：带 data 属性的对象，或直接的 base64 字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PartPayload {
    Blob(InlineBlob),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct InlineBlob {
    #[serde(default)]
    pub data: Option<String>,
}

impl PartPayload {
    /// 解码为字节。字段存在但无数据时返回 Ok(None)
    fn decode(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        let encoded = match self {
            PartPayload::Blob(blob) => match &blob.data {
                Some(data) => data,
                None => return Ok(None),
            },
            PartPayload::Text(text) => text,
        };
        BASE64.decode(encoded).map(Some)
    }
}

// ============================================================================
// 提取
// ============================================================================

/// 响应提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Gemini API returned no candidates")]
    NoCandidates,

    #[error("Response content has no parts")]
    EmptyContent,

    #[error("No audio data found in response ({parts} content parts)")]
    NoAudioData { parts: usize },

    #[error("Unable to extract text content from response")]
    NoText,
}

/// 从响应中提取音频字节
///
/// 探测顺序固定：顶层直接音频字段优先；否则取第一个 candidate 的
/// content parts，逐个 part 按字段变体顺序探测，首个成功解码者胜出，
/// 不做跨 part 聚合。单个字段解码失败记录日志后继续扫描
pub fn extract_audio(response: &GenerateContentResponse) -> Result<Vec<u8>, ExtractError> {
    // 1. 顶层直接音频字段
    if let Some(audio) = &response.audio {
        if let Some(data) = &audio.data {
            match BASE64.decode(data) {
                Ok(bytes) => {
                    tracing::debug!(size = bytes.len(), "Extracted audio from direct field");
                    return Ok(bytes);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode direct audio field, continuing");
                }
            }
        }
    }

    // 2. candidates 结构
    let candidates = response.candidates.as_deref().unwrap_or(&[]);
    let candidate = candidates.first().ok_or(ExtractError::NoCandidates)?;
    let content = candidate.content.as_ref().ok_or(ExtractError::EmptyContent)?;
    if content.parts.is_empty() {
        return Err(ExtractError::EmptyContent);
    }

    for part in &content.parts {
        for (field, payload) in part.payload_fields() {
            let Some(payload) = payload else { continue };
            match payload.decode() {
                Ok(Some(bytes)) => {
                    tracing::debug!(field, size = bytes.len(), "Extracted audio from part field");
                    return Ok(bytes);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(field, error = %e, "Failed to decode audio payload, continuing");
                }
            }
        }
    }

    Err(ExtractError::NoAudioData {
        parts: content.parts.len(),
    })
}

/// 从响应中提取生成的文本（第一个 candidate 的第一个 part）
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, ExtractError> {
    response
        .candidates
        .as_deref()
        .unwrap_or(&[])
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .ok_or(ExtractError::NoText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn b64(data: &[u8]) -> String {
        BASE64.encode(data)
    }

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_direct_audio_field_wins() {
        let response = parse(json!({
            "audio": { "data": b64(b"direct") },
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": b64(b"nested") } }] }
            }]
        }));

        assert_eq!(extract_audio(&response).unwrap(), b"direct");
    }

    #[test]
    fn test_extracts_from_inline_data_object() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": b64(b"pcm bytes") } }] }
            }]
        }));

        assert_eq!(extract_audio(&response).unwrap(), b"pcm bytes");
    }

    #[test]
    fn test_falls_back_to_third_field_variant() {
        // 前两个变体：一个缺数据，一个是无法解码的 base64；第三个有效
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{
                    "inline_data": { "data": null },
                    "inlineData": "%%% not base64 %%%",
                    "data": b64(b"fallback audio")
                }] }
            }]
        }));

        assert_eq!(extract_audio(&response).unwrap(), b"fallback audio");
    }

    #[test]
    fn test_decode_failure_continues_to_next_part() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "audioData": "!!!" },
                    { "audio_data": b64(b"second part") }
                ] }
            }]
        }));

        assert_eq!(extract_audio(&response).unwrap(), b"second part");
    }

    #[test]
    fn test_no_audio_reports_part_count() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "a" }, { "text": "b" }, { "text": "c" }] }
            }]
        }));

        match extract_audio(&response).unwrap_err() {
            ExtractError::NoAudioData { parts } => assert_eq!(parts, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_candidates() {
        let response = parse(json!({}));
        assert!(matches!(
            extract_audio(&response).unwrap_err(),
            ExtractError::NoCandidates
        ));
    }

    #[test]
    fn test_empty_parts() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [] } }]
        }));
        assert!(matches!(
            extract_audio(&response).unwrap_err(),
            ExtractError::EmptyContent
        ));
    }

    #[test]
    fn test_extract_text() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "hello there" }] } }]
        }));
        assert_eq!(extract_text(&response).unwrap(), "hello there");
    }

    #[test]
    fn test_extract_text_missing() {
        let response = parse(json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "AA==" } }] } }]
        }));
        assert!(matches!(
            extract_text(&response).unwrap_err(),
            ExtractError::NoText
        ));
    }

    #[test]
    fn test_speech_request_wire_shape() {
        let request = GenerateContentRequest::speech("hello", "Kore");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            value["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
    }

    #[test]
    fn test_multi_speech_request_preserves_order() {
        let speakers = vec![
            SpeakerConfig {
                speaker: "Joe".to_string(),
                voice_name: "Kore".to_string(),
            },
            SpeakerConfig {
                speaker: "Jane".to_string(),
                voice_name: "Puck".to_string(),
            },
        ];
        let request = GenerateContentRequest::multi_speech("hi", &speakers);
        let value = serde_json::to_value(&request).unwrap();

        let configs = &value["generationConfig"]["speechConfig"]["multiSpeakerVoiceConfig"]
            ["speakerVoiceConfigs"];
        assert_eq!(configs[0]["speaker"], "Joe");
        assert_eq!(configs[1]["speaker"], "Jane");
    }

    #[test]
    fn test_text_request_omits_speech_config() {
        let request = GenerateContentRequest::text("prompt", &TextParams::default());
        let value = serde_json::to_value(&request).unwrap();

        assert!(value["generationConfig"].get("speechConfig").is_none());
        assert!(value["generationConfig"].get("responseModalities").is_none());
    }
}
