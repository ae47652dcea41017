use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::llm::media::GeneratedImage;
use crate::prompt::{EnhancementRequest, GenerationParameters};
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

const IMAGE_EDIT_SYSTEM_INSTRUCTION: &str =
    "Edit the image based on the prompt. CRITICAL: respond with an image, NOT TEXT.";

#[derive(Debug, Error)]
pub enum ImageGenerationError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("image generation request failed: {0}")]
    Transport(String),
    #[error("image generation failed with status {status}: {message}")]
    Service { status: u16, message: String },
    #[error("image generation returned an unreadable response: {0}")]
    InvalidResponse(String),
    #[error("no image was produced by the model ({model})")]
    NoImage { model: String },
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    #[allow(dead_code)]
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

fn build_safety_settings(profile: &str) -> Vec<Value> {
    let threshold = match profile {
        "standard" => "BLOCK_MEDIUM_AND_ABOVE",
        "permissive" => "OFF",
        _ => {
            warn!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}', using permissive defaults.",
                profile
            );
            "OFF"
        }
    };

    vec![
        json!({ "category": "HARM_CATEGORY_HARASSMENT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": threshold }),
        json!({ "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": threshold }),
    ]
}

fn build_image_config(parameters: &GenerationParameters) -> Value {
    let mut map = Map::new();
    map.insert("aspectRatio".to_string(), json!(parameters.aspect_ratio));
    if let Some(tier) = parameters.resolution_tier {
        map.insert("imageSize".to_string(), json!(tier));
    }
    Value::Object(map)
}

fn build_payload(request: &EnhancementRequest, safety_profile: &str) -> Value {
    let parts = vec![
        json!({
            "inlineData": {
                "mimeType": request.photo.mime_type,
                "data": request.photo.to_base64()
            }
        }),
        json!({ "text": request.prompt.instruction_text }),
    ];

    json!({
        "systemInstruction": { "parts": [{ "text": IMAGE_EDIT_SYSTEM_INSTRUCTION }] },
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"],
            "imageConfig": build_image_config(&request.prompt.parameters),
        },
        "safetySettings": build_safety_settings(safety_profile),
    })
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_parts(parts: &[Value]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| {
            if let Some(text) = part.get("text").and_then(|value| value.as_str()) {
                json!({ "text": truncate_for_log(text, 200), "textLen": text.len() })
            } else if let Some(inline_data) = part.get("inlineData") {
                let mime_type = inline_data
                    .get("mimeType")
                    .and_then(|value| value.as_str())
                    .unwrap_or("unknown");
                let data_len = inline_data
                    .get("data")
                    .and_then(|value| value.as_str())
                    .map(|value| value.len())
                    .unwrap_or(0);
                json!({ "inlineData": { "mimeType": mime_type, "dataLen": data_len } })
            } else {
                json!({ "unknownPart": true })
            }
        })
        .collect()
}

fn summarize_payload(payload: &Value) -> Value {
    let mut summary = Map::new();

    if let Some(contents) = payload.get("contents").and_then(|value| value.as_array()) {
        let summarized: Vec<Value> = contents
            .iter()
            .map(|content| {
                let parts = content
                    .get("parts")
                    .and_then(|value| value.as_array())
                    .map(|parts| summarize_parts(parts))
                    .unwrap_or_default();
                json!({ "parts": parts })
            })
            .collect();
        summary.insert("contents".to_string(), Value::Array(summarized));
    }

    if let Some(config) = payload.get("generationConfig") {
        summary.insert("generationConfig".to_string(), config.clone());
    }

    if let Some(safety) = payload
        .get("safetySettings")
        .and_then(|value| value.as_array())
    {
        summary.insert("safetySettingsCount".to_string(), json!(safety.len()));
    }

    Value::Object(summary)
}

fn summarize_response(response: &GeminiResponse) -> Value {
    let mut text_parts = 0usize;
    let mut image_parts = 0usize;
    let mut other_parts = 0usize;
    let mut text_preview = None;

    let candidates = response.candidates.as_deref().unwrap_or(&[]);
    for part in candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .filter_map(|content| content.parts.as_ref())
        .flatten()
    {
        match part {
            GeminiPart::Text { text } => {
                text_parts += 1;
                if text_preview.is_none() && !text.trim().is_empty() {
                    text_preview = Some(truncate_for_log(text, 200));
                }
            }
            GeminiPart::InlineData { inline_data } => {
                if inline_data.mime_type.starts_with("image/") {
                    image_parts += 1;
                }
            }
            GeminiPart::Other(_) => other_parts += 1,
        }
    }

    json!({
        "candidates": candidates.len(),
        "textParts": text_parts,
        "imageParts": image_parts,
        "otherParts": other_parts,
        "textPreview": text_preview
    })
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

/// First decodable image part of the response, if any.
fn extract_first_image(response: GeminiResponse) -> Option<GeneratedImage> {
    response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .filter_map(|content| content.parts)
        .flatten()
        .find_map(|part| match part {
            GeminiPart::InlineData { inline_data }
                if inline_data.mime_type.starts_with("image/") =>
            {
                match general_purpose::STANDARD.decode(inline_data.data.as_bytes()) {
                    Ok(bytes) if !bytes.is_empty() => Some(GeneratedImage {
                        bytes,
                        mime_type: inline_data.mime_type,
                    }),
                    Ok(_) => None,
                    Err(err) => {
                        warn!("Discarding undecodable image part: {}", err);
                        None
                    }
                }
            }
            _ => None,
        })
}

fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

async fn call_gemini_api(
    model: &str,
    payload: Value,
) -> Result<GeminiResponse, ImageGenerationError> {
    let url = generate_content_url(&CONFIG.gemini_api_base_url, model);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let payload_summary = summarize_payload(&payload);
        debug!(target: "llm.gemini", model = model, payload = %payload_summary);
    }

    let response = get_http_client()
        .post(&url)
        .header("x-goog-api-key", &CONFIG.gemini_api_key)
        .json(&payload)
        .send()
        .await
        .map_err(|err| {
            warn!(
                "Gemini request failed to send: {} (timeout={}, connect={})",
                err,
                err.is_timeout(),
                err.is_connect()
            );
            ImageGenerationError::Transport(err.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let (message, body_summary) = summarize_error_body(&body);
        warn!("Gemini API error: status={}, body={}", status, body_summary);
        return Err(ImageGenerationError::Service {
            status: status.as_u16(),
            message: message.unwrap_or(body_summary),
        });
    }

    let value = response
        .json::<GeminiResponse>()
        .await
        .map_err(|err| ImageGenerationError::InvalidResponse(err.to_string()))?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        let response_summary = summarize_response(&value);
        debug!(target: "llm.gemini", model = model, response = %response_summary);
    }
    Ok(value)
}

/// Sends the photo and its compiled instructions to the image model once.
pub async fn generate_enhanced_image(
    request: &EnhancementRequest,
) -> Result<GeneratedImage, ImageGenerationError> {
    if CONFIG.gemini_api_key.trim().is_empty() {
        return Err(ImageGenerationError::MissingApiKey);
    }

    let model = request.prompt.parameters.model_id;
    let payload = build_payload(request, &CONFIG.gemini_safety_settings);
    let metadata = json!({
        "photoBytes": request.photo.bytes.len(),
        "promptChars": request.prompt.instruction_text.len(),
        "imageSize": request.prompt.parameters.resolution_tier,
    });

    log_llm_timing("gemini", model, "enhance_image", Some(metadata), || async {
        let response = call_gemini_api(model, payload).await?;
        extract_first_image(response).ok_or_else(|| ImageGenerationError::NoImage {
            model: model.to_string(),
        })
    })
    .await
}
