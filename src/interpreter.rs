//! Classifies provider answers into an image or a user-facing error.
//!
//! Both capabilities share one error taxonomy but have their own envelope, so
//! there is one entry point per shape. Every function here is pure: the same
//! response always yields the same outcome.

use crate::{
    error::{GenerationError, Result, TransportError},
    models::{EditResponse, GenerateImagesResponse, GenerationResult, ProviderResponse, PNG_MIME},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use serde_json::Value;

const UNEXPECTED_STRUCTURE: &str = "the API returned an unexpected response structure";
const EMPTY_RESPONSE: &str = "the API did not return a valid image, the response was empty";
const NO_VALID_IMAGE: &str = "the API did not return a valid image";

pub struct ResponseInterpreter;

impl ResponseInterpreter {
    pub fn interpret(response: &ProviderResponse) -> Result<GenerationResult> {
        match response {
            ProviderResponse::Edit {
                body,
                source_mime_type,
            } => Self::interpret_edit(body, source_mime_type),
            ProviderResponse::Generate(body) => Self::interpret_generate(body),
        }
    }

    /// Reads a raw `generateContent` answer.
    pub fn parse_edit(raw: Value) -> Result<EditResponse> {
        parse_shape(raw, "generateContent")
    }

    /// Reads a raw image generation answer.
    pub fn parse_generate(raw: Value) -> Result<GenerateImagesResponse> {
        parse_shape(raw, "generateImages")
    }

    /// Image+text envelope. The image part wins over every other field.
    pub fn interpret_edit(response: &EditResponse, source_mime_type: &str) -> Result<GenerationResult> {
        if let Some(inline) = response.first_inline_data() {
            let bytes = decode_image(&inline.data)?;
            return Ok(GenerationResult::new(bytes, source_mime_type));
        }

        if response.candidates.is_none() && response.prompt_feedback.is_none() {
            log_raw("Received a non-standard or error response from the provider", response);
            let detail = response
                .error_message()
                .map(str::to_string)
                .or_else(|| response.text.clone().filter(|t| !t.trim().is_empty()))
                .unwrap_or_else(|| UNEXPECTED_STRUCTURE.to_string());
            return Err(GenerationError::MalformedResponse(format!("AI API error: {}", detail)));
        }

        if let Some(reason) = response.block_reason() {
            log::warn!("Provider blocked the request: {}", reason);
            return Err(GenerationError::SafetyRejected(reason.to_string()));
        }

        if let Some(text) = response.text() {
            log::warn!("Provider returned text instead of an image: {}", text);
            return Err(GenerationError::NoImageReturned(text));
        }

        log_raw("Unexpected provider response", response);
        Err(GenerationError::MalformedResponse(EMPTY_RESPONSE.to_string()))
    }

    /// Image-list envelope. An empty list is not distinguishable from a
    /// safety rejection here, both end up as a malformed response.
    pub fn interpret_generate(response: &GenerateImagesResponse) -> Result<GenerationResult> {
        if let Some(encoded) = response.first_image_bytes() {
            let bytes = decode_image(encoded)?;
            return Ok(GenerationResult::new(bytes, PNG_MIME));
        }

        log_raw("Unexpected response from generateImages", response);
        let detail = match (response.error_message(), response.first_filter_note()) {
            (Some(message), _) => format!("{} ({})", NO_VALID_IMAGE, message),
            (None, Some(note)) => format!("{} ({})", NO_VALID_IMAGE, note),
            (None, None) => format!("{}, the response was empty", NO_VALID_IMAGE),
        };
        Err(GenerationError::MalformedResponse(detail))
    }

    pub fn transport_failure(err: TransportError) -> GenerationError {
        log::error!("Provider call failed: {}", err);
        GenerationError::TransportFailure(err.to_string())
    }
}

fn parse_shape<T: serde::de::DeserializeOwned>(raw: Value, shape: &str) -> Result<T> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        log::error!(
            "Could not read {} response ({}). Full response: {}",
            shape,
            e,
            serde_json::to_string_pretty(&raw).unwrap_or_default()
        );
        GenerationError::MalformedResponse(format!("{} response could not be read: {}", shape, e))
    })
}

fn decode_image(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded.trim().as_bytes())
        .map_err(|e| GenerationError::MalformedResponse(format!("image data is not valid base64: {}", e)))
}

fn log_raw<T: Serialize>(context: &str, response: &T) {
    log::error!(
        "{}. Full response: {}",
        context,
        serde_json::to_string_pretty(response).unwrap_or_default()
    );
}
