//! Wire types for the Imagen `predict` endpoint (text in, image out).

use super::gemini::ApiErrorBody;
use super::request::GenerationRequest;
use super::result::PNG_MIME;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

impl From<&GenerationRequest> for PredictRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: request.prompt().to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: request.aspect_ratio().as_str().to_string(),
                output_options: OutputOptions {
                    mime_type: PNG_MIME.to_string(),
                },
            },
        }
    }
}

/// Response of the image generation capability.
///
/// The SDK envelope (`generatedImages[].image.imageBytes`) and the raw REST
/// envelope (`predictions[].bytesBase64Encoded`) are both accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesResponse {
    #[serde(default, alias = "generated_images", skip_serializing_if = "Option::is_none")]
    pub generated_images: Option<Vec<GeneratedImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
    #[serde(default, alias = "rai_filtered_reason", skip_serializing_if = "Option::is_none")]
    pub rai_filtered_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default, alias = "image_bytes", skip_serializing_if = "Option::is_none")]
    pub image_bytes: Option<String>,
    #[serde(default, alias = "mime_type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(
        default,
        alias = "bytes_base64_encoded",
        skip_serializing_if = "Option::is_none"
    )]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default, alias = "mime_type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, alias = "rai_filtered_reason", skip_serializing_if = "Option::is_none")]
    pub rai_filtered_reason: Option<String>,
}

impl GenerateImagesResponse {
    /// Base64 bytes of the first entry, if that entry carries any.
    pub fn first_image_bytes(&self) -> Option<&str> {
        if let Some(images) = self.generated_images.as_ref().filter(|list| !list.is_empty()) {
            return images
                .first()
                .and_then(|entry| entry.image.as_ref())
                .and_then(|image| image.image_bytes.as_deref())
                .filter(|bytes| !bytes.trim().is_empty());
        }
        self.predictions
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.bytes_base64_encoded.as_deref())
            .filter(|bytes| !bytes.trim().is_empty())
    }

    /// Provider-supplied note on why the first entry came back empty.
    pub fn first_filter_note(&self) -> Option<&str> {
        let generated = self
            .generated_images
            .as_ref()
            .and_then(|images| images.first())
            .and_then(|entry| entry.rai_filtered_reason.as_deref());
        let predicted = self
            .predictions
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.rai_filtered_reason.as_deref());
        generated.or(predicted).filter(|note| !note.trim().is_empty())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|error| error.message.as_deref())
            .filter(|message| !message.trim().is_empty())
    }
}
