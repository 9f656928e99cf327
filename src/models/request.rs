use crate::error::RequestError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output shapes offered for a freshly generated ID photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] = [AspectRatio::Square, AspectRatio::Portrait, AspectRatio::Tall];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Tall => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = RequestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == raw)
            .ok_or_else(|| RequestError::UnsupportedAspectRatio(raw.to_string()))
    }
}

/// Text-to-image request. The prompt is guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Result<Self, RequestError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            aspect_ratio,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }
}

/// Image+instruction request used to modify an existing picture.
#[derive(Clone, PartialEq, Eq)]
pub struct RefinementRequest {
    source_image: Vec<u8>,
    mime_type: String,
    instruction: String,
}

impl RefinementRequest {
    pub fn new(
        source_image: Vec<u8>,
        mime_type: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let mime_type = mime_type.into().trim().to_string();
        let instruction = instruction.into();
        if source_image.is_empty() {
            return Err(RequestError::EmptyImage);
        }
        if mime_type.is_empty() {
            return Err(RequestError::EmptyMimeType);
        }
        if instruction.trim().is_empty() {
            return Err(RequestError::EmptyInstruction);
        }
        Ok(Self {
            source_image,
            mime_type,
            instruction,
        })
    }

    /// Decodes the base64 payload the HTTP layer receives.
    pub fn from_base64(
        source_image: &str,
        mime_type: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let bytes = BASE64
            .decode(strip_data_url(source_image).trim().as_bytes())
            .map_err(|e| RequestError::InvalidImageData(e.to_string()))?;
        Self::new(bytes, mime_type, instruction)
    }

    pub fn source_image(&self) -> &[u8] {
        &self.source_image
    }

    pub fn source_image_base64(&self) -> String {
        BASE64.encode(&self.source_image)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

impl fmt::Debug for RefinementRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefinementRequest")
            .field("source_image_len", &self.source_image.len())
            .field("mime_type", &self.mime_type)
            .field("instruction", &self.instruction)
            .finish()
    }
}

// Browsers hand over `data:image/png;base64,...` when reading a file.
fn strip_data_url(raw: &str) -> &str {
    match raw.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => raw,
    }
}
