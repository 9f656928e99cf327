use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;

pub const PNG_MIME: &str = "image/png";

/// Image produced by a successful generation call.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
}

impl GenerationResult {
    pub fn new(image_bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            image_bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.image_bytes)
    }

    pub fn len(&self) -> usize {
        self.image_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_bytes.is_empty()
    }
}

impl fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationResult")
            .field("bytes", &self.image_bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}
