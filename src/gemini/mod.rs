pub mod refiner;
pub mod text_to_image;
pub mod transport;

use crate::{
    config::GeminiConfig,
    error::{ConfigError, Result},
    models::{GenerationRequest, RefinementRequest},
};
use std::sync::Arc;

pub use refiner::ImageRefiner;
pub use text_to_image::TextToImageGenerator;
pub use transport::{HttpTransport, ProviderTransport};

/// Both generation capabilities behind one shared transport.
///
/// Holds no mutable state, so a single instance can serve any number of
/// concurrent calls.
#[derive(Clone)]
pub struct StudioClient {
    text_to_image: TextToImageGenerator,
    refiner: ImageRefiner,
}

impl StudioClient {
    pub fn new(config: &GeminiConfig) -> std::result::Result<Self, ConfigError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn ProviderTransport>, config: &GeminiConfig) -> Self {
        Self {
            text_to_image: TextToImageGenerator::new(transport.clone(), config.generate_model.clone()),
            refiner: ImageRefiner::new(transport, config.edit_model.clone()),
        }
    }

    pub fn text_to_image(&self) -> &TextToImageGenerator {
        &self.text_to_image
    }

    pub fn refiner(&self) -> &ImageRefiner {
        &self.refiner
    }

    /// New image from a description, returned as base64.
    pub async fn generate_from_text(&self, request: &GenerationRequest) -> Result<String> {
        let result = self.text_to_image.generate(request).await?;
        Ok(result.to_base64())
    }

    /// Modified version of an existing image, returned as base64.
    pub async fn refine_image(&self, request: &RefinementRequest) -> Result<String> {
        let result = self.refiner.refine(request).await?;
        Ok(result.to_base64())
    }
}
