use super::transport::ProviderTransport;
use crate::{
    error::Result,
    interpreter::ResponseInterpreter,
    logger,
    models::{GenerationRequest, GenerationResult, PredictRequest, ProviderResponse},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextToImageGenerator {
    transport: Arc<dyn ProviderTransport>,
    model: String,
}

impl TextToImageGenerator {
    pub fn new(transport: Arc<dyn ProviderTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks for exactly one PNG in the requested aspect ratio. Single attempt.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let _timer = logger::timer("text-to-image");
        let payload = PredictRequest::from(request);

        log::info!(
            "Generating image with model: {} (aspect ratio {})",
            self.model,
            request.aspect_ratio()
        );

        let raw = self
            .transport
            .predict_images(&self.model, &payload)
            .await
            .map_err(ResponseInterpreter::transport_failure)?;

        let body = ResponseInterpreter::parse_generate(raw)?;
        let result = ResponseInterpreter::interpret(&ProviderResponse::Generate(body))?;
        log::info!("Generated image: {} bytes", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TransportError};
    use crate::models::AspectRatio;
    use crate::test_support::CannedTransport;
    use serde_json::json;

    fn generator(transport: Arc<CannedTransport>) -> TextToImageGenerator {
        TextToImageGenerator::new(transport, "imagen-4.0-generate-001")
    }

    #[tokio::test]
    async fn returns_png_bytes_from_first_image() {
        let transport = Arc::new(CannedTransport::answering(json!({
            "generatedImages": [{ "image": { "imageBytes": "AAAA" } }]
        })));
        let request = GenerationRequest::new("a wizard, ghibli style", AspectRatio::Portrait).unwrap();

        let result = generator(transport.clone()).generate(&request).await.unwrap();
        assert_eq!(result.to_base64(), "AAAA");
        assert_eq!(result.mime_type, "image/png");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "imagen-4.0-generate-001");
        assert_eq!(calls[0].1["parameters"]["aspectRatio"], json!("3:4"));
        assert_eq!(calls[0].1["parameters"]["sampleCount"], json!(1));
    }

    #[tokio::test]
    async fn empty_list_is_malformed() {
        let transport = Arc::new(CannedTransport::answering(json!({ "generatedImages": [] })));
        let request = GenerationRequest::new("a wizard", AspectRatio::Square).unwrap();

        let err = generator(transport).generate(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn network_errors_are_transport_failures_without_retry() {
        let transport = Arc::new(CannedTransport::failing(TransportError::Timeout));
        let request = GenerationRequest::new("a wizard", AspectRatio::Tall).unwrap();

        let err = generator(transport.clone()).generate(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(err.to_string().contains("network connection"));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_success_body_is_a_transport_failure() {
        let transport = Arc::new(CannedTransport::failing(TransportError::InvalidBody(
            "expected value at line 1 column 1".into(),
        )));
        let request = GenerationRequest::new("a wizard", AspectRatio::Square).unwrap();

        let err = generator(transport).generate(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }
}
