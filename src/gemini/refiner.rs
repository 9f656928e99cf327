use super::transport::ProviderTransport;
use crate::{
    error::Result,
    interpreter::ResponseInterpreter,
    logger,
    models::{GenerateContentRequest, GenerationResult, ProviderResponse, RefinementRequest},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageRefiner {
    transport: Arc<dyn ProviderTransport>,
    model: String,
}

impl ImageRefiner {
    pub fn new(transport: Arc<dyn ProviderTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the source image and the instruction as two parts and keeps only
    /// the image part of the answer. Single attempt.
    pub async fn refine(&self, request: &RefinementRequest) -> Result<GenerationResult> {
        let _timer = logger::timer("image-refine");
        let payload = GenerateContentRequest::image_edit(
            request.mime_type(),
            request.source_image_base64(),
            request.instruction(),
        );

        log::info!(
            "Refining {} image ({} bytes) with model: {}",
            request.mime_type(),
            request.source_image().len(),
            self.model
        );

        let raw = self
            .transport
            .generate_content(&self.model, &payload)
            .await
            .map_err(ResponseInterpreter::transport_failure)?;

        let body = ResponseInterpreter::parse_edit(raw)?;
        let result = ResponseInterpreter::interpret(&ProviderResponse::Edit {
            body,
            source_mime_type: request.mime_type().to_string(),
        })?;
        log::info!("Refined image: {} bytes", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, GenerationError, TransportError};
    use crate::test_support::CannedTransport;
    use serde_json::json;

    fn refiner(transport: Arc<CannedTransport>) -> ImageRefiner {
        ImageRefiner::new(transport, "gemini-2.5-flash-image-preview")
    }

    fn request() -> RefinementRequest {
        RefinementRequest::new(vec![1, 2, 3], "image/jpeg", "give them a red scarf").unwrap()
    }

    #[tokio::test]
    async fn sends_image_then_instruction_and_returns_image_part() {
        let transport = Arc::new(CannedTransport::answering(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Added a scarf." },
                { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
            ]}}]
        })));

        let result = refiner(transport.clone()).refine(&request()).await.unwrap();
        assert_eq!(result.to_base64(), "AAAA");
        assert_eq!(result.mime_type, "image/jpeg");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let parts = &calls[0].1["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], json!("image/jpeg"));
        assert_eq!(parts[0]["inlineData"]["data"], json!("AQID"));
        assert_eq!(parts[1]["text"], json!("give them a red scarf"));
        assert_eq!(
            calls[0].1["generationConfig"]["responseModalities"],
            json!(["IMAGE", "TEXT"])
        );
    }

    #[tokio::test]
    async fn blocked_prompt_is_safety_rejected() {
        let transport = Arc::new(CannedTransport::answering(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })));
        let err = refiner(transport).refine(&request()).await.unwrap_err();
        assert_eq!(err, GenerationError::SafetyRejected("SAFETY".into()));
    }

    #[tokio::test]
    async fn network_errors_are_transport_failures() {
        let transport = Arc::new(CannedTransport::failing(TransportError::Connect(
            "connection refused".into(),
        )));
        let err = refiner(transport).refine(&request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
        assert!(err.to_string().contains("connection refused"));
    }
}
