use crate::{
    error::TransportError,
    gemini::ProviderTransport,
    models::{GenerateContentRequest, PredictRequest},
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

pub fn should_skip_httpmock() -> bool {
    if can_bind_localhost() {
        return false;
    }
    eprintln!("skipping httpmock test: sandbox forbids binding to localhost");
    true
}

fn can_bind_localhost() -> bool {
    match std::net::TcpListener::bind(("127.0.0.1", 0)) {
        Ok(listener) => {
            drop(listener);
            true
        }
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => false,
        Err(err) => panic!("failed to bind localhost for httpmock tests: {err}"),
    }
}

/// Answers every call with the same canned outcome and records what was sent.
pub struct CannedTransport {
    outcome: Result<Value, TransportError>,
    pub sent: Mutex<Vec<(String, Value)>>,
}

impl CannedTransport {
    pub fn answering(value: Value) -> Self {
        Self {
            outcome: Ok(value),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: TransportError) -> Self {
        Self {
            outcome: Err(err),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, model: &str, payload: Value) -> Result<Value, TransportError> {
        self.sent.lock().unwrap().push((model.to_string(), payload));
        self.outcome.clone()
    }
}

#[async_trait]
impl ProviderTransport for CannedTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, TransportError> {
        self.record(model, serde_json::to_value(request).unwrap())
    }

    async fn predict_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<Value, TransportError> {
        self.record(model, serde_json::to_value(request).unwrap())
    }
}
