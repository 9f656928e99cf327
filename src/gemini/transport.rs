use crate::{
    config::GeminiConfig,
    error::{ConfigError, TransportError},
    models::{GenerateContentRequest, PredictRequest},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 512;
const API_KEY_HEADER: &str = "x-goog-api-key";

/// One outbound call to the provider per method invocation, no retries.
///
/// Implementations hand back whatever JSON the provider answered with; deciding
/// what that JSON means is left to the interpreter.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, TransportError>;

    async fn predict_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<Value, TransportError>;
}

#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    api_base: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &GeminiConfig) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?.to_string();
        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post<T: Serialize + Sync>(&self, url: &str, payload: &T) -> Result<Value, TransportError> {
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    log::warn!("Provider answered {} with a JSON body", status.as_u16());
                }
                Ok(value)
            }
            Err(e) if status.is_success() => Err(TransportError::InvalidBody(e.to_string())),
            Err(_) => Err(TransportError::Status {
                code: status.as_u16(),
                body: truncate_text(&body, MAX_ERROR_BODY_CHARS),
            }),
        }
    }
}

#[async_trait]
impl ProviderTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(model, "generateContent");
        self.post(&url, request).await
    }

    async fn predict_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(model, "predict");
        self.post(&url, request).await
    }
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}
