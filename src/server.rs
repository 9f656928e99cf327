use crate::{
    config::ServerConfig,
    error::GenerationError,
    gemini::StudioClient,
    models::{AspectRatio, GenerationRequest, RefinementRequest},
};
use actix_web::{
    http::StatusCode, middleware::Logger, web, App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCartoonBody {
    pub prompt: Option<String>,
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdPhotoBody {
    pub base64_image_data: Option<String>,
    pub mime_type: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl ImageReply {
    fn image(base64_image: String) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            base64_image: Some(base64_image),
            error: None,
            error_kind: None,
        })
    }

    fn bad_request(message: impl Into<String>) -> HttpResponse {
        HttpResponse::BadRequest().json(Self {
            success: false,
            base64_image: None,
            error: Some(message.into()),
            error_kind: None,
        })
    }

    fn failed(err: &GenerationError) -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(Self {
            success: false,
            base64_image: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind().as_str()),
        })
    }
}

/// Every route the service exposes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health))
        .route("/api/generate-cartoon", web::post().to(generate_cartoon))
        .route("/api/generate-id-photo", web::post().to(generate_id_photo));
}

pub async fn run(config: ServerConfig, client: StudioClient) -> std::io::Result<()> {
    let client = web::Data::new(client);
    let body_limit = config.max_body_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(client.clone())
            .app_data(json_config(body_limit))
            .wrap(Logger::new("%r -> %s (%D ms)"))
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(err, ImageReply::bad_request(message)).into()
    })
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ID photo studio is running")
}

async fn generate_cartoon(
    client: web::Data<StudioClient>,
    body: web::Json<GenerateCartoonBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let (Some(prompt), Some(aspect_ratio)) = (non_blank(body.prompt), non_blank(body.aspect_ratio))
    else {
        return ImageReply::bad_request("prompt and aspectRatio are required");
    };

    let request = match aspect_ratio
        .parse::<AspectRatio>()
        .and_then(|ratio| GenerationRequest::new(prompt, ratio))
    {
        Ok(request) => request,
        Err(e) => return ImageReply::bad_request(e.to_string()),
    };

    match client.generate_from_text(&request).await {
        Ok(image) => {
            log::info!("generate-cartoon response length: {}", image.len());
            ImageReply::image(image)
        }
        Err(e) => ImageReply::failed(&e),
    }
}

async fn generate_id_photo(
    client: web::Data<StudioClient>,
    body: web::Json<GenerateIdPhotoBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let (Some(image), Some(mime_type), Some(prompt)) = (
        non_blank(body.base64_image_data),
        non_blank(body.mime_type),
        non_blank(body.prompt),
    ) else {
        return ImageReply::bad_request("base64ImageData, mimeType and prompt are required");
    };

    let request = match RefinementRequest::from_base64(&image, mime_type, prompt) {
        Ok(request) => request,
        Err(e) => return ImageReply::bad_request(e.to_string()),
    };

    match client.refine_image(&request).await {
        Ok(image) => {
            log::info!("generate-id-photo response length: {}", image.len());
            ImageReply::image(image)
        }
        Err(e) => ImageReply::failed(&e),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;
    use crate::error::TransportError;
    use crate::test_support::CannedTransport;
    use actix_web::test;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn client_answering(value: Value) -> StudioClient {
        StudioClient::with_transport(Arc::new(CannedTransport::answering(value)), &GeminiConfig::new())
    }

    async fn post(client: StudioClient, path: &str, body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(client))
                .app_data(json_config(1024 * 1024))
                .configure(configure),
        )
        .await;
        let request = test::TestRequest::post().uri(path).set_json(body).to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn cartoon_route_returns_base64_image() {
        let client = client_answering(json!({
            "generatedImages": [{ "image": { "imageBytes": "AAAA" } }]
        }));
        let (status, body) = post(
            client,
            "/api/generate-cartoon",
            json!({ "prompt": "a samurai frog", "aspectRatio": "1:1" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "base64Image": "AAAA" }));
    }

    #[actix_web::test]
    async fn missing_fields_and_bad_ratio_are_bad_requests() {
        let client = client_answering(json!({}));
        let (status, body) = post(client.clone(), "/api/generate-cartoon", json!({ "prompt": "x" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let (status, body) = post(
            client,
            "/api/generate-cartoon",
            json!({ "prompt": "x", "aspectRatio": "16:9" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("16:9"));
    }

    #[actix_web::test]
    async fn safety_rejection_maps_to_failure_body() {
        let client = client_answering(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        let (status, body) = post(
            client,
            "/api/generate-id-photo",
            json!({ "base64ImageData": "AAEC", "mimeType": "image/png", "prompt": "remove the hat" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["errorKind"], json!("safety_rejected"));
        assert!(body["error"].as_str().unwrap().contains("SAFETY"));
    }

    #[actix_web::test]
    async fn transport_failure_maps_to_failure_body() {
        let client = StudioClient::with_transport(
            Arc::new(CannedTransport::failing(TransportError::Timeout)),
            &GeminiConfig::new(),
        );
        let (status, body) = post(
            client,
            "/api/generate-id-photo",
            json!({ "base64ImageData": "AAEC", "mimeType": "image/png", "prompt": "smile" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errorKind"], json!("transport_failure"));
    }

    #[actix_web::test]
    async fn invalid_base64_is_a_bad_request() {
        let client = client_answering(json!({}));
        let (status, _) = post(
            client,
            "/api/generate-id-photo",
            json!({ "base64ImageData": "%%%", "mimeType": "image/png", "prompt": "smile" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
