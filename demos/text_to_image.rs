use idphoto::{prompt, AspectRatio, GeminiConfig, GenerationRequest, StudioClient};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();
    idphoto::logger::init()?;
    if env_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("⚠️  No .env file found");
    }

    let description = env::args()
        .nth(1)
        .unwrap_or_else(|| "a cheerful red-haired elf archer, in the style of Studio Ghibli".to_string());
    let aspect_ratio: AspectRatio = env::args()
        .nth(2)
        .unwrap_or_else(|| "3:4".to_string())
        .parse()?;

    let config = GeminiConfig::from_env()?;
    let client = StudioClient::new(&config)?;
    let request = GenerationRequest::new(prompt::id_photo_prompt(&description), aspect_ratio)?;

    match client.text_to_image().generate(&request).await {
        Ok(result) => println!("{} bytes of {}", result.len(), result.mime_type),
        Err(e) => println!("[{}] {}", e.kind().as_str(), e),
    }

    Ok(())
}
