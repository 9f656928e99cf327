use idphoto::{logger, server, StudioClient, StudioConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::default().with_env_level())?;

    if env_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = StudioConfig::from_env()?;
    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &config.server.host,
        config.server.port,
    );
    logger::log_config_info(&config);

    let client = match StudioClient::new(&config.gemini) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize provider client: {}", e);
            return Err(e.into());
        }
    };

    server::run(config.server, client).await?;
    Ok(())
}
