use crate::error::ConfigError;
use std::env;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_GENERATE_MODEL: &str = "imagen-4.0-generate-001";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub edit_model: String,
    pub generate_model: String,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            generate_model: DEFAULT_GENERATE_MODEL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let api_key = non_empty_env("GEMINI_API_KEY")
            .or_else(|| non_empty_env("API_KEY"))
            .or_else(|| non_empty_env("GOOGLE_API_KEY"));
        let api_base = non_empty_env("GEMINI_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let edit_model = non_empty_env("GEMINI_EDIT_MODEL").unwrap_or(defaults.edit_model);
        let generate_model =
            non_empty_env("GEMINI_GENERATE_MODEL").unwrap_or(defaults.generate_model);
        let request_timeout_secs = parse_env("GEMINI_REQUEST_TIMEOUT_SECS")?;

        Ok(GeminiConfig {
            api_key,
            api_base,
            edit_model,
            generate_model,
            request_timeout_secs,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_models(
        mut self,
        edit_model: impl Into<String>,
        generate_model: impl Into<String>,
    ) -> Self {
        self.edit_model = edit_model.into();
        self.generate_model = generate_model.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3001,
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = non_empty_env("HOST").unwrap_or(defaults.host);
        let port = parse_env("PORT")?.unwrap_or(defaults.port);
        let max_body_bytes = match parse_env::<usize>("MAX_BODY_MB")? {
            Some(mb) => mb_to_bytes("MAX_BODY_MB", mb)?,
            None => defaults.max_body_bytes,
        };

        Ok(ServerConfig {
            host,
            port,
            max_body_bytes,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }
}

impl StudioConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(StudioConfig {
            gemini: GeminiConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn mb_to_bytes(key: &'static str, mb: usize) -> Result<usize, ConfigError> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: key,
            value: mb.to_string(),
        })
}

fn parse_env<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty_env(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: key,
                value: raw,
            }),
        None => Ok(None),
    }
}
