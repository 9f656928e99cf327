//! Character ID-photo generation: text-to-image and image refinement on top of
//! the Gemini / Imagen APIs, with every provider answer classified into an
//! image or a precise, user-facing error.

pub mod config;
pub mod error;
pub mod gemini;
pub mod interpreter;
pub mod logger;
pub mod models;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{GeminiConfig, ServerConfig, StudioConfig};
pub use error::{ConfigError, ErrorKind, GenerationError, RequestError, Result, TransportError};
pub use gemini::{HttpTransport, ImageRefiner, ProviderTransport, StudioClient, TextToImageGenerator};
pub use interpreter::ResponseInterpreter;
pub use models::{
    AspectRatio, EditResponse, GenerateImagesResponse, GenerationRequest, GenerationResult,
    ProviderResponse, RefinementRequest,
};
