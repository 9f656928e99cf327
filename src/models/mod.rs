pub mod gemini;
pub mod imagen;
pub mod request;
pub mod result;

pub use gemini::*;
pub use imagen::*;
pub use request::*;
pub use result::*;

/// Provider answer, tagged by the capability that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Edit {
        body: EditResponse,
        source_mime_type: String,
    },
    Generate(GenerateImagesResponse),
}
