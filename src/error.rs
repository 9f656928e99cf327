use thiserror::Error;

/// Terminal outcome of a single generation call that did not yield an image.
///
/// Every variant carries the detail extracted from the provider (or the
/// transport); `Display` renders the full message meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(
        "Image generation request was rejected for safety reasons: {0}. Try a different photo or wording."
    )]
    SafetyRejected(String),
    #[error("The AI did not generate an image: {0}")]
    NoImageReturned(String),
    #[error("Unexpected response from the image provider: {0}")]
    MalformedResponse(String),
    #[error("Could not reach the image provider, check your network connection: {0}")]
    TransportFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SafetyRejected,
    NoImageReturned,
    MalformedResponse,
    TransportFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SafetyRejected => "safety_rejected",
            ErrorKind::NoImageReturned => "no_image_returned",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::TransportFailure => "transport_failure",
        }
    }
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::SafetyRejected(_) => ErrorKind::SafetyRejected,
            GenerationError::NoImageReturned(_) => ErrorKind::NoImageReturned,
            GenerationError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            GenerationError::TransportFailure(_) => ErrorKind::TransportFailure,
        }
    }
}

/// Why the outbound provider call itself could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("the request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("provider answered with status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("provider answered with a body that is not JSON: {0}")]
    InvalidBody(String),
}

// The request URL is dropped from the message so endpoint details never reach users.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Rejected while building a request value at the crate boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("instruction must not be empty")]
    EmptyInstruction,
    #[error("mime type must not be empty")]
    EmptyMimeType,
    #[error("unsupported aspect ratio '{0}', expected one of 1:1, 3:4, 9:16")]
    UnsupportedAspectRatio(String),
    #[error("source image is not valid base64: {0}")]
    InvalidImageData(String),
    #[error("source image is empty")]
    EmptyImage,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY / GOOGLE_API_KEY) is not set")]
    MissingApiKey,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_message_carries_reason_and_advice() {
        let err = GenerationError::SafetyRejected("SAFETY".into());
        let message = err.to_string();
        assert!(message.contains("SAFETY"));
        assert!(message.contains("different photo or wording"));
        assert_eq!(err.kind().as_str(), "safety_rejected");
    }

    #[test]
    fn transport_message_is_connectivity_oriented() {
        let err = GenerationError::TransportFailure(TransportError::Timeout.to_string());
        assert!(err.to_string().contains("network connection"));
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }
}
