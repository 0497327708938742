use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodError {
    /// The API answered with a non-2xx status. The body is kept verbatim
    /// (truncated) and never parsed.
    #[error("remote api responded with status {status}")]
    RemoteUnavailable { status: u16, body: String },

    #[error("request to remote api failed: {0}")]
    Transport(reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// GraphQL-level `errors` in an otherwise successful response.
    #[error("remote api rejected the request: {0}")]
    Rejected(Value),
}

impl PodError {
    /// Payload worth showing to an operator next to the error message.
    pub fn detail(&self) -> Option<String> {
        match self {
            PodError::RemoteUnavailable { body, .. } if !body.is_empty() => Some(body.clone()),
            PodError::Rejected(errors) => Some(errors.to_string()),
            _ => None,
        }
    }
}
