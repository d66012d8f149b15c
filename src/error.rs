//! Error taxonomy and HTTP status mapping

use serde::Deserialize;
use std::fmt;

/// A resource lookup returned 404.
///
/// Carries the server's explanation when one was sent. Every instance is
/// the same kind of error regardless of message, so callers check for it
/// with [`ScalrError::is_not_found`] or by downcasting to this type.
#[derive(Debug, Clone, Default)]
pub struct ResourceNotFound {
    message: Option<String>,
}

impl ResourceNotFound {
    /// A bare not-found error with no server message
    pub fn new() -> Self {
        Self { message: None }
    }

    /// A not-found error carrying a human readable explanation
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ResourceNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => f.write_str(msg),
            None => f.write_str("resource not found"),
        }
    }
}

impl std::error::Error for ResourceNotFound {}

/// Two not-found errors are always equal; the message is for humans only.
impl PartialEq for ResourceNotFound {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ResourceNotFound {}

/// Error type for all Scalr client operations
#[derive(Debug, thiserror::Error)]
pub enum ScalrError {
    /// The token was rejected (401)
    #[error("unauthorized")]
    Unauthorized,

    /// Lock requested on a resource that is already locked (409)
    #[error("resource already locked")]
    ResourceLocked,

    /// Unlock requested on a resource that is not locked (409)
    #[error("resource already unlocked")]
    ResourceNotLocked,

    /// The resource does not exist (404)
    #[error(transparent)]
    NotFound(#[from] ResourceNotFound),

    /// Any other non-success response
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request path or address could not be parsed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Client configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to read or parse the credentials file
    #[error("{0}")]
    Credentials(String),

    /// A field failed validation before any request was sent
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),

    /// A required field was empty
    #[error("{0} is required")]
    RequiredValue(&'static str),

    /// The caller's cancellation token fired
    #[error("request cancelled")]
    Cancelled,
}

impl ScalrError {
    /// True for any not-found error, with or without a message
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScalrError::NotFound(_))
    }

    /// HTTP status associated with this error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ScalrError::Unauthorized => Some(401),
            ScalrError::ResourceLocked | ScalrError::ResourceNotLocked => Some(409),
            ScalrError::NotFound(_) => Some(404),
            ScalrError::Api { status, .. } => Some(*status),
            ScalrError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Scalr operations
pub type Result<T> = std::result::Result<T, ScalrError>;

/// JSON:API error document
#[derive(Deserialize, Debug)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Deserialize, Debug)]
struct ErrorObject {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// Map a response status to an error, or `None` for 2xx.
///
/// `path` is the request URL path, used to tell lock conflicts apart.
/// `body` is the raw response body.
pub fn map_status(status: u16, path: &str, body: &[u8]) -> Option<ScalrError> {
    if (200..300).contains(&status) {
        return None;
    }

    if status == 401 {
        return Some(ScalrError::Unauthorized);
    }

    if status == 409 {
        if path.ends_with("actions/lock") {
            return Some(ScalrError::ResourceLocked);
        }
        if path.ends_with("actions/unlock") || path.ends_with("actions/force-unlock") {
            return Some(ScalrError::ResourceNotLocked);
        }
    }

    let errors = serde_json::from_slice::<ErrorDocument>(body)
        .map(|doc| doc.errors)
        .unwrap_or_default();

    if errors.is_empty() {
        return Some(match status {
            404 => ScalrError::NotFound(ResourceNotFound::new()),
            _ => ScalrError::Api {
                status,
                message: status_line(status),
            },
        });
    }

    let message = errors
        .iter()
        .map(|e| {
            if e.detail.is_empty() {
                e.title.clone()
            } else {
                format!("{}\n\n{}", e.title, e.detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(match status {
        404 => ScalrError::NotFound(ResourceNotFound::with_message(message)),
        _ => ScalrError::Api { status, message },
    })
}

/// "404 Not Found" style status line
fn status_line(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason());
    match reason {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}
