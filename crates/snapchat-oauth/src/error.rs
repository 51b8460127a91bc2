use std::fmt;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration errors raised while building a [`crate::StrategyConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required fields: {fields:?}")]
    MissingRequiredFields { fields: Vec<&'static str> },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("I/O error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by the authenticated GET primitive.
///
/// Mirrors what an OAuth2 HTTP client knows about a failed call: the HTTP
/// status and body when the provider answered, or only a low-level source
/// error when it never did.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct OAuthRequestError {
    pub status_code: Option<u16>,
    pub data: Option<String>,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl OAuthRequestError {
    /// Error without any response attached.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            data: None,
            message: message.into(),
            source: None,
        }
    }

    /// The provider answered with a non-success status and a body.
    pub fn status(status_code: u16, data: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            data: Some(data.into()),
            message: format!("provider responded with status {}", status_code),
            source: None,
        }
    }

    /// The request never produced a response.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            status_code: None,
            data: None,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Code attached to an [`ProfileError::Api`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// The `error` member of a structured provider error body.
    Provider(String),
    /// HTTP status of an unstructured error response.
    Status(u16),
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorCode::Provider(code) => write!(f, "{}", code),
            ApiErrorCode::Status(status) => write!(f, "{}", status),
        }
    }
}

/// Classified failure of a profile fetch.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Snapchat rejected the request.
    #[error("{message}")]
    Api { message: String, code: ApiErrorCode },

    /// The request succeeded but the body was not JSON.
    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        cause: serde_json::Error,
    },

    /// The HTTP call failed before Snapchat produced a usable answer.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        cause: OAuthRequestError,
    },
}

impl ProfileError {
    /// Stable name of the error class, handy for log fields and host error mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            ProfileError::Api { .. } => "api_error",
            ProfileError::Parse { .. } => "parse_error",
            ProfileError::Transport { .. } => "transport_error",
        }
    }
}

/// Errors of the full authorization-code login.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token exchange failed: {0}")]
    TokenExchange(#[source] OAuthRequestError),

    #[error("User profile fetch failed: {0}")]
    Profile(#[from] ProfileError),

    #[error("Authentication rejected: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn api_error_code_displays_raw_value() {
        assert_eq!(ApiErrorCode::Provider("invalid_token".into()).to_string(), "invalid_token");
        assert_eq!(ApiErrorCode::Status(401).to_string(), "401");
    }

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = OAuthRequestError::transport(io);
        assert_eq!(err.message(), "reset by peer");
        assert!(err.source().is_some());
        assert!(err.status_code.is_none());
        assert!(err.data.is_none());
    }

    #[test]
    fn profile_error_kinds_are_distinct() {
        let api = ProfileError::Api {
            message: "nope".into(),
            code: ApiErrorCode::Status(403),
        };
        let transport = ProfileError::Transport {
            message: "Failed to fetch user profile".into(),
            cause: OAuthRequestError::new("boom"),
        };
        assert_eq!(api.kind(), "api_error");
        assert_eq!(transport.kind(), "transport_error");
        assert_eq!(transport.to_string(), "Failed to fetch user profile");
        assert_eq!(transport.source().map(|s| s.to_string()).as_deref(), Some("boom"));
    }
}
