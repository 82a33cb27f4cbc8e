//! Unified Error Type
//!
//! Every fallible path in the crate funnels into [`SurveyError`]. The
//! taxonomy is deliberately flat: argument, network, API, and file-system
//! failures are all fatal and abort the run. There is no retry policy and
//! no partial-result recovery; a failure mid-survey leaves whatever was
//! already flushed to the report file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // MediaWiki API Errors
    // -------------------------------------------------------------------------
    /// The API answered with its `error` envelope instead of a result.
    #[error("API error from {wiki}: {code}: {info}")]
    Api {
        wiki: String,
        code: String,
        info: String,
    },

    /// The API answered 200 but the payload is not shaped as documented.
    #[error("unexpected API response from {wiki}: {reason}")]
    BadResponse { wiki: String, reason: String },

    /// CentralAuth knows no global account under this name.
    #[error("no global account named {0:?}")]
    UnknownUser(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

impl SurveyError {
    /// Create an API-envelope error naming the wiki it came from.
    pub fn api(
        wiki: impl Into<String>,
        code: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self::Api {
            wiki: wiki.into(),
            code: code.into(),
            info: info.into(),
        }
    }

    /// Create a malformed-payload error naming the wiki it came from.
    pub fn bad_response(wiki: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadResponse {
            wiki: wiki.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SurveyError::api("en.wikipedia.org", "maxlag", "Waiting for replica");
        assert_eq!(
            err.to_string(),
            "API error from en.wikipedia.org: maxlag: Waiting for replica"
        );
    }

    #[test]
    fn test_bad_response_display() {
        let err = SurveyError::bad_response("de.wikipedia.org", "missing query object");
        assert_eq!(
            err.to_string(),
            "unexpected API response from de.wikipedia.org: missing query object"
        );
    }

    #[test]
    fn test_unknown_user_display() {
        let err = SurveyError::UnknownUser("Nobody".to_string());
        assert_eq!(err.to_string(), "no global account named \"Nobody\"");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SurveyError = io.into();
        assert!(matches!(err, SurveyError::Io(_)));
    }
}
