use reqwest::StatusCode;
use std::path::PathBuf;

/// Boxed error returned by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client was configured without an API key.
    #[error("no Dark Sky API key configured")]
    MissingApiKey,

    /// The request never produced a usable response (connection refused, DNS, timeout, or the
    /// body stream broke while being read).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The API answered with a status code >= 400. The body is not inspected.
    #[error("bad HTTP request (status {status})")]
    BadRequest { status: StatusCode },

    /// The body was not a JSON document of the expected shape.
    #[error("unable to decode forecast: {0}")]
    Decode(#[from] serde_json::Error),

    /// The forecast names a timezone that cannot be resolved locally.
    #[error("unable to load timezone data for {timezone:?}: {source}")]
    TimezoneUnavailable {
        timezone: String,
        #[source]
        source: chrono_tz::ParseError,
    },

    /// A UNIX timestamp outside the range representable as a calendar time.
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("unable to load config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// The HTTP status carried by a [`Error::BadRequest`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::BadRequest { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_exposes_status() {
        let err = Error::BadRequest {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().starts_with("bad HTTP request"));
    }

    #[test]
    fn other_errors_have_no_status() {
        assert_eq!(Error::MissingApiKey.status(), None);
    }
}
