//! Error taxonomy for the remote catalog client.

use thiserror::Error;

/// Failure modes of a catalog search.
///
/// The client never retries; the synchronization controller recovers every
/// variant into the neutral empty-result state, so none of these surface to
/// the consumer as a blocking error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a usable response (connect failure,
    /// timeout, redirect loop).
    #[error("catalog request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("catalog endpoint returned HTTP {status}")]
    Status {
        /// The HTTP status code of the response.
        status: u16,
    },

    /// The response body was not a well-formed catalog payload.
    #[error("malformed catalog payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code() {
        let err = ClientError::Status { status: 404 };
        assert_eq!(err.to_string(), "catalog endpoint returned HTTP 404");
    }

    #[test]
    fn request_error_carries_reason() {
        let err = ClientError::Request("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn decode_error_carries_reason() {
        let err = ClientError::Decode("missing field `count`".to_string());
        assert!(err.to_string().contains("missing field `count`"));
    }
}
