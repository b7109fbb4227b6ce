//! Error kind enumeration for categorizing fetch failures.

/// Categorization of pagequery errors.
///
/// This enum provides a stable interface for matching on error types, so a
/// view can decide how to present a failed list load.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind         | Retriable | Typical cause                     |
/// |-------------------|-----------|-----------------------------------|
/// | `Unavailable`     | Yes       | Backend temporarily down          |
/// | `Timeout`         | Yes       | Fetch exceeded configured timeout |
/// | `Connection`      | Yes       | Network unreachable               |
/// | `InvalidArgument` | No        | Rejected query parameters         |
/// | `NotFound`        | No        | Collection doesn't exist          |
/// | `InvalidResponse` | No        | Malformed paginated result        |
/// | `Configuration`   | No        | Controller built incorrectly      |
///
/// The controller never retries on its own; retriability is a hint for
/// the view (e.g. whether to show a "try again" button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Query parameters were rejected by the data source.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// The requested collection was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Data source temporarily unavailable.
    ///
    /// HTTP: 503 Service Unavailable
    #[error("service unavailable")]
    Unavailable,

    /// The fetch did not settle within the configured timeout.
    ///
    /// HTTP: 504 Gateway Timeout or client-side timeout
    #[error("timeout")]
    Timeout,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Internal error reported by the data source.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("internal error")]
    Internal,

    /// The data source resolved with a result whose pagination metadata
    /// is inconsistent or incomplete.
    #[error("invalid response")]
    InvalidResponse,

    /// Controller or data source misconfiguration.
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagequery::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::InvalidResponse.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable | ErrorKind::Timeout | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    ///
    /// Used by REST-backed data sources to classify non-2xx responses.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::InvalidArgument,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::Internal,
            502 => ErrorKind::InvalidResponse,
            503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_kinds() {
        assert!(ErrorKind::Unavailable.is_retriable());
        assert!(ErrorKind::Timeout.is_retriable());
        assert!(ErrorKind::Connection.is_retriable());

        assert!(!ErrorKind::InvalidArgument.is_retriable());
        assert!(!ErrorKind::NotFound.is_retriable());
        assert!(!ErrorKind::InvalidResponse.is_retriable());
        assert!(!ErrorKind::Configuration.is_retriable());
    }

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorKind::from_http_status(400), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_http_status(503), ErrorKind::Unavailable);
        assert_eq!(ErrorKind::from_http_status(504), ErrorKind::Timeout);
        assert_eq!(ErrorKind::from_http_status(418), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(499), ErrorKind::InvalidArgument);
        assert_eq!(ErrorKind::from_http_status(599), ErrorKind::Internal);
        assert_eq!(ErrorKind::from_http_status(302), ErrorKind::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
        assert_eq!(ErrorKind::InvalidResponse.to_string(), "invalid response");
    }
}
