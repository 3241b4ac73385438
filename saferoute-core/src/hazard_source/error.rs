use thiserror::Error;

/// Errors from [`crate::hazard_source::HazardSource::list_hazards`].
///
/// Each variant carries the URL or path that failed so callers can report it
/// without extra context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HazardSourceError {
    /// The request never produced a response.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying transport message.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The backend answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response or client message.
        message: String,
    },
    /// The feed body was not a valid hazard list.
    #[error("failed to parse hazard feed: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
    /// A saved feed could not be read.
    #[error("failed to read hazard feed at {path}: {message}")]
    Io {
        /// Feed location.
        path: String,
        /// Underlying I/O message.
        message: String,
    },
}
