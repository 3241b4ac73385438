//! HTTP-based `HazardSource` for the reporting backend.
//!
//! The [`HazardSource`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This source bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use saferoute_core::HazardSource;
//! use saferoute_data::{HttpHazardSource, HttpHazardSourceConfig};
//!
//! let config = HttpHazardSourceConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10));
//! let source = HttpHazardSource::with_config(config)?;
//! let hazards = source.list_hazards()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::thread;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use saferoute_core::{HazardPoint, HazardSource, HazardSourceError};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::wire::parse_hazard_feed;

/// Errors raised while building an [`HttpHazardSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The base URL does not form a valid feed URL.
    #[error("invalid hazard backend URL {url:?}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for feed requests.
pub const DEFAULT_USER_AGENT: &str = "saferoute/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the "list all hazards" endpoint.
const FEED_PATH: &str = "crime/all";

/// Configuration for [`HttpHazardSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHazardSourceConfig {
    /// Base URL of the reporting backend (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpHazardSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpHazardSourceConfig {
    /// Create a configuration for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Hazard source that fetches the backend's live feed.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the source blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// drives its own runtime on a scoped helper thread, since nesting
/// `block_on` on the caller's thread would panic. The caller's runtime stays
/// blocked until the request finishes.
pub struct HttpHazardSource {
    client: Client,
    config: HttpHazardSourceConfig,
    feed_url: Url,
    /// Taken on drop so it can be shut down without blocking.
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for HttpHazardSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpHazardSource")
            .field("config", &self.config)
            .field("feed_url", &self.feed_url.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpHazardSource {
    /// Create a source for the backend at `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(HttpHazardSourceConfig::new(base_url))
    }

    /// Create a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpHazardSourceConfig) -> Result<Self, SourceBuildError> {
        let feed_url = build_feed_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            feed_url,
            runtime: Some(runtime),
        })
    }

    /// The URL hazards are fetched from.
    #[must_use]
    pub const fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    async fn fetch_hazards_async(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        let url = self.feed_url.as_str();
        let body = self
            .client
            .get(self.feed_url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let hazards = parse_hazard_feed(&body)?;
        debug!("fetched {} hazards from {url}", hazards.len());
        Ok(hazards)
    }

    fn block_on_owned_runtime(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        match &self.runtime {
            Some(runtime) => runtime.block_on(self.fetch_hazards_async()),
            None => Err(HazardSourceError::Network {
                url: self.feed_url.to_string(),
                message: "hazard source runtime has shut down".to_owned(),
            }),
        }
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> HazardSourceError {
        if error.is_timeout() {
            return HazardSourceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return HazardSourceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        HazardSourceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl HazardSource for HttpHazardSource {
    fn list_hazards(&self) -> Result<Vec<HazardPoint>, HazardSourceError> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.fetch_hazards_async()))
            }
            Ok(_) => thread::scope(|scope| {
                scope
                    .spawn(|| self.block_on_owned_runtime())
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            }),
            Err(_) => self.block_on_owned_runtime(),
        }
    }
}

impl Drop for HttpHazardSource {
    fn drop(&mut self) {
        // Dropping a runtime from async context panics.
        if let Some(runtime) = self.runtime.take()
            && Handle::try_current().is_ok()
        {
            runtime.shutdown_background();
        }
    }
}

fn build_feed_url(base_url: &str) -> Result<Url, SourceBuildError> {
    let joined = format!("{}/{FEED_PATH}", base_url.trim_end_matches('/'));
    Url::parse(&joined).map_err(|source| SourceBuildError::InvalidUrl {
        url: base_url.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned HTTP response and report the request line.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).expect("read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            let text = String::from_utf8_lossy(&request).into_owned();
            let request_line = text.lines().next().unwrap_or_default().to_owned();
            tx.send(request_line).expect("report request line");
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
        });
        (format!("http://{addr}"), rx)
    }

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/crime/all")]
    #[case("http://localhost:8000/", "http://localhost:8000/crime/all")]
    #[case("https://hazards.example.com/api", "https://hazards.example.com/api/crime/all")]
    fn builds_feed_url(#[case] base: &str, #[case] expected: &str) {
        let url = build_feed_url(base).expect("valid base URL");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn rejects_invalid_base_url() {
        let err = HttpHazardSource::new("not a url").expect_err("invalid URL");
        assert!(matches!(err, SourceBuildError::InvalidUrl { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpHazardSourceConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn default_config_targets_local_backend() {
        let config = HttpHazardSourceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[rstest]
    fn fetches_and_decodes_feed() {
        let (base, requests) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"locations":[{"position":{"lat":35.0,"lng":136.0},"title":"t","info":"i"}],"apiKey":"k"}"#,
        );
        let source = HttpHazardSource::new(base).expect("source should build");

        let hazards = source.list_hazards().expect("feed should load");

        assert_eq!(hazards.len(), 1);
        let request_line = requests.recv().expect("request line");
        assert!(request_line.starts_with("GET /crime/all "), "{request_line}");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn fetches_from_inside_a_current_thread_runtime() {
        let (base, _requests) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"position":{"lat":35.0,"lng":136.0},"title":"t","info":"i"}]"#,
        );
        let source = HttpHazardSource::new(base).expect("source should build");

        let hazards = source.list_hazards().expect("feed should load");

        assert_eq!(hazards.len(), 1);
    }

    #[rstest]
    fn server_errors_carry_status() {
        let (base, _requests) = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"detail":"boom"}"#);
        let source = HttpHazardSource::new(base).expect("source should build");

        let err = source.list_hazards().expect_err("server error");

        match err {
            HazardSourceError::Http { status, url, .. } => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/crime/all"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[rstest]
    fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        drop(listener);
        let source = HttpHazardSource::new(format!("http://{addr}")).expect("source should build");

        let err = source.list_hazards().expect_err("nothing is listening");

        assert!(matches!(err, HazardSourceError::Network { .. }), "{err:?}");
    }
}
