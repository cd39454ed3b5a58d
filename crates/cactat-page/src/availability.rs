#![forbid(unsafe_code)]

//! Remote availability contract.
//!
//! The deployed page must answer a GET with status `200`, reason `OK`, and a
//! body containing `CAC TAT`. The contract itself is pure
//! ([`AvailabilityContract::check`]); fetching goes through the [`HttpFetch`]
//! seam so tests can substitute canned responses. A blocking `reqwest`
//! fetcher is available with the `live-http` feature.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `CACTAT_AVAILABILITY_URL` | URL to fetch | [`DEFAULT_URL`] |
//! | `CACTAT_HTTP_TIMEOUT_MS` | Request timeout | `10000` |

use std::fmt;

/// Environment variable overriding the availability URL.
pub const ENV_AVAILABILITY_URL: &str = "CACTAT_AVAILABILITY_URL";
/// Environment variable overriding the request timeout in milliseconds.
pub const ENV_HTTP_TIMEOUT_MS: &str = "CACTAT_HTTP_TIMEOUT_MS";
/// Where the page is deployed.
pub const DEFAULT_URL: &str = "https://cac-tat-v3.s3.eu-central-1.amazonaws.com/index.html";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Ways the availability check can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// The request never produced a response.
    Transport(String),
    Status { expected: u16, actual: u16 },
    Reason { expected: String, actual: String },
    /// The body does not contain the expected text.
    MissingBody { needle: String },
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityError::Transport(msg) => write!(f, "transport error: {msg}"),
            AvailabilityError::Status { expected, actual } => {
                write!(f, "expected status {expected}, got {actual}")
            }
            AvailabilityError::Reason { expected, actual } => {
                write!(f, "expected reason {expected:?}, got {actual:?}")
            }
            AvailabilityError::MissingBody { needle } => {
                write!(f, "response body does not contain {needle:?}")
            }
        }
    }
}

impl std::error::Error for AvailabilityError {}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Where to fetch and what to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub expected_status: u16,
    pub expected_reason: String,
    pub body_needle: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            expected_status: 200,
            expected_reason: "OK".to_string(),
            body_needle: "CAC TAT".to_string(),
        }
    }
}

impl AvailabilityConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_AVAILABILITY_URL).filter(|u| !u.trim().is_empty()) {
            config.url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout_ms = ms,
                _ => tracing::warn!(value = %raw, "ignoring invalid {ENV_HTTP_TIMEOUT_MS}"),
            }
        }
        config
    }

    #[must_use]
    pub fn contract(&self) -> AvailabilityContract {
        AvailabilityContract {
            status: self.expected_status,
            reason: self.expected_reason.clone(),
            body_needle: self.body_needle.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// A response as seen by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// Expected status, reason phrase, and body substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityContract {
    pub status: u16,
    pub reason: String,
    pub body_needle: String,
}

impl Default for AvailabilityContract {
    fn default() -> Self {
        AvailabilityConfig::default().contract()
    }
}

impl AvailabilityContract {
    /// Check a response. Status is checked first, then reason, then body.
    pub fn check(&self, response: &HttpResponse) -> Result<(), AvailabilityError> {
        if response.status != self.status {
            return Err(AvailabilityError::Status {
                expected: self.status,
                actual: response.status,
            });
        }
        if response.reason != self.reason {
            return Err(AvailabilityError::Reason {
                expected: self.reason.clone(),
                actual: response.reason.clone(),
            });
        }
        if !response.body.contains(&self.body_needle) {
            return Err(AvailabilityError::MissingBody {
                needle: self.body_needle.clone(),
            });
        }
        Ok(())
    }
}

/// Something that can GET a URL.
pub trait HttpFetch {
    fn get(&self, url: &str) -> Result<HttpResponse, AvailabilityError>;
}

/// Fetch the configured URL and check it against the contract.
pub fn probe<F: HttpFetch + ?Sized>(
    fetcher: &F,
    config: &AvailabilityConfig,
) -> Result<HttpResponse, AvailabilityError> {
    let response = fetcher.get(&config.url)?;
    let verdict = config.contract().check(&response);
    match &verdict {
        Ok(()) => tracing::info!(url = %config.url, status = response.status, "page available"),
        Err(err) => tracing::warn!(url = %config.url, error = %err, "availability check failed"),
    }
    verdict.map(|()| response)
}

// ---------------------------------------------------------------------------
// Live fetcher
// ---------------------------------------------------------------------------

/// Blocking HTTP fetcher backed by `reqwest`.
#[cfg(feature = "live-http")]
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "live-http")]
impl ReqwestFetcher {
    pub fn new(timeout_ms: u64) -> Result<Self, AvailabilityError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|err| AvailabilityError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "live-http")]
impl HttpFetch for ReqwestFetcher {
    fn get(&self, url: &str) -> Result<HttpResponse, AvailabilityError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| AvailabilityError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| AvailabilityError::Transport(err.to_string()))?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct Canned {
        response: Result<HttpResponse, AvailabilityError>,
        requested: RefCell<Vec<String>>,
    }

    impl Canned {
        fn ok(status: u16, reason: &str, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    reason: reason.into(),
                    body: body.into(),
                }),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpFetch for Canned {
        fn get(&self, url: &str) -> Result<HttpResponse, AvailabilityError> {
            self.requested.borrow_mut().push(url.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn healthy_page_passes() {
        let fetcher = Canned::ok(200, "OK", "<title>CAC TAT</title>");
        let config = AvailabilityConfig::default();
        assert!(probe(&fetcher, &config).is_ok());
        assert_eq!(fetcher.requested.borrow().as_slice(), [DEFAULT_URL.to_string()]);
    }

    #[test]
    fn status_is_checked_before_reason() {
        let contract = AvailabilityContract::default();
        let response = HttpResponse {
            status: 404,
            reason: "Not Found".into(),
            body: String::new(),
        };
        assert_eq!(
            contract.check(&response),
            Err(AvailabilityError::Status {
                expected: 200,
                actual: 404
            })
        );
    }

    #[test]
    fn wrong_reason_fails() {
        let fetcher = Canned::ok(200, "", "CAC TAT");
        assert!(matches!(
            probe(&fetcher, &AvailabilityConfig::default()),
            Err(AvailabilityError::Reason { .. })
        ));
    }

    #[test]
    fn missing_body_text_fails() {
        let fetcher = Canned::ok(200, "OK", "<html>Access Denied</html>");
        assert_eq!(
            probe(&fetcher, &AvailabilityConfig::default()),
            Err(AvailabilityError::MissingBody {
                needle: "CAC TAT".into()
            })
        );
    }

    #[test]
    fn transport_errors_propagate() {
        let fetcher = Canned {
            response: Err(AvailabilityError::Transport("dns".into())),
            requested: RefCell::new(Vec::new()),
        };
        assert_eq!(
            probe(&fetcher, &AvailabilityConfig::default()).unwrap_err().to_string(),
            "transport error: dns"
        );
    }

    #[test]
    fn config_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_AVAILABILITY_URL, " http://localhost:8080/index.html "),
            (ENV_HTTP_TIMEOUT_MS, "2500"),
        ]
        .into_iter()
        .collect();
        let config = AvailabilityConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.url, "http://localhost:8080/index.html");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.expected_status, 200);
    }

    #[test]
    fn invalid_timeout_keeps_default() {
        let config = AvailabilityConfig::from_lookup(|k| {
            (k == ENV_HTTP_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.url, DEFAULT_URL);
    }
}
