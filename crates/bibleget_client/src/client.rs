//! BibleGet HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Two calls: quote lookup by reference, and the version catalog.

use std::str::FromStr;

use serde::Deserialize;
use versequote_core::{Quote, VersionCatalog};

pub const QUERY_ENDPOINT: &str = "https://query.bibleget.io/v3/index.php";
pub const METADATA_ENDPOINT: &str = "https://query.bibleget.io/v3/metadata.php";

/// Version used when the caller has none selected.
pub const DEFAULT_VERSION: &str = "CEI2008";

/// Identifies this client to the service.
pub const APP_ID: &str = "office";

const USER_AGENT: &str = concat!("versequote/", env!("CARGO_PKG_VERSION"));

/// Error type for lookup operations.
#[derive(Debug)]
pub enum ClientError {
    /// Connection or transport failure
    Network(String),
    /// Transport timeout
    Timeout(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Body was not the expected JSON
    Parse(String),
    /// The service answered but reported errors instead of results
    Service(String),
}

impl ClientError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }

    /// Short description suitable for end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Network(_) => {
                "Connection error. Please check your internet connection and try again."
            }
            ClientError::Timeout(_) => "The request timed out. The server might be slow right now.",
            ClientError::Http(..) => "The server returned an error. Please try again later.",
            ClientError::Parse(_) => "Received an unexpected response format from the server.",
            ClientError::Service(_) => "The server could not find the requested quote.",
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            ClientError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            ClientError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ClientError::Service(msg) => write!(f, "Service error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Which original-language tradition to prefer for versification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferOrigin {
    #[default]
    Greek,
    Hebrew,
}

impl PreferOrigin {
    pub fn as_param(&self) -> &'static str {
        match self {
            PreferOrigin::Greek => "GREEK",
            PreferOrigin::Hebrew => "HEBREW",
        }
    }
}

impl FromStr for PreferOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GREEK" => Ok(PreferOrigin::Greek),
            "HEBREW" => Ok(PreferOrigin::Hebrew),
            other => Err(format!("unknown origin '{}' (expected GREEK or HEBREW)", other)),
        }
    }
}

/// Quote lookup, as seen by the task pane.
pub trait LookupService {
    /// Verses for `reference`. `None` arguments use the service defaults
    /// ([`DEFAULT_VERSION`], [`PreferOrigin::Greek`]).
    fn get_by_quote(
        &self,
        reference: &str,
        version: Option<&str>,
        prefer_origin: Option<PreferOrigin>,
    ) -> Result<Vec<Quote>, ClientError>;

    /// The ordered version catalog.
    fn get_versions(&self) -> Result<VersionCatalog, ClientError>;
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Quote>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct MetadataResponse {
    validversions_fullname: VersionCatalog,
}

/// Parse a quote lookup body.
///
/// An empty `results` array with reported `errors` is a service error;
/// an empty `results` array without errors is an empty result.
pub fn parse_quote_response(body: &str) -> Result<Vec<Quote>, ClientError> {
    let parsed: QueryResponse =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;

    if parsed.results.is_empty() && !parsed.errors.is_empty() {
        let messages: Vec<String> = parsed
            .errors
            .iter()
            .map(|e| match e.as_str() {
                Some(s) => s.to_string(),
                None => e.to_string(),
            })
            .collect();
        return Err(ClientError::Service(messages.join("; ")));
    }

    Ok(parsed.results)
}

/// Parse a version metadata body.
pub fn parse_versions_response(body: &str) -> Result<VersionCatalog, ClientError> {
    let parsed: MetadataResponse =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;
    Ok(parsed.validversions_fullname)
}

/// BibleGet API client (blocking).
#[derive(Clone)]
pub struct BibleGetClient {
    http: reqwest::blocking::Client,
    query_url: String,
    metadata_url: String,
}

impl BibleGetClient {
    /// Client against the public BibleGet endpoints.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_endpoints(QUERY_ENDPOINT, METADATA_ENDPOINT)
    }

    /// Client against a mirror or test server rooted at `base`
    /// (`{base}/v3/index.php`, `{base}/v3/metadata.php`).
    pub fn with_base_url(base: &str) -> Result<Self, ClientError> {
        let base = base.trim_end_matches('/');
        Self::with_endpoints(
            &format!("{}/v3/index.php", base),
            &format!("{}/v3/metadata.php", base),
        )
    }

    pub fn with_endpoints(query_url: &str, metadata_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            query_url: query_url.to_string(),
            metadata_url: metadata_url.to_string(),
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ClientError> {
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .map_err(ClientError::from_transport)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status, body));
        }

        response.text().map_err(ClientError::from_transport)
    }
}

impl LookupService for BibleGetClient {
    fn get_by_quote(
        &self,
        reference: &str,
        version: Option<&str>,
        prefer_origin: Option<PreferOrigin>,
    ) -> Result<Vec<Quote>, ClientError> {
        let version = version.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_VERSION);
        let origin = prefer_origin.unwrap_or_default();

        let params = [
            ("query", reference),
            ("version", version),
            ("preferorigin", origin.as_param()),
            ("return", "json"),
            ("appid", APP_ID),
        ];
        let body = self.get(&self.query_url, &params)?;
        parse_quote_response(&body)
    }

    fn get_versions(&self) -> Result<VersionCatalog, ClientError> {
        let params = [("query", "bibleversions"), ("return", "json")];
        let body = self.get(&self.metadata_url, &params)?;
        parse_versions_response(&body)
    }
}
