//! Resilient JSON fetch client.
//!
//! Every transport or application failure is converted into a value at
//! this boundary -- nothing here panics or bubbles a raw error to the
//! page layer. Reads produce `Result<Value, FetchError>`; writes produce
//! a [`WriteOutcome`] whose rejection branch carries the field-keyed
//! error map the form layer redisplays.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;

use crate::auth::SessionAuth;
use crate::config::ClientConfig;

/// Timeout for regular fetches and writes.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Hint appended to 401/403 errors, pointing at the token configuration.
pub const AUTH_HINT: &str =
    "The endpoint requires authentication. Set API_TOKEN in the client environment.";

/// A failed API call, as a value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS failure, refused
    /// connection, timeout) or the response body was not valid JSON.
    #[error("query failed: {0}")]
    Transport(String),

    /// The server answered with an error status. `detail` is extracted
    /// from the JSON body's `detail` field when present, else the whole
    /// body, else the raw response text.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },
}

impl FetchError {
    /// Render the error for display. A pure function over the value: the
    /// 401/403 authentication hint is appended here, not at the call
    /// site.
    pub fn render(&self) -> String {
        match self {
            Self::Transport(_) => self.to_string(),
            Self::Http { status, detail } => {
                if matches!(*status, 401 | 403) {
                    format!("HTTP {status}: {detail}. {AUTH_HINT}")
                } else {
                    format!("HTTP {status}: {detail}.")
                }
            }
        }
    }

    /// The HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::Http { status, .. } => Some(*status),
        }
    }
}

/// Outcome of a write (POST/PUT) against the API.
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    /// 2xx response; carries the response payload.
    Accepted(Value),
    /// Anything else, as a field-keyed error map mirroring the payload
    /// shape. Unparseable bodies fall back to `{"error": "HTTP <status>"}`
    /// and transport failures to `{"error": <cause>}`.
    Rejected(serde_json::Map<String, Value>),
}

impl WriteOutcome {
    /// Whether the write was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// HTTP client for the Data API.
///
/// Holds the shared connection pool and the service-level fallback token;
/// per-session credentials arrive with each call.
pub struct ApiClient {
    http: reqwest::Client,
    static_token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            static_token: config.api_token.clone(),
        }
    }

    /// Build a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across components).
    pub fn with_client(http: reqwest::Client, static_token: Option<String>) -> Self {
        Self { http, static_token }
    }

    /// The service-level fallback token, if configured.
    pub fn static_token(&self) -> Option<&str> {
        self.static_token.as_deref()
    }

    /// Common headers: always `Accept: application/json`; a bearer-style
    /// `Authorization: Token <v>` when the session or configuration holds
    /// a credential.
    pub(crate) fn headers(&self, auth: &SessionAuth) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = auth.effective_token(self.static_token.as_deref()) {
            if let Ok(value) = HeaderValue::from_str(&format!("Token {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    /// GET a JSON resource with the given query parameters.
    pub async fn fetch_json(
        &self,
        url: &str,
        params: &[(&str, String)],
        auth: &SessionAuth,
    ) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(url)
            .headers(self.headers(auth))
            .query(params)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    /// POST a JSON payload. Never fails with an error: transport problems
    /// and rejections both come back as [`WriteOutcome::Rejected`].
    pub async fn post_json(&self, url: &str, body: &Value, auth: &SessionAuth) -> WriteOutcome {
        self.send_write(reqwest::Method::POST, url, body, auth).await
    }

    /// PUT a JSON payload, with the same outcome discipline as
    /// [`post_json`](Self::post_json).
    pub async fn put_json(&self, url: &str, body: &Value, auth: &SessionAuth) -> WriteOutcome {
        self.send_write(reqwest::Method::PUT, url, body, auth).await
    }

    /// Issue a reachability probe with its own (short) timeout.
    /// `Err(true)` means a connection-level failure; `Err(false)` any
    /// other failure kind (treated optimistically by the resolver).
    pub(crate) async fn probe(
        &self,
        url: &str,
        timeout: Duration,
        auth: &SessionAuth,
    ) -> Result<(), bool> {
        let result = self
            .http
            .get(url)
            .headers(self.headers(auth))
            .timeout(timeout)
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.is_connect()),
        }
    }

    async fn send_write(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &Value,
        auth: &SessionAuth,
    ) -> WriteOutcome {
        let result = self
            .http
            .request(method, url)
            .headers(self.headers(auth))
            .json(body)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return WriteOutcome::Rejected(error_map("error", e.to_string())),
        };

        let status = response.status();
        if status.is_success() {
            let payload = response.json::<Value>().await.unwrap_or(Value::Null);
            return WriteOutcome::Accepted(payload);
        }

        // Non-2xx: surface the body as a field-keyed map so forms can
        // redisplay inline errors.
        match response.json::<Value>().await {
            Ok(Value::Object(map)) => WriteOutcome::Rejected(map),
            _ => WriteOutcome::Rejected(error_map("error", format!("HTTP {}", status.as_u16()))),
        }
    }
}

/// Build a single-entry error map.
fn error_map(key: &str, message: String) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), Value::String(message));
    map
}

/// Extract the most useful detail out of an error response body.
async fn http_error(status: StatusCode, response: reqwest::Response) -> FetchError {
    let text = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<Value>(&text) {
        Ok(json) => json
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| json.to_string()),
        Err(_) => text,
    };
    FetchError::Http {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_appends_hint_for_auth_errors() {
        let err = FetchError::Http {
            status: 401,
            detail: "Authentication credentials were not provided.".into(),
        };
        let rendered = err.render();
        assert!(rendered.starts_with("HTTP 401:"));
        assert!(rendered.ends_with(AUTH_HINT));

        let err = FetchError::Http {
            status: 403,
            detail: "Forbidden".into(),
        };
        assert!(err.render().contains(AUTH_HINT));
    }

    #[test]
    fn test_render_plain_for_other_statuses() {
        let err = FetchError::Http {
            status: 404,
            detail: "Student with id 9 not found".into(),
        };
        assert_eq!(err.render(), "HTTP 404: Student with id 9 not found.");
        assert!(!err.render().contains(AUTH_HINT));
    }

    #[test]
    fn test_render_transport() {
        let err = FetchError::Transport("connection refused".into());
        assert_eq!(err.render(), "query failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_headers_prefer_session_token() {
        let client = ApiClient::with_client(reqwest::Client::new(), Some("static".into()));

        let mut auth = SessionAuth::anonymous();
        let headers = client.headers(&auth);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Token static");

        auth.login("session".to_string());
        let headers = client.headers(&auth);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Token session");
    }

    #[test]
    fn test_headers_omit_authorization_when_anonymous() {
        let client = ApiClient::with_client(reqwest::Client::new(), None);
        let headers = client.headers(&SessionAuth::anonymous());
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }
}
