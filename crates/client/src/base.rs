//! API base resolution.
//!
//! Development environments frequently bind the API to the any-interface
//! address (unusable as a client target) and frequently run it on a
//! fallback port when the primary is occupied. The resolver removes that
//! friction: it normalizes the configured URL, builds an ordered candidate
//! list, and probes each with a short-lived request, settling on the first
//! candidate that accepts connections.

use std::time::Duration;

use url::Url;

use crate::auth::SessionAuth;
use crate::config::DEFAULT_API_BASE;
use crate::fetch::ApiClient;

/// The API's primary well-known port.
pub const PRIMARY_PORT: u16 = 8000;

/// The API's secondary well-known port (the configured default).
pub const SECONDARY_PORT: u16 = 8001;

/// Probe timeout. Deliberately shorter than the fetch timeout -- the
/// probe exists only to tell "accepting connections" from "dead".
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Low-cost collection endpoint used for reachability probes.
const PROBE_PATH: &str = "/estudantes/";

/// Normalize a configured base URL.
///
/// Rewrites the any-interface host (`0.0.0.0`) to `localhost` preserving
/// scheme and port, drops any path/query, and trims the trailing slash.
/// Unparseable input falls back to the default base.
pub fn normalize(configured: &str) -> String {
    let trimmed = configured.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE.to_string();
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => return DEFAULT_API_BASE.to_string(),
    };

    let host = match parsed.host_str() {
        // Never use the any-interface address for client requests.
        Some("0.0.0.0") | None => "localhost",
        Some(host) => host,
    };

    match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    }
}

/// Build the ordered, deduplicated candidate list for a configured URL.
///
/// The normalized URL comes first; when its port is the secondary
/// well-known port, the same host on the primary port is appended as a
/// fallback.
pub fn candidates(configured: &str) -> Vec<String> {
    let first = normalize(configured);
    let mut list = vec![first.clone()];

    if let Ok(parsed) = Url::parse(&first) {
        if parsed.port() == Some(SECONDARY_PORT) {
            if let Some(host) = parsed.host_str() {
                list.push(format!("{}://{host}:{PRIMARY_PORT}", parsed.scheme()));
            }
        }
    }

    // Deduplicate while preserving order.
    let mut seen = std::collections::HashSet::new();
    list.retain(|c| seen.insert(c.clone()));
    list
}

/// Resolve a reachable API base for the configured URL.
///
/// Probes the candidates in order and returns the first reachable one; if
/// none respond, returns the first (normalized) candidate anyway and lets
/// the actual fetch surface the failure.
pub async fn resolve(client: &ApiClient, configured: &str, auth: &SessionAuth) -> String {
    let candidates = candidates(configured);
    resolve_from_candidates(client, candidates, auth).await
}

/// Probe the given candidates in order. Split out of [`resolve`] so the
/// selection logic is testable against arbitrary addresses.
pub(crate) async fn resolve_from_candidates(
    client: &ApiClient,
    candidates: Vec<String>,
    auth: &SessionAuth,
) -> String {
    for base in &candidates {
        if reachable(client, base, auth).await {
            tracing::debug!(%base, "Resolved API base");
            return base.clone();
        }
    }

    // Nothing answered; hand back the first candidate and let the caller
    // render the error.
    let first = candidates.into_iter().next().unwrap_or_else(|| {
        DEFAULT_API_BASE.to_string()
    });
    tracing::warn!(base = %first, "No API base reachable, falling back to first candidate");
    first
}

/// Probe one candidate.
///
/// Any HTTP status counts as reachable; only a connection-level failure
/// counts as unreachable. Other error kinds (DNS, TLS, timeout on an
/// established connection) are treated optimistically as reachable.
async fn reachable(client: &ApiClient, base: &str, auth: &SessionAuth) -> bool {
    let url = format!("{base}{PROBE_PATH}");
    match client.probe(&url, PROBE_TIMEOUT, auth).await {
        Ok(()) => true,
        Err(is_connect) => !is_connect,
    }
}
