//! Request-scoped authentication state.
//!
//! The site keeps one [`SessionAuth`] per browser session and passes it
//! explicitly into every data call. A session token (obtained via login)
//! takes priority over the service-level token from configuration; with
//! neither, calls go out anonymously and the API grants read-only access.

use serde::{Deserialize, Serialize};

/// Cached profile of the authenticated API user, as returned by `/me/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub groups: Vec<String>,
}

/// Per-session authentication state: an opaque API token and the cached
/// user profile. Both are cleared together on logout.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    /// Token obtained via `/api-token-auth/`, if the user logged in.
    pub token: Option<String>,
    /// Cached `/me/` profile for the token above.
    pub user: Option<ApiUser>,
}

impl SessionAuth {
    /// A session with no credentials of its own.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Store a freshly obtained token (profile cached separately).
    pub fn login(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
    }

    /// Drop the token and cached profile together.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// The token to send: the session's own, else the given service-level
    /// fallback, else none (anonymous).
    pub fn effective_token<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        self.token.as_deref().or(fallback)
    }

    /// Whether any credential would be attached to outgoing calls.
    pub fn has_token(&self, fallback: Option<&str>) -> bool {
        self.effective_token(fallback).is_some()
    }
}
