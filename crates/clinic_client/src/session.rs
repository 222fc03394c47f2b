//! Authenticated session state for the clinic API.
//!
//! A [`Session`] is an explicit value created by a successful login and
//! passed to every authenticated call. There is no process-global session:
//! logging in again produces a fresh session that replaces the previous one
//! at the call site, so at most one identity is active per flow at a time.

use reqwest::header::{self, HeaderMap};
use reqwest::RequestBuilder;

use crate::models::UserInfo;

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// An authenticated session with the clinic API.
///
/// Holds the CSRF token and session cookie issued by the most recent login,
/// along with the authenticated user record. Every state-changing request
/// must carry both the cookie and the CSRF token; [`Session::authenticate`]
/// attaches them.
#[derive(Debug, Clone)]
pub struct Session {
    csrf_token: String,
    cookies: String,
    user: UserInfo,
}

impl Session {
    pub(crate) fn new(csrf_token: String, cookies: String, user: UserInfo) -> Self {
        Self {
            csrf_token,
            cookies,
            user,
        }
    }

    /// The user this session was issued for.
    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    /// The CSRF token issued by the login endpoint.
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Attaches the session cookie and CSRF token to a request.
    pub fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CSRF_HEADER, &self.csrf_token);
        if self.cookies.is_empty() {
            request
        } else {
            request.header(header::COOKIE, &self.cookies)
        }
    }
}

/// Collects the `name=value` pairs from the `Set-Cookie` headers of a login
/// response into a single `Cookie` header value.
///
/// Attributes after the first `;` (path, expiry, flags) are dropped; only
/// the cookie pair itself is replayed on subsequent requests.
pub(crate) fn collect_cookie_pairs(headers: &HeaderMap) -> String {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| raw.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
