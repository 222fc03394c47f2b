//! Error types for clinic API client operations.
//!
//! This module defines the error types that can occur when talking to the
//! clinic-management HTTP API through the clinic_client crate. It provides
//! error context for debugging and for the orchestration layer to decide
//! which failures are fatal and which are tolerated.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during clinic API client operations.
///
/// This enum represents all possible error conditions when working with the
/// clinic API, including transport failures, rejected requests, and response
/// payloads that do not match the expected envelope shape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server rejected a request for a reason other than a duplicate.
    ///
    /// Duplicate-resource rejections are not errors; they are resolved into
    /// [`crate::CreateOutcome::Duplicate`] at the client boundary. Anything
    /// else the server refuses surfaces here with the server's error text.
    #[error("API request to {route} failed: {message}")]
    Api {
        /// The logical route that was requested, e.g. `/departments`.
        route: String,
        /// The error text reported by the server.
        message: String,
    },

    /// Error deserializing a response value from the clinic API.
    ///
    /// This error occurs when a response envelope parses but a nested value
    /// (such as the user record inside the login response) cannot be
    /// converted into the expected data structure.
    #[error("Failed to deserialize clinic API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A transport-level failure while talking to the clinic API.
    ///
    /// This covers connection refusals, timeouts, and responses whose body
    /// could not be read or was not valid JSON at all. There is no retry;
    /// the caller decides whether the failure is fatal.
    #[error("HTTP request to the clinic API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("Invalid clinic API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Authentication with the clinic API failed.
    ///
    /// This error is returned when the login endpoint responds with a
    /// non-success status code or with `ok == false`. Login failures are
    /// never retried.
    #[error("Login failed for {email}: {message}")]
    LoginFailed {
        /// The email address that failed to authenticate.
        email: String,
        /// The error text or response body reported by the server.
        message: String,
    },

    /// The login response did not contain a CSRF token.
    ///
    /// Without a CSRF token no state-changing request can be made, so a
    /// session cannot be established.
    #[error("Login response did not contain a CSRF token")]
    MissingCsrfToken,

    /// A successful create response did not contain an identifier.
    ///
    /// The client tolerates two response shapes (an object keyed by resource
    /// name and flat top-level id fields); this error means both were
    /// absent.
    #[error("Create response for {resource} did not contain an identifier")]
    MissingId {
        /// The resource kind whose identifier was expected.
        resource: &'static str,
    },
}
