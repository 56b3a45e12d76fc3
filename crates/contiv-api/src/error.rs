use thiserror::Error;

/// Top-level error type for the `contiv-api` crate.
///
/// The controller's answers are deliberately collapsed: any status other
/// than `200 OK` becomes [`Error::Api`], whether the resource was missing,
/// already existed, or the controller crashed. Only the status code and the
/// raw body are kept for the caller to inspect.
#[derive(Debug, Error)]
pub enum Error {
    // ── Controller ──────────────────────────────────────────────────
    /// The controller answered with something other than HTTP 200.
    #[error("Contiv API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    // ── Authentication ──────────────────────────────────────────────
    /// Login succeeded at the HTTP level but produced no usable token,
    /// or the stored token could not be accessed.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller rejected the request (non-200 answer).
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for transport failures that never reached the controller
    /// or timed out waiting for it.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
