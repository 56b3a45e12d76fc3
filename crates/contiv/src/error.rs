//! CLI error types with miette diagnostics.
//!
//! Maps `contiv_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use contiv_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(contiv::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Override the address with --host/--port or --url."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(contiv::tls_error),
        help("Check the PEM bundle passed with --ca-cert or set in ca_cert.")
    )]
    Tls { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(contiv::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(contiv::auth_failed),
        help(
            "Verify the user and password.\n\
             Set CONTIV_PASSWORD, store it in the keyring, or use --ask-password."
        )
    )]
    AuthFailed { message: String },

    // ── Controller answers ───────────────────────────────────────────
    #[error("Controller rejected the request (HTTP {status})")]
    #[diagnostic(code(contiv::rejected), help("Controller said: {body}"))]
    Rejected { status: u16, body: String },

    #[error("Unexpected controller answer: {message}")]
    #[diagnostic(code(contiv::unexpected_answer), help("Raw body: {body}"))]
    UnexpectedAnswer { message: String, body: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(contiv::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(contiv::config),
        help("Run: contiv config show to inspect the effective settings")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(contiv::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(contiv::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Rejected { status, .. } => match status {
                401 | 403 => exit_code::AUTH,
                404 => exit_code::NOT_FOUND,
                409 => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. } | Self::Config(ConfigError::Validation { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── contiv_api::Error → CliError mapping ─────────────────────────────

impl From<contiv_api::Error> for CliError {
    fn from(err: contiv_api::Error) -> Self {
        use contiv_api::Error;

        match err {
            err if err.is_timeout() => Self::Timeout,
            Error::Api { status, body } => Self::Rejected { status, body },
            Error::Authentication { message } => Self::AuthFailed { message },
            Error::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            Error::InvalidUrl(e) => Self::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            Error::Tls(message) => Self::Tls { message },
            Error::Deserialization { message, body } => {
                Self::UnexpectedAnswer { message, body }
            }
        }
    }
}
