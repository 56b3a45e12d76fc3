//! Shared configuration for Contiv tools.
//!
//! Layered settings (built-in defaults, TOML file, `CONTIV_*` environment,
//! explicit overrides), password resolution (config, keyring, default) and
//! translation to `contiv_api::ConnectionConfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use contiv_api::{ConnectionConfig, TlsMode, TransportConfig};

/// Prefix of the environment variables read by [`load_config`].
pub const ENV_PREFIX: &str = "CONTIV_";

/// Keyring service name under which passwords are looked up.
pub const KEYRING_SERVICE: &str = "contiv";

const DEFAULT_PASSWORD: &str = "admin";

/// Settings read from the environment exactly as written. Figment would
/// otherwise turn `0123` into `123` or `true` into a boolean.
const VERBATIM_ENV_KEYS: [&str; 3] = ["host", "user", "password"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Connection settings for one Contiv controller.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Controller host name or address.
    #[serde(default = "default_host", deserialize_with = "scalar_string")]
    pub host: String,

    /// Controller API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user.
    #[serde(default = "default_user", deserialize_with = "scalar_string")]
    pub user: String,

    /// Login password (plaintext; prefer the keyring or `CONTIV_PASSWORD`).
    #[serde(
        default,
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<String>,

    /// Full controller root URL. Overrides `https://{host}:{port}` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// PEM bundle to verify the controller certificate against. Without it,
    /// any certificate is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Verify the controller certificate against the system store when no
    /// `ca_cert` is given.
    #[serde(default)]
    pub verify_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: None,
            url: None,
            timeout: default_timeout(),
            ca_cert: None,
            verify_tls: false,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("ca_cert", &self.ca_cert)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

fn default_host() -> String {
    "contiv".into()
}
fn default_port() -> u16 {
    10000
}
fn default_user() -> String {
    "admin".into()
}
fn default_timeout() -> u64 {
    30
}

/// A TOML or env scalar that should be read as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer).map(|s| s.map(Scalar::into_string))
}

/// Values that take priority over file and environment (e.g. CLI flags).
/// `None` fields leave the lower layers untouched.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_tls: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "contiv", "contiv").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("contiv");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, TOML file, `CONTIV_*` env, overrides.
///
/// `CONTIV_HOST`, `CONTIV_USER` and `CONTIV_PASSWORD` are taken as plain
/// strings; the other variables are parsed as figment values.
pub fn figment(path: &Path, overrides: &Overrides) -> Figment {
    let verbatim: BTreeMap<String, String> = Env::prefixed(ENV_PREFIX)
        .only(&VERBATIM_ENV_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_owned(), value))
        .collect();

    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_ENV_KEYS))
        .merge(Serialized::defaults(verbatim))
        .merge(Serialized::defaults(overrides))
}

/// Load the config from `path` (or the platform default path) plus env.
///
/// A missing file is not an error; the defaults and environment apply.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<Config, ConfigError> {
    let default_path;
    let path = if let Some(path) = path {
        path
    } else {
        default_path = config_path();
        &default_path
    };
    debug!(path = %path.display(), "loading config");

    let config: Config = figment(path, overrides).extract()?;
    Ok(config)
}

// ── Resolution ──────────────────────────────────────────────────────

impl Config {
    /// Controller root URL: `url` if set, else `https://{host}:{port}`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .url
            .clone()
            .unwrap_or_else(|| format!("https://{}:{}", self.host, self.port));
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {raw}"),
        })
    }

    /// Transport settings: custom CA if configured, else the system store
    /// when `verify_tls` is set, otherwise accept any certificate.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.ca_cert {
            Some(path) => TlsMode::CustomCa(path.clone()),
            None if self.verify_tls => TlsMode::System,
            None => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// Keyring account name for this controller's password.
    pub fn keyring_account(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Resolve the login password.
    ///
    /// 1. `password` from file / env / overrides
    /// 2. System keyring (`contiv` / `{user}@{host}`)
    /// 3. The controller's factory default
    pub fn resolve_password(&self) -> SecretString {
        if let Some(ref pw) = self.password {
            return SecretString::from(pw.clone());
        }

        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &self.keyring_account()) {
            if let Ok(pw) = entry.get_password() {
                debug!(account = %self.keyring_account(), "password taken from keyring");
                return SecretString::from(pw);
            }
        }

        SecretString::from(DEFAULT_PASSWORD)
    }

    /// Build the `ConnectionConfig` the client is constructed from.
    pub fn to_connection_config(&self) -> Result<ConnectionConfig, ConfigError> {
        Ok(ConnectionConfig {
            base_url: self.base_url()?,
            username: self.user.clone(),
            password: self.resolve_password(),
            transport: self.transport(),
        })
    }

    /// A copy safe to display: the password, if any, is masked.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| "********".into()),
            ..self.clone()
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
