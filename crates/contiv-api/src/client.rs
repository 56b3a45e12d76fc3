// Contiv HTTP client
//
// Wraps `reqwest::Client` with Contiv URL construction, auth-token
// injection, and the controller's all-or-nothing status handling.
// Resource endpoints (tenants, policies, endpoint groups) are inherent
// methods implemented in separate files; this module only carries the
// transport mechanics.

use std::sync::RwLock;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::ConnectionConfig;

/// Header carrying the token issued by `auth_proxy/login`.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Path prefix of every REST endpoint, relative to the controller root.
const API_PREFIX: &str = "api/v1";

/// Client for one Contiv controller.
///
/// Holds the credentials and the token obtained at login. The token is
/// written once by [`login`](Self::login) and never refreshed; a client whose
/// login failed keeps working but sends no `X-Auth-Token` header, so the
/// controller will reject its requests.
pub struct ContivClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for ContivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContivClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

impl ContivClient {
    /// Create a client from a `ConnectionConfig` without logging in.
    ///
    /// Use [`connect`](Self::connect) for the usual build-then-login flow.
    pub fn new(config: &ConnectionConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(
            http,
            config.base_url.clone(),
            config.username.clone(),
            config.password.clone(),
        ))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller is responsible for the transport settings (TLS, timeout).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            token: RwLock::new(None),
        }
    }

    /// The controller root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The user this client logs in as.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    // ── Token management ─────────────────────────────────────────────

    /// Whether a login has stored a token.
    pub fn has_token(&self) -> bool {
        self.token.read().is_ok_and(|guard| guard.is_some())
    }

    pub(crate) fn set_token(&self, token: String) -> Result<(), Error> {
        let mut guard = self.token.write().map_err(|_| Error::Authentication {
            message: "token lock poisoned".into(),
        })?;
        *guard = Some(token);
        debug!("stored auth token");
        Ok(())
    }

    /// Attach the stored token, if any.
    fn apply_token(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().map_err(|_| Error::Authentication {
            message: "token lock poisoned".into(),
        })?;
        Ok(match guard.as_deref() {
            Some(token) => builder.header(AUTH_TOKEN_HEADER, token),
            None => builder,
        })
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/v1/{path}/`. The controller insists on the
    /// trailing slash.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_matches('/');
        Ok(Url::parse(&format!("{base}/{API_PREFIX}/{path}/"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST without the auth header. Only login goes through here.
    pub(crate) async fn post_unauthenticated<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// POST a JSON body and parse the JSON answer.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");

        let builder = self.apply_token(self.http.post(url).json(body))?;
        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    /// PUT a JSON body and parse the JSON answer.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {url}");

        let builder = self.apply_token(self.http.put(url).json(body))?;
        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    /// DELETE; the answer body is ignored on success.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {url}");

        let builder = self.apply_token(
            self.http
                .delete(url)
                .header(CONTENT_TYPE, "application/json"),
        )?;
        let resp = builder.send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Self::rejected(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(Self::rejected(status, resp).await)
        }
    }

    /// Anything but 200 is a rejection. Logged once, with the raw body.
    async fn rejected(status: StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "contiv request rejected: {body}");
        Error::Api {
            status: status.as_u16(),
            body,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ContivClient {
        ContivClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            "admin".into(),
            SecretString::from("admin"),
        )
    }

    #[test]
    fn api_url_appends_prefix_and_trailing_slash() {
        let c = client("https://contiv:10000");
        assert_eq!(
            c.api_url("tenants/tenant2").unwrap().as_str(),
            "https://contiv:10000/api/v1/tenants/tenant2/"
        );
        assert_eq!(
            c.api_url("networks/t1:t1-net").unwrap().as_str(),
            "https://contiv:10000/api/v1/networks/t1:t1-net/"
        );
    }

    #[test]
    fn api_url_keeps_base_path_prefix() {
        let c = client("https://proxy.local/contiv/");
        assert_eq!(
            c.api_url("auth_proxy/login").unwrap().as_str(),
            "https://proxy.local/contiv/api/v1/auth_proxy/login/"
        );
    }

    #[test]
    fn token_starts_unset() {
        let c = client("https://contiv:10000");
        assert!(!c.has_token());
        c.set_token("abc".into()).unwrap();
        assert!(c.has_token());
    }

    #[test]
    fn debug_output_hides_credentials() {
        let c = client("https://contiv:10000");
        c.set_token("secret-token".into()).unwrap();
        let out = format!("{c:?}");
        assert!(out.contains("has_token: true"));
        assert!(!out.contains("secret-token"));
        assert!(!out.contains("password"));
    }
}
