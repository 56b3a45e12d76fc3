// Contiv authentication
//
// Username/password login against the controller's auth proxy. The
// returned token is stored on the client and sent as `X-Auth-Token` on
// every later request. There is no refresh: an expired token stays
// expired until a new client logs in.

use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use crate::client::ContivClient;
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse};
use crate::transport::ConnectionConfig;

const LOGIN_PATH: &str = "auth_proxy/login";

impl ContivClient {
    /// Build a client and log in.
    ///
    /// A login the controller rejects (any non-200 answer), or one that
    /// yields an empty token, does not fail construction: the client comes
    /// back without a token. Transport failures and login answers without a
    /// `token` field are returned as errors.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
        let client = Self::new(config)?;
        match client.login().await {
            Ok(()) => {}
            Err(err) if err.is_rejected() => {
                info!(
                    url = %client.base_url(),
                    "login rejected, continuing without auth token"
                );
            }
            Err(Error::Authentication { message }) => {
                warn!(
                    url = %client.base_url(),
                    "{message}, continuing without auth token"
                );
            }
            Err(err) => return Err(err),
        }
        Ok(client)
    }

    /// Authenticate with the configured username and password.
    ///
    /// `POST /api/v1/auth_proxy/login/` with `{"username", "password"}`,
    /// sent without an auth header. On success the `token` field of the
    /// answer is stored on the client.
    pub async fn login(&self) -> Result<(), Error> {
        debug!(username = %self.username(), "logging in");

        let body = LoginRequest {
            username: self.username(),
            password: self.password().expose_secret(),
        };
        let resp: LoginResponse = self.post_unauthenticated(LOGIN_PATH, &body).await?;

        if resp.token.is_empty() {
            return Err(Error::Authentication {
                message: "controller issued an empty token".into(),
            });
        }

        self.set_token(resp.token)?;
        debug!("login successful");
        Ok(())
    }
}
