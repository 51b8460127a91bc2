//! OAuth2 HTTP client seam.
//!
//! The strategy only needs two calls from an OAuth2 client: the
//! authorization-code exchange and a GET authorized with the access token.
//! [`HttpOAuth2Client`] implements both on top of reqwest; tests and hosts
//! with their own HTTP stack implement [`OAuth2Client`] directly.

use crate::error::OAuthRequestError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub extra: Value,
}

/// Parameters of an authorization-code grant.
#[derive(Clone, Copy)]
pub struct TokenRequest<'a> {
    pub token_url: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub code: &'a str,
}

impl std::fmt::Debug for TokenRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

/// Minimal OAuth2 client used by [`crate::Strategy`].
///
/// Each call resolves exactly once, with either a body or an error.
pub trait OAuth2Client: Send + Sync {
    /// GET `url` with the access token in the `Authorization` header.
    /// Returns the raw response body.
    fn get(
        &self,
        url: &str,
        access_token: &str,
    ) -> impl Future<Output = Result<String, OAuthRequestError>> + Send;

    /// Exchange an authorization code for tokens.
    fn exchange_code(
        &self,
        request: TokenRequest<'_>,
    ) -> impl Future<Output = Result<OAuthTokenResponse, OAuthRequestError>> + Send;
}

/// reqwest-backed [`OAuth2Client`].
///
/// No timeout is applied here; pass a configured [`Client`] to
/// [`HttpOAuth2Client::new`] to bound request time.
#[derive(Debug, Clone, Default)]
pub struct HttpOAuth2Client {
    client: Client,
}

impl HttpOAuth2Client {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn read_body(res: reqwest::Response) -> Result<String, OAuthRequestError> {
        let status = res.status();
        let body = res.text().await.map_err(OAuthRequestError::transport)?;
        if !status.is_success() {
            return Err(OAuthRequestError::status(status.as_u16(), body));
        }
        Ok(body)
    }
}

impl OAuth2Client for HttpOAuth2Client {
    async fn get(&self, url: &str, access_token: &str) -> Result<String, OAuthRequestError> {
        let res = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(OAuthRequestError::transport)?;

        Self::read_body(res).await
    }

    async fn exchange_code(
        &self,
        request: TokenRequest<'_>,
    ) -> Result<OAuthTokenResponse, OAuthRequestError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", request.code),
            ("redirect_uri", request.redirect_uri),
            ("client_id", request.client_id),
            ("client_secret", request.client_secret),
        ];

        let res = self
            .client
            .post(request.token_url)
            .form(&params)
            .send()
            .await
            .map_err(OAuthRequestError::transport)?;

        let body = Self::read_body(res).await?;
        serde_json::from_str::<OAuthTokenResponse>(&body).map_err(OAuthRequestError::transport)
    }
}
