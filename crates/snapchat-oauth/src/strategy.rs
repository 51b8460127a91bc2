//! The Snapchat login strategy.
//!
//! [`StrategyConfig`] is validated once from [`StrategyOptions`]; [`Strategy`]
//! pairs it with an [`OAuth2Client`] and implements the login steps:
//!
//! 1. [`Strategy::authorization_url`] - where to redirect the user
//! 2. [`Strategy::authenticate`] - exchange the returned code, fetch the
//!    profile, hand both to the caller's verify step
//! 3. [`Strategy::user_profile`] - fetch and normalize the profile for an
//!    access token

use crate::classify::classify;
use crate::client::{HttpOAuth2Client, OAuth2Client, OAuthTokenResponse, TokenRequest};
use crate::config::{
    StrategyOptions, DEFAULT_AUTHORIZATION_URL, DEFAULT_PROFILE_URL, DEFAULT_TOKEN_URL,
};
use crate::error::{AuthError, ConfigError, ProfileError};
use crate::fields::field_tokens;
use crate::profile::{parse_response, SnapchatProfile, PROVIDER_NAME};
use crate::query::{append_query, build_profile_url, encode_component};
use crate::scope::{normalize_scopes, DEFAULT_SCOPE_SEPARATOR};
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};
use url::Url;

/// Validated, immutable strategy configuration.
#[derive(Clone)]
pub struct StrategyConfig {
    client_id: String,
    client_secret: String,
    callback_url: String,
    authorization_url: Url,
    token_url: Url,
    profile_url: Url,
    profile_fields: Vec<String>,
    scopes: Vec<String>,
    scope_separator: String,
    pass_caller_context: bool,
}

fn required(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn endpoint(field: &'static str, value: Option<&str>, default: &str) -> Result<Url, ConfigError> {
    let raw = value.filter(|v| !v.trim().is_empty()).unwrap_or(default);
    Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        message: format!("'{}' is not an absolute URL: {}", raw, e),
    })
}

impl StrategyConfig {
    /// Validate options and fill in defaults.
    ///
    /// Fails when `client_id`, `client_secret` or `callback_url` is missing
    /// or blank, or when an endpoint override is not an absolute URL.
    pub fn new(options: StrategyOptions) -> Result<Self, ConfigError> {
        let (Some(client_id), Some(client_secret), Some(callback_url)) = (
            required(&options.client_id),
            required(&options.client_secret),
            required(&options.callback_url),
        ) else {
            let fields = [
                ("client_id", &options.client_id),
                ("client_secret", &options.client_secret),
                ("callback_url", &options.callback_url),
            ]
            .into_iter()
            .filter(|(_, value)| required(value).is_none())
            .map(|(name, _)| name)
            .collect();
            return Err(ConfigError::MissingRequiredFields { fields });
        };

        let scope_separator = options
            .scope_separator
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SCOPE_SEPARATOR.to_string());
        let scopes = options
            .scope
            .map(|scope| normalize_scopes(scope.split(&scope_separator)))
            .unwrap_or_default();

        Ok(Self {
            client_id,
            client_secret,
            callback_url,
            authorization_url: endpoint(
                "authorization_url",
                options.authorization_url.as_deref(),
                DEFAULT_AUTHORIZATION_URL,
            )?,
            token_url: endpoint("token_url", options.token_url.as_deref(), DEFAULT_TOKEN_URL)?,
            profile_url: endpoint(
                "profile_url",
                options.profile_url.as_deref(),
                DEFAULT_PROFILE_URL,
            )?,
            profile_fields: field_tokens(options.profile_fields.unwrap_or_default()),
            scopes,
            scope_separator,
            pass_caller_context: options.pass_caller_context,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn authorization_url(&self) -> &Url {
        &self.authorization_url
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn profile_url(&self) -> &Url {
        &self.profile_url
    }

    /// Query tokens of the requested profile fields, in request order.
    pub fn profile_fields(&self) -> &[String] {
        &self.profile_fields
    }

    /// Fully-qualified scope URIs.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn scope_separator(&self) -> &str {
        &self.scope_separator
    }

    pub fn pass_caller_context(&self) -> bool {
        self.pass_caller_context
    }
}

impl fmt::Debug for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("callback_url", &self.callback_url)
            .field("authorization_url", &self.authorization_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("profile_url", &self.profile_url.as_str())
            .field("profile_fields", &self.profile_fields)
            .field("scopes", &self.scopes)
            .field("scope_separator", &self.scope_separator)
            .field("pass_caller_context", &self.pass_caller_context)
            .finish()
    }
}

/// Everything the verify step receives after a successful login.
#[derive(Debug, Clone)]
pub struct Verified<Ctx> {
    /// Caller context; `Some` only with `pass_caller_context` enabled
    pub context: Option<Ctx>,
    pub tokens: OAuthTokenResponse,
    pub profile: SnapchatProfile,
}

impl<Ctx> Verified<Ctx> {
    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.refresh_token.as_deref()
    }
}

/// Snapchat OAuth2 login strategy.
#[derive(Debug, Clone)]
pub struct Strategy<C = HttpOAuth2Client> {
    config: StrategyConfig,
    client: C,
}

impl Strategy<HttpOAuth2Client> {
    /// Strategy backed by a default reqwest client.
    pub fn new(options: StrategyOptions) -> Result<Self, ConfigError> {
        Self::with_client(options, HttpOAuth2Client::default())
    }
}

impl<C: OAuth2Client> Strategy<C> {
    pub fn with_client(options: StrategyOptions, client: C) -> Result<Self, ConfigError> {
        Ok(Self {
            config: StrategyConfig::new(options)?,
            client,
        })
    }

    /// Strategy name as registered with the host middleware.
    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Profile endpoint URL selecting the configured fields.
    pub fn profile_request_url(&self) -> String {
        build_profile_url(&self.config.profile_url, self.config.profile_fields.as_slice())
    }

    /// URL to redirect the user to for consent.
    pub fn authorization_url(&self, state: Option<&str>) -> String {
        let mut params = vec![("response_type", "code".to_string())];
        params.push(("redirect_uri", encode_component(&self.config.callback_url)));
        if !self.config.scopes.is_empty() {
            let scope = self.config.scopes.join(&self.config.scope_separator);
            params.push(("scope", encode_component(&scope)));
        }
        if let Some(state) = state {
            params.push(("state", encode_component(state)));
        }
        params.push(("client_id", encode_component(&self.config.client_id)));

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        append_query(&self.config.authorization_url, &query)
    }

    /// Fetch and normalize the profile of the user owning `access_token`.
    ///
    /// One request, no retries. The returned profile carries the raw body
    /// and its parsed JSON.
    #[tracing::instrument(skip_all, fields(provider = PROVIDER_NAME))]
    pub async fn user_profile(&self, access_token: &str) -> Result<SnapchatProfile, ProfileError> {
        let url = self.profile_request_url();
        debug!(url = %url, "Fetching Snapchat profile");

        let response = match classify(self.client.get(&url, access_token).await) {
            Ok(response) => response,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Snapchat profile fetch failed");
                return Err(err);
            }
        };

        let mut profile = parse_response(&response.json);
        profile.raw = Some(response.raw);
        profile.json = Some(response.json);

        debug!(
            has_id = profile.id.is_some(),
            has_display_name = profile.display_name.is_some(),
            has_bitmoji = profile.bitmoji.avatar_url.is_some(),
            "Snapchat profile fetched"
        );
        Ok(profile)
    }

    /// Complete a login: exchange `code`, fetch the profile and run `verify`.
    ///
    /// `context` reaches `verify` only when `pass_caller_context` is enabled.
    #[tracing::instrument(skip_all, fields(provider = PROVIDER_NAME))]
    pub async fn authenticate<Ctx, F, Fut, U>(
        &self,
        code: &str,
        context: Ctx,
        verify: F,
    ) -> Result<U, AuthError>
    where
        F: FnOnce(Verified<Ctx>) -> Fut,
        Fut: Future<Output = Result<U, AuthError>>,
    {
        let request = TokenRequest {
            token_url: self.config.token_url.as_str(),
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            redirect_uri: &self.config.callback_url,
            code,
        };
        let tokens = self.client.exchange_code(request).await.map_err(|e| {
            warn!(status = ?e.status_code, error = %e, "Snapchat token exchange failed");
            AuthError::TokenExchange(e)
        })?;

        let profile = self.user_profile(&tokens.access_token).await?;

        verify(Verified {
            context: self.config.pass_caller_context.then_some(context),
            tokens,
            profile,
        })
        .await
    }
}
