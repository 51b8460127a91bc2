//! Strategy options and their loaders.
//!
//! Options can come from a TOML document or from environment variables.
//!
//! # Environment Variables
//!
//! - `SNAPCHAT_CLIENT_ID`: OAuth client id (required)
//! - `SNAPCHAT_CLIENT_SECRET`: OAuth client secret (required)
//! - `SNAPCHAT_CALLBACK_URL`: redirect URL registered with Snap Kit (required)
//! - `SNAPCHAT_AUTHORIZATION_URL`, `SNAPCHAT_TOKEN_URL`, `SNAPCHAT_PROFILE_URL`: endpoint overrides
//! - `SNAPCHAT_PROFILE_FIELDS`: comma-separated profile fields (`id,displayName,bitmoji`)
//! - `SNAPCHAT_SCOPE`: scopes delimited by `SNAPCHAT_SCOPE_SEPARATOR` (default: space)
//! - `SNAPCHAT_PASS_CALLER_CONTEXT`: `true`/`1` to hand caller context to the verify step

use crate::error::ConfigError;
use crate::scope::ScopeList;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_AUTHORIZATION_URL: &str = "https://accounts.snapchat.com/accounts/oauth2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.snapchat.com/accounts/oauth2/token";
pub const DEFAULT_PROFILE_URL: &str = "https://kit.snapchat.com/v1/me";

/// Raw strategy options. Everything is optional here; validation and
/// defaults happen in [`crate::StrategyConfig::new`].
#[derive(Clone, Default, Deserialize)]
pub struct StrategyOptions {
    /// Authorization endpoint override
    #[serde(default)]
    pub authorization_url: Option<String>,
    /// URL Snapchat redirects to after the user grants access
    #[serde(default)]
    pub callback_url: Option<String>,
    /// Client id from the Snap Kit developer portal
    #[serde(default)]
    pub client_id: Option<String>,
    /// Confidential client secret
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Hand caller context to the verify step
    #[serde(default)]
    pub pass_caller_context: bool,
    /// Profile fields to query: `id`, `displayName`, `bitmoji` or raw fragments
    #[serde(default)]
    pub profile_fields: Option<Vec<String>>,
    /// Profile endpoint override
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub scope: Option<ScopeList>,
    /// Delimiter for `scope` when given as one string
    #[serde(default)]
    pub scope_separator: Option<String>,
    /// Token endpoint override
    #[serde(default)]
    pub token_url: Option<String>,
}

impl fmt::Debug for StrategyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyOptions")
            .field("authorization_url", &self.authorization_url)
            .field("callback_url", &self.callback_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("pass_caller_context", &self.pass_caller_context)
            .field("profile_fields", &self.profile_fields)
            .field("profile_url", &self.profile_url)
            .field("scope", &self.scope)
            .field("scope_separator", &self.scope_separator)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl StrategyOptions {
    /// Options with just the required credentials set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            callback_url: Some(callback_url.into()),
            ..Self::default()
        }
    }

    pub fn with_profile_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profile_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<ScopeList>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML options file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load options from `SNAPCHAT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let profile_fields = var("SNAPCHAT_PROFILE_FIELDS").map(|fields| {
            fields
                .split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect()
        });

        let pass_caller_context = var("SNAPCHAT_PASS_CALLER_CONTEXT")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self {
            authorization_url: var("SNAPCHAT_AUTHORIZATION_URL"),
            callback_url: var("SNAPCHAT_CALLBACK_URL"),
            client_id: var("SNAPCHAT_CLIENT_ID"),
            client_secret: var("SNAPCHAT_CLIENT_SECRET"),
            pass_caller_context,
            profile_fields,
            profile_url: var("SNAPCHAT_PROFILE_URL"),
            scope: var("SNAPCHAT_SCOPE").map(ScopeList::Delimited),
            // A separator of a single space must survive, so no blank filter here.
            scope_separator: lookup("SNAPCHAT_SCOPE_SEPARATOR").filter(|v| !v.is_empty()),
            token_url: var("SNAPCHAT_TOKEN_URL"),
        }
    }
}
