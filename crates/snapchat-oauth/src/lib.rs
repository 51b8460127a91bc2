//! Snapchat (Snap Kit Login) OAuth2 adapter.
//!
//! Authenticates users against Snapchat with the authorization-code flow and
//! normalizes their profile into a [`SnapchatProfile`]:
//! - `scope`: short scope names to Snap Kit scope URIs
//! - `fields`: profile field names to GraphQL query tokens
//! - `query`: profile endpoint URL with the `query` parameter
//! - `classify`: API error vs. transport error vs. malformed body
//! - `profile`: response normalization
//! - `client`: the OAuth2 HTTP seam and its reqwest implementation
//! - `strategy`: validated configuration and the login operations
//!
//! ```no_run
//! use snapchat_oauth::{Strategy, StrategyOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let strategy = Strategy::new(
//!     StrategyOptions::new("client-id", "client-secret", "https://example.net/auth/snapchat/callback")
//!         .with_profile_fields(["id", "displayName", "bitmoji"])
//!         .with_scope(["user.display_name", "user.bitmoji.avatar"]),
//! )?;
//!
//! let redirect_to = strategy.authorization_url(Some("opaque-state"));
//! # let _ = redirect_to;
//! let profile = strategy.user_profile("access-token").await?;
//! println!("{:?}", profile.display_name);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod profile;
pub mod query;
pub mod scope;
pub mod strategy;

pub use client::{HttpOAuth2Client, OAuth2Client, OAuthTokenResponse, TokenRequest};
pub use config::StrategyOptions;
pub use error::{ApiErrorCode, AuthError, ConfigError, OAuthRequestError, ProfileError};
pub use profile::{BitmojiData, SnapchatProfile, PROVIDER_NAME};
pub use scope::ScopeList;
pub use strategy::{Strategy, StrategyConfig, Verified};
