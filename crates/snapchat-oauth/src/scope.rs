//! Snapchat OAuth2 scopes.
//!
//! Snap Kit scopes are full URIs (`https://auth.snapchat.com/oauth2/api/user.display_name`).
//! Callers may pass the short form (`user.display_name`); it is expanded here.

use serde::{Deserialize, Serialize};

/// Prefix shared by every Snap Kit scope URI.
pub const SCOPE_URI_PREFIX: &str = "https://auth.snapchat.com/oauth2/api/";

/// Default delimiter for scopes given as a single string.
pub const DEFAULT_SCOPE_SEPARATOR: &str = " ";

/// Scopes as they appear in configuration: one delimited string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeList {
    Delimited(String),
    List(Vec<String>),
}

impl Default for ScopeList {
    fn default() -> Self {
        ScopeList::List(Vec::new())
    }
}

impl ScopeList {
    /// Split into individual scope entries. The separator only applies to
    /// the delimited form.
    pub fn split(&self, separator: &str) -> Vec<String> {
        match self {
            ScopeList::Delimited(scopes) => {
                let separator = if separator.is_empty() {
                    DEFAULT_SCOPE_SEPARATOR
                } else {
                    separator
                };
                scopes.split(separator).map(str::to_string).collect()
            }
            ScopeList::List(scopes) => scopes.clone(),
        }
    }
}

impl From<&str> for ScopeList {
    fn from(scopes: &str) -> Self {
        ScopeList::Delimited(scopes.to_string())
    }
}

impl From<Vec<String>> for ScopeList {
    fn from(scopes: Vec<String>) -> Self {
        ScopeList::List(scopes)
    }
}

impl<const N: usize> From<[&str; N]> for ScopeList {
    fn from(scopes: [&str; N]) -> Self {
        ScopeList::List(scopes.iter().map(|s| s.to_string()).collect())
    }
}

/// Expand a short scope name into its full URI. Already-qualified scopes
/// are returned unchanged.
pub fn normalize_scope(scope: &str) -> String {
    if scope.starts_with("https:") {
        scope.to_string()
    } else {
        format!("{}{}", SCOPE_URI_PREFIX, scope)
    }
}

/// Normalize every scope, dropping blank entries.
pub fn normalize_scopes<I, S>(scopes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scopes
        .into_iter()
        .filter_map(|scope| {
            let scope = scope.as_ref();
            (!scope.trim().is_empty()).then(|| normalize_scope(scope))
        })
        .collect()
}
