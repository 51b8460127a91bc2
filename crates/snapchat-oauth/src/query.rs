//! Snap Kit profile query construction.
//!
//! The profile endpoint takes a GraphQL selection in a `query` parameter:
//! `GET /v1/me?query={me{externalId displayName}}` (percent-encoded).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters left as-is when encoding a single URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as one query parameter value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// GraphQL selection for the given field tokens.
pub fn profile_query<S: AsRef<str>>(tokens: &[S]) -> String {
    let fields: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    format!("{{me{{{}}}}}", fields.join(" "))
}

/// Profile endpoint URL carrying the `query` parameter for `tokens`.
pub fn build_profile_url<S: AsRef<str>>(profile_url: &Url, tokens: &[S]) -> String {
    let param = format!("query={}", encode_component(&profile_query(tokens)));
    append_query(profile_url, &param)
}

/// Append already-encoded `params` to the URL's query string, keeping any
/// existing parameters and fragment.
pub(crate) fn append_query(base: &Url, params: &str) -> String {
    let query = match base.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, params),
        _ => params.to_string(),
    };
    let mut url = base.clone();
    url.set_query(Some(&query));
    url.into()
}
