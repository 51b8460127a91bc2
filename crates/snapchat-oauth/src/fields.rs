//! Profile field names to Snap Kit GraphQL field tokens.

/// Canonical field names and the query token each one selects.
const FIELD_TOKENS: &[(&str, &str)] = &[
    ("id", "externalId"),
    ("displayName", "displayName"),
    ("bitmoji", "bitmoji{avatar id}"),
];

/// Map one profile field to its query token. Unknown fields are raw query
/// fragments (e.g. `bitmoji{avatar}`) and pass through unchanged.
pub fn field_token(field: &str) -> &str {
    FIELD_TOKENS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, token)| *token)
        .unwrap_or(field)
}

/// Map a list of profile fields, preserving order and dropping empty entries.
pub fn field_tokens<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| field_token(field.as_ref()).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}
