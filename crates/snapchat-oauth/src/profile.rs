//! Snapchat profile normalization.
//!
//! Snap Kit answers profile queries with `{ "data": { "me": { ... } } }`.
//! Only the fields that were requested (and granted) are present, so every
//! attribute of the normalized profile is optional. Missing data is never an
//! error here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider identifier stamped on every profile.
pub const PROVIDER_NAME: &str = "snapchat";

/// The user's Bitmoji avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitmojiData {
    /// Unique Bitmoji avatar id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
    /// URL rendering the avatar sticker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Normalized Snapchat user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapchatProfile {
    /// Always `"snapchat"`
    pub provider: String,
    /// Snapchat external id (`externalId`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bitmoji: BitmojiData,

    /// Response body as received; set by a successful fetch
    #[serde(rename = "_raw", default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Parsed response body; set by a successful fetch
    #[serde(rename = "_json", default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl SnapchatProfile {
    /// Parse a response body string and normalize its `data.me` object.
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        let json: Value = serde_json::from_str(body)?;
        Ok(parse_response(&json))
    }
}

fn value_string(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| {
        if let Some(s) = v.as_str() {
            Some(s.to_string())
        } else if v.is_number() || v.is_boolean() {
            Some(v.to_string())
        } else {
            None
        }
    })
}

/// `value[key]` when it is an object, otherwise nothing.
fn object_member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| v.is_object())
}

/// Normalize a full response body (`{ data: { me: ... } }`).
pub fn parse_response(json: &Value) -> SnapchatProfile {
    match object_member(json, "data").and_then(|data| object_member(data, "me")) {
        Some(me) => parse_me(me),
        None => parse_me(&Value::Null),
    }
}

/// Normalize the `me` object of a response.
pub fn parse_me(me: &Value) -> SnapchatProfile {
    let bitmoji = object_member(me, "bitmoji")
        .map(|bitmoji| BitmojiData {
            avatar_id: value_string(bitmoji.get("id")),
            avatar_url: value_string(bitmoji.get("avatar")),
        })
        .unwrap_or_default();

    SnapchatProfile {
        provider: PROVIDER_NAME.to_string(),
        id: value_string(me.get("externalId")),
        display_name: value_string(me.get("displayName")),
        bitmoji,
        raw: None,
        json: None,
    }
}
