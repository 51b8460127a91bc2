//! Classification of profile endpoint outcomes.
//!
//! | outcome                                                  | result              |
//! |----------------------------------------------------------|---------------------|
//! | error, JSON body with `error` + `error_description`      | `Api` (provider code) |
//! | error, any other body plus an HTTP status                | `Api` (status code) |
//! | error, nothing else                                      | `Transport`         |
//! | body that is not JSON                                    | `Parse`             |
//! | JSON body                                                | success             |

use crate::error::{ApiErrorCode, OAuthRequestError, ProfileError};
use serde_json::Value;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch user profile";

/// Successfully decoded profile response.
#[derive(Debug, Clone)]
pub struct ProfileResponse {
    pub raw: String,
    pub json: Value,
}

/// JavaScript-style truthiness: present, non-null, non-empty, non-zero, non-false.
fn truthy_string(value: Option<&Value>) -> Option<String> {
    let value = value?;
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn structured_api_error(data: &str) -> Option<ProfileError> {
    let json: Value = serde_json::from_str(data).ok()?;
    let code = truthy_string(json.get("error"))?;
    let message = truthy_string(json.get("error_description"))?;
    Some(ProfileError::Api {
        message,
        code: ApiErrorCode::Provider(code),
    })
}

/// Classify a failed profile request.
pub fn classify_error(err: OAuthRequestError) -> ProfileError {
    if let Some(data) = err.data.as_deref().filter(|d| !d.is_empty()) {
        if let Some(api_error) = structured_api_error(data) {
            return api_error;
        }
        if let Some(status) = err.status_code.filter(|s| *s != 0) {
            return ProfileError::Api {
                message: data.to_string(),
                code: ApiErrorCode::Status(status),
            };
        }
    }

    ProfileError::Transport {
        message: FETCH_FAILED_MESSAGE.to_string(),
        cause: err,
    }
}

/// Classify a delivered response body.
pub fn classify_body(body: String) -> Result<ProfileResponse, ProfileError> {
    match serde_json::from_str::<Value>(&body) {
        Ok(json) => Ok(ProfileResponse { raw: body, json }),
        Err(e) => Err(ProfileError::Parse {
            message: format!("Failed to parse user profile with error: {}", e),
            cause: e,
        }),
    }
}

/// Classify the outcome of the authenticated GET.
pub fn classify(outcome: Result<String, OAuthRequestError>) -> Result<ProfileResponse, ProfileError> {
    match outcome {
        Ok(body) => classify_body(body),
        Err(err) => Err(classify_error(err)),
    }
}
