use serde_json::json;
use snapchat_oauth::{
    ApiErrorCode, AuthError, ProfileError, SnapchatProfile, Strategy, StrategyOptions,
};
use std::error::Error as _;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ME: &str = include_str!("fixtures/me.json");
const ME_BITMOJI_AVATAR_ONLY: &str = include_str!("fixtures/me_bitmoji_avatar_only.json");
const ME_DISPLAY_NAME_ONLY: &str = include_str!("fixtures/me_display_name_only.json");
const ME_NO_SCOPES: &str = include_str!("fixtures/me_no_scopes.json");

const AVATAR_URL: &str =
    "https://render.bitstrips.com/v2/cpanel/sticker-circle-bitmoji-id.png?transparent=1&palette=1";

fn options_for(server: &MockServer) -> StrategyOptions {
    StrategyOptions::new("ABC123", "secret", "https://www.example.net/auth/snapchat/callback")
        .with_profile_url(format!("{}/v1/me", server.uri()))
}

async fn mount_profile(server: &MockServer, selection: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(query_param("query", selection))
        .and(header("authorization", "Bearer token"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn profile_with_mapped_fields() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "{me{externalId displayName bitmoji{avatar id}}}",
        ResponseTemplate::new(200).set_body_string(ME),
    )
    .await;

    let strategy =
        Strategy::new(options_for(&server).with_profile_fields(["id", "displayName", "bitmoji"]))
            .expect("strategy should build");
    let profile = strategy.user_profile("token").await.expect("profile should load");

    assert_eq!(profile.provider, "snapchat");
    assert_eq!(profile.id.as_deref(), Some("my-external-id"));
    assert_eq!(profile.display_name.as_deref(), Some("Ghostface Chillah"));
    assert_eq!(profile.bitmoji.avatar_id.as_deref(), Some("my-bitmoji-id"));
    assert_eq!(profile.bitmoji.avatar_url.as_deref(), Some(AVATAR_URL));
    assert_eq!(profile.raw.as_deref(), Some(ME));
    assert!(profile.json.as_ref().is_some_and(|j| j.is_object()));
}

#[tokio::test]
async fn profile_with_raw_query_fragment() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "{me{externalId displayName bitmoji{avatar}}}",
        ResponseTemplate::new(200).set_body_string(ME_BITMOJI_AVATAR_ONLY),
    )
    .await;

    let strategy = Strategy::new(
        options_for(&server).with_profile_fields(["id", "displayName", "bitmoji{avatar}"]),
    )
    .unwrap();
    let profile = strategy.user_profile("token").await.unwrap();

    assert_eq!(profile.id.as_deref(), Some("my-external-id"));
    assert!(profile.bitmoji.avatar_id.is_none());
    assert_eq!(profile.bitmoji.avatar_url.as_deref(), Some(AVATAR_URL));
}

#[tokio::test]
async fn existing_query_parameters_are_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(query_param("locale", "en_US"))
        .and(query_param("query", "{me{displayName}}"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ME_DISPLAY_NAME_ONLY))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = Strategy::new(
        options_for(&server)
            .with_profile_url(format!("{}/v1/me?locale=en_US", server.uri()))
            .with_profile_fields(["displayName"]),
    )
    .unwrap();
    let profile = strategy.user_profile("token").await.unwrap();
    assert_eq!(profile.display_name.as_deref(), Some("Ghostface Chillah"));
}

#[tokio::test]
async fn invalid_token_is_an_api_error() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "{me{}}",
        ResponseTemplate::new(401).set_body_string("Message"),
    )
    .await;

    let strategy = Strategy::new(options_for(&server)).unwrap();
    match strategy.user_profile("token").await.unwrap_err() {
        ProfileError::Api { message, code } => {
            assert_eq!(message, "Message");
            assert_eq!(code, ApiErrorCode::Status(401));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn structured_provider_error_is_an_api_error() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "{me{}}",
        ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_token",
            "error_description": "Token expired"
        })),
    )
    .await;

    let strategy = Strategy::new(options_for(&server)).unwrap();
    match strategy.user_profile("token").await.unwrap_err() {
        ProfileError::Api { message, code } => {
            assert_eq!(message, "Token expired");
            assert_eq!(code, ApiErrorCode::Provider("invalid_token".to_string()));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        "{me{}}",
        ResponseTemplate::new(200).set_body_string("Hello, world."),
    )
    .await;

    let strategy = Strategy::new(options_for(&server)).unwrap();
    let err = strategy.user_profile("token").await.unwrap_err();
    assert!(matches!(err, ProfileError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse user profile"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let strategy = Strategy::new(
        StrategyOptions::new("ABC123", "secret", "https://www.example.net/cb")
            .with_profile_url("http://127.0.0.1:9/v1/me"),
    )
    .unwrap();

    let err = strategy.user_profile("token").await.unwrap_err();
    assert!(matches!(err, ProfileError::Transport { .. }));
    assert_eq!(err.to_string(), "Failed to fetch user profile");
    assert!(err.source().is_some());
}

#[test]
fn fixtures_normalize() {
    let full = SnapchatProfile::from_json_str(ME).unwrap();
    assert_eq!(full.bitmoji.avatar_id.as_deref(), Some("my-bitmoji-id"));

    let display_only = SnapchatProfile::from_json_str(ME_DISPLAY_NAME_ONLY).unwrap();
    assert_eq!(display_only.display_name.as_deref(), Some("Ghostface Chillah"));
    assert!(display_only.bitmoji.avatar_id.is_none());
    assert!(display_only.bitmoji.avatar_url.is_none());

    let empty = SnapchatProfile::from_json_str(ME_NO_SCOPES).unwrap();
    assert_eq!(empty.provider, "snapchat");
    assert!(empty.id.is_none());
    assert!(empty.display_name.is_none());
    assert!(empty.bitmoji.avatar_id.is_none());
    assert!(empty.bitmoji.avatar_url.is_none());
}

#[tokio::test]
async fn full_login_exchanges_code_then_fetches_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/oauth2/token"))
        .and(body_string_contains("code=auth-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_profile(
        &server,
        "{me{externalId}}",
        ResponseTemplate::new(200).set_body_string(ME),
    )
    .await;

    let mut options = options_for(&server).with_profile_fields(["id"]);
    options.token_url = Some(format!("{}/accounts/oauth2/token", server.uri()));
    options.pass_caller_context = true;
    let strategy = Strategy::new(options).unwrap();

    let (context, user_id) = strategy
        .authenticate("auth-code", "session-1", |verified| async move {
            match verified.profile.id {
                Some(id) => Ok((verified.context, id)),
                None => Err(AuthError::Rejected("profile without id".into())),
            }
        })
        .await
        .expect("login should succeed");

    assert_eq!(context, Some("session-1"));
    assert_eq!(user_id, "my-external-id");
}
