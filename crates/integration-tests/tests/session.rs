//! Session lifecycle against a mock backend.

#![allow(clippy::unwrap_used)]

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use pomade_client::api::AuthApi;
use pomade_client::session::SessionState;
use pomade_client::token::Credential;
use pomade_core::Role;

use pomade_integration_tests::{TestContext, cart_json, user_json};

#[tokio::test]
async fn login_establishes_agent_session_and_authenticated_calls() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "abc",
            "user": user_json("u-1", "Dana", "AGENT"),
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    // The session role comes from the identity endpoint, not the login
    // response.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-1", "Dana", "AGENT")))
        .expect(1)
        .mount(&ctx.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cart/add"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cart_json(&[("product-7", "Argan Oil 1L", 129.5, 2)])),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let auth = AuthApi::new(ctx.gateway.clone());
    let response = auth
        .login(&"dana@salon.example".parse().unwrap(), "hunter2")
        .await
        .unwrap();
    assert_eq!(response.token, "abc");

    let state = ctx.session.login(Credential::new(response.token)).await;
    assert_eq!(state.role(), Some(Role::Agent));

    // Subsequent calls carry the stored bearer token.
    let cart = ctx.cart.add_item("product-7", 2).await.unwrap();
    assert_eq!(cart.total_items, 2);
}

#[tokio::test]
async fn initialize_without_credential_is_anonymous_with_zero_calls() {
    let ctx = TestContext::new().await;

    let state = ctx.session.initialize().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(ctx.received_requests().await.is_empty());
}

#[tokio::test]
async fn initialize_with_credential_derives_role_from_identity() {
    let ctx = TestContext::signed_in("tok-1").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-2", "Priya", "ADMIN")))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let state = ctx.session.initialize().await;
    assert_eq!(state.role(), Some(Role::Admin));
}

#[tokio::test]
async fn identity_failure_falls_back_to_anonymous() {
    let ctx = TestContext::signed_in("tok-1").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.server)
        .await;

    let state = ctx.session.initialize().await;
    assert_eq!(state, SessionState::Anonymous);
}

#[tokio::test]
async fn unauthorized_response_clears_credential_and_session() {
    let ctx = TestContext::signed_in("stale").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-1", "Dana", "USER")))
        .mount(&ctx.server)
        .await;

    assert_eq!(ctx.session.initialize().await.role(), Some(Role::User));

    // Any 401 clears the credential as a side effect...
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&ctx.server)
        .await;

    let mut redirects = ctx.gateway.login_redirects();
    let err = ctx.cart.refresh().await.unwrap_err();
    assert!(matches!(err, pomade_client::error::ApiError::Unauthorized));
    assert!(ctx.tokens.get().is_none());
    assert!(redirects.has_changed().unwrap());

    // ...and the next session read is anonymous without a network call.
    assert_eq!(ctx.session.current(), SessionState::Anonymous);
}

#[tokio::test]
async fn logout_notifies_session_watchers() {
    let ctx = TestContext::signed_in("tok-1").await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-1", "Dana", "USER")))
        .mount(&ctx.server)
        .await;

    ctx.session.initialize().await;
    let mut changes = ctx.session.changes();

    ctx.session.logout();

    assert!(changes.has_changed().unwrap());
    assert_eq!(*changes.borrow_and_update(), SessionState::Anonymous);
    assert!(ctx.tokens.get().is_none());
}
